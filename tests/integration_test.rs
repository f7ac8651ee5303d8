// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use std::process::Command;

use host_auditor::report::{AccountReport, IntegrityReport};
use host_auditor::{AccountRecord, Elevation, IntegrityRecord};

fn account(name: &str, shell: &str, privilege: bool, interactive: bool) -> AccountRecord {
    AccountRecord {
        name: name.to_string(),
        shell: shell.to_string(),
        privilege,
        interactive,
    }
}

#[test]
fn test_account_report_round_trip_preserves_categories() {
    let records = vec![
        account("root", "/bin/bash", true, true),
        account("daemon", "/usr/sbin/nologin", false, false),
        account("alice", "/bin/zsh", false, true),
        account("backup", "/bin/sh", true, true),
    ];

    let report = AccountReport::new(&records);
    let document = report.to_json().expect("Should serialize account report");
    let recovered: AccountReport =
        serde_json::from_str(&document).expect("Should deserialize account report");

    // The categorized lists computed from the records must survive the
    // serialize/deserialize round trip with identical membership.
    assert_eq!(recovered.users, records);
    assert_eq!(
        recovered.privilege,
        records
            .iter()
            .filter(|r| r.privilege)
            .cloned()
            .collect::<Vec<_>>()
    );
    assert_eq!(
        recovered.interactive,
        records
            .iter()
            .filter(|r| r.interactive)
            .cloned()
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_integrity_report_document_shape() {
    let report = IntegrityReport::new(vec![
        IntegrityRecord {
            path: "/etc/foo.conf".to_string(),
            package: "bar-pkg".to_string(),
            changed: ".........".to_string(),
        },
        IntegrityRecord {
            path: "/etc/baz.conf".to_string(),
            package: "baz-pkg".to_string(),
            changed: "S.5....T.".to_string(),
        },
    ]);

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().unwrap()).expect("Should parse JSON");
    let packages = json["packages"].as_array().expect("packages should be a list");
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["path"], "/etc/foo.conf");
    assert_eq!(packages[1]["changed"], "S.5....T.");

    let csv = report.to_csv();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Path,Package,Changed"));
    assert_eq!(lines.next(), Some("/etc/foo.conf,bar-pkg,........."));
}

#[test]
fn test_binary_requires_privilege() {
    if Elevation::acquire().is_ok() {
        eprintln!("Skipping test: running as root, privilege precondition cannot fail.");
        return;
    }

    let output = Command::new(env!("CARGO_BIN_EXE_host_auditor"))
        .args(["accounts", "--stdout"])
        .output()
        .expect("Should run the audit binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("administrative privilege required"),
        "stderr should name the failure kind, got: {stderr}"
    );
    assert!(
        output.stdout.is_empty(),
        "no report may be produced without privilege"
    );
}

#[test]
fn test_binary_help_names_both_pipelines() {
    let output = Command::new(env!("CARGO_BIN_EXE_host_auditor"))
        .arg("--help")
        .output()
        .expect("Should run the audit binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("integrity"));
    assert!(stdout.contains("accounts"));
}
