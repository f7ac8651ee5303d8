// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Checksum-family integrity source for Debian hosts, backed by `debsums`.
//!
//! `debsums -s -a` reports one mismatched file per line on its stderr, e.g.
//! `debsums: changed file /etc/foo.conf (from bar-pkg package)`. The path and
//! the owning package sit at fixed whitespace-token offsets within the line.

use super::{IntegrityError, IntegrityRecord, IntegrityResult, IntegritySource, LineParseError};
use crate::process::{CommandRunner, CommandSpec};

/// Token offsets within a `debsums -s` finding line.
const FINDING_PATH_TOKEN: usize = 3;
const FINDING_PACKAGE_TOKEN: usize = 5;
const MIN_FINDING_TOKENS: usize = 6;

/// `debsums` performs a plain checksum pass/fail, so the change-flag column
/// is padded for parity with rpm's verify output.
pub(crate) const CHECKSUM_CHANGE_PLACEHOLDER: &str = ".........";

pub(crate) struct DebsumsSource;

impl IntegritySource for DebsumsSource {
    fn name(&self) -> &'static str {
        "debsums"
    }

    fn detect(&self, runner: &dyn CommandRunner) -> bool {
        runner.probe("apt")
    }

    fn collect(&self, runner: &dyn CommandRunner) -> IntegrityResult<Vec<IntegrityRecord>> {
        if !runner.probe("debsums") && !install_debsums(runner) {
            return Err(IntegrityError::HelperUnavailable);
        }

        // Findings land on the diagnostic stream; the exit status reflects
        // the presence of mismatches and is deliberately ignored.
        let output = runner.run(&CommandSpec::new("debsums", &["-s", "-a"]))?;

        let mut records = Vec::new();
        for line in output.stderr.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_finding_line(line) {
                Ok(record) => records.push(record),
                Err(err) => eprintln!("Skipping debsums line: {err}"),
            }
        }
        Ok(records)
    }
}

/// Attempt a non-interactive installation of the missing helper.
fn install_debsums(runner: &dyn CommandRunner) -> bool {
    eprintln!("debsums not found, attempting installation");
    let spec = CommandSpec::new("apt-get", &["install", "-y", "debsums"])
        .env("DEBIAN_FRONTEND", "noninteractive");
    matches!(runner.run(&spec), Ok(output) if output.success)
}

fn parse_finding_line(line: &str) -> Result<IntegrityRecord, LineParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_FINDING_TOKENS {
        return Err(LineParseError::new(line));
    }
    Ok(IntegrityRecord {
        path: tokens[FINDING_PATH_TOKEN].to_string(),
        package: tokens[FINDING_PACKAGE_TOKEN].to_string(),
        changed: CHECKSUM_CHANGE_PLACEHOLDER.to_string(),
    })
}
