// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Privilege classification via the elevation-policy tool.
//!
//! `sudo -l -U <name>` lists the commands an account may run with elevated
//! rights; accounts without any print a `not allowed` notice instead.
//! Classification is fail-closed: a query that cannot be started or that
//! produces empty output classifies as NOT privileged, so a broken sudo
//! never floods the report with false positives.

use crate::process::{CommandRunner, CommandSpec};

/// Phrase sudo prints for accounts without elevation rights.
const NOT_ALLOWED_PHRASE: &str = "not allowed";

/// Query whether `name` is permitted elevated command execution.
pub(crate) fn query_privilege(runner: &dyn CommandRunner, name: &str) -> bool {
    let spec = CommandSpec::new("sudo", &["-l", "-U", name]);
    match runner.run(&spec) {
        Ok(output) => {
            let privileged = classify(&output.stdout);
            if privileged {
                eprintln!("Privilege detected: account={name}");
            }
            privileged
        }
        Err(err) => {
            eprintln!("Privilege query failed, classifying as not privileged: account={name}: {err}");
            false
        }
    }
}

fn classify(stdout: &str) -> bool {
    !stdout.trim().is_empty() && !stdout.contains(NOT_ALLOWED_PHRASE)
}
