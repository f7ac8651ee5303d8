// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Verification-database integrity source for RPM hosts.
//!
//! `rpm -Va` prints one changed file per line on stdout: the change-flag
//! string first, then an optional single-character attribute marker (blank
//! for ordinary files), then the path. The output carries no package
//! identity, so ownership is resolved with a per-file `rpm -qf` query.

use super::{IntegrityRecord, IntegrityResult, IntegritySource, LineParseError};
use crate::process::{CommandRunner, CommandSpec};

pub(crate) struct RpmVerifySource;

impl IntegritySource for RpmVerifySource {
    fn name(&self) -> &'static str {
        "rpm"
    }

    fn detect(&self, runner: &dyn CommandRunner) -> bool {
        runner.probe("dnf")
    }

    fn collect(&self, runner: &dyn CommandRunner) -> IntegrityResult<Vec<IntegrityRecord>> {
        // Non-zero exit just means changed files were found.
        let output = runner.run(&CommandSpec::new("rpm", &["-Va"]))?;

        let mut records = Vec::new();
        for line in output.stdout.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_verify_line(line) {
                Ok((changed, path)) => {
                    let package = resolve_owner(runner, &path)?;
                    records.push(IntegrityRecord {
                        path,
                        package,
                        changed,
                    });
                }
                Err(err) => eprintln!("Skipping rpm verify line: {err}"),
            }
        }
        Ok(records)
    }
}

/// Look up the package owning `path`. An unresolvable owner yields an empty
/// package name rather than aborting the scan.
fn resolve_owner(runner: &dyn CommandRunner, path: &str) -> IntegrityResult<String> {
    let output = runner.run(&CommandSpec::new("rpm", &["-qf", path, "--qf", "%{NAME}"]))?;
    if output.success {
        Ok(output.stdout.trim().to_string())
    } else {
        eprintln!("Owner not resolved: path={path}");
        Ok(String::new())
    }
}

/// Split a verify line into its change-flag string and path. The attribute
/// marker between them is present for config/doc/ghost entries only, so both
/// two- and three-token layouts are valid.
fn parse_verify_line(line: &str) -> Result<(String, String), LineParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [changed, path] | [changed, _, path] => Ok(((*changed).to_string(), (*path).to_string())),
        _ => Err(LineParseError::new(line)),
    }
}
