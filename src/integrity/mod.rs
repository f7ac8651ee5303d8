// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Package-integrity engine.
//!
//! Detects the installed package manager family, runs its verification
//! command and normalizes the manager-specific output into canonical
//! [`IntegrityRecord`]s. Each supported family implements
//! [`IntegritySource`]; new managers are added as new implementations.

mod debsums;
mod rpm;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::privilege::Elevation;
use crate::process::{CommandError, CommandRunner};
use debsums::DebsumsSource;
use rpm::RpmVerifySource;

/// Result type for integrity operations.
pub type IntegrityResult<T> = std::result::Result<T, IntegrityError>;

/// Errors that abort an integrity run.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("no supported package manager found on this host")]
    ManagerNotFound,
    #[error("debsums is not installed and automatic installation failed")]
    HelperUnavailable,
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// A single-line tool output that did not match the expected token layout.
/// Offending lines are logged and skipped, never fatal to the run.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unexpected token layout: {line:?}")]
pub struct LineParseError {
    line: String,
}

impl LineParseError {
    fn new(line: &str) -> Self {
        Self {
            line: line.to_string(),
        }
    }
}

/// One package-managed file the manager reports as failing or modified.
/// Passing files never appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityRecord {
    /// Absolute path of the file.
    pub path: String,
    /// Owning package; empty when the manager cannot resolve ownership.
    pub package: String,
    /// Manager-specific change flags. Nine `.` characters for the checksum
    /// family, the native rpm change-flag string for the verification family.
    pub changed: String,
}

/// A package manager family that can verify its installed files.
pub(crate) trait IntegritySource {
    /// Family name for log lines.
    fn name(&self) -> &'static str;

    /// Probe whether this family's primary executable is on the search path.
    fn detect(&self, runner: &dyn CommandRunner) -> bool;

    /// Run the family's verification command and collect findings.
    ///
    /// # Errors
    /// Returns an error if a required tool is unavailable or an invocation
    /// fails. Zero findings is a successful, empty result.
    fn collect(&self, runner: &dyn CommandRunner) -> IntegrityResult<Vec<IntegrityRecord>>;
}

/// Verify all package-managed files on the host.
///
/// # Errors
/// Returns [`IntegrityError::ManagerNotFound`] if neither supported package
/// manager family is present, or any failure of the detected family.
pub fn check_integrity(
    _elevation: &Elevation,
    runner: &dyn CommandRunner,
) -> IntegrityResult<Vec<IntegrityRecord>> {
    check_with_sources(runner, &[&DebsumsSource, &RpmVerifySource])
}

fn check_with_sources(
    runner: &dyn CommandRunner,
    sources: &[&dyn IntegritySource],
) -> IntegrityResult<Vec<IntegrityRecord>> {
    for source in sources {
        if source.detect(runner) {
            eprintln!("Package manager detected: family={}", source.name());
            return source.collect(runner);
        }
    }
    Err(IntegrityError::ManagerNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::FakeRunner;
    use crate::process::CommandOutput;

    #[test]
    fn test_no_manager_is_an_error_not_an_empty_result() {
        let elevation = Elevation::assume_for_testing();
        let runner = FakeRunner::new();
        let result = check_integrity(&elevation, &runner);
        assert!(matches!(result, Err(IntegrityError::ManagerNotFound)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_dispatch_picks_checksum_family_when_apt_present() {
        let elevation = Elevation::assume_for_testing();
        let runner = FakeRunner::new()
            .with_program("apt")
            .with_program("debsums")
            .with_response("debsums -s -a", CommandOutput::succeeded("", ""));
        let records = check_integrity(&elevation, &runner).expect("empty run should succeed");
        assert!(records.is_empty());
        assert_eq!(runner.calls(), vec!["debsums -s -a"]);
    }

    #[test]
    fn test_dispatch_picks_verification_family_when_dnf_present() {
        let elevation = Elevation::assume_for_testing();
        let runner = FakeRunner::new()
            .with_program("dnf")
            .with_response("rpm -Va", CommandOutput::succeeded("", ""));
        let records = check_integrity(&elevation, &runner).expect("empty run should succeed");
        assert!(records.is_empty());
        assert_eq!(runner.calls(), vec!["rpm -Va"]);
    }
}
