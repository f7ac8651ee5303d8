// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Account-classification engine.
//!
//! Reads the system account database and produces one [`AccountRecord`] per
//! non-empty line, in file order, enriched with a per-account privilege
//! query and an interactive-login classification.

mod passwd;
mod sudo;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::privilege::Elevation;
use crate::process::CommandRunner;

/// The system account database.
const ACCOUNT_DATABASE: &str = "/etc/passwd";

/// Errors that abort an account run. An unreadable database is fatal to the
/// whole engine; a partial list is never produced.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("failed to read account database: {path}")]
    DataSourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One local account with its security-relevant classifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Login name, the first field of the database line.
    pub name: String,
    /// Login shell, the last field of the database line.
    pub shell: String,
    /// True iff the elevation-policy query permits elevated execution.
    pub privilege: bool,
    /// True iff the shell ends with a known interactive-shell basename.
    pub interactive: bool,
}

impl AccountRecord {
    fn from_database_line(line: &str, runner: &dyn CommandRunner) -> Self {
        let (name, shell) = passwd::parse_entry(line);
        let interactive = passwd::is_interactive_shell(&shell);
        let privilege = sudo::query_privilege(runner, &name);
        Self {
            name,
            shell,
            privilege,
            interactive,
        }
    }
}

/// Enumerate and classify all local accounts, in account-database order.
///
/// # Errors
/// Returns [`AccountError::DataSourceUnreadable`] if the account database
/// cannot be read.
pub fn list_accounts(
    _elevation: &Elevation,
    runner: &dyn CommandRunner,
) -> Result<Vec<AccountRecord>, AccountError> {
    let database = std::fs::read_to_string(ACCOUNT_DATABASE).map_err(|e| {
        AccountError::DataSourceUnreadable {
            path: PathBuf::from(ACCOUNT_DATABASE),
            source: e,
        }
    })?;
    Ok(classify_accounts(&database, runner))
}

fn classify_accounts(database: &str, runner: &dyn CommandRunner) -> Vec<AccountRecord> {
    database
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| AccountRecord::from_database_line(line, runner))
        .collect()
}
