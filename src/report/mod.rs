// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Terminal report artifacts and their serialization.
//!
//! A report is a pure categorization of one record set. It owns copies of
//! the records it contains and is discarded after serialization.

mod sink;

pub use sink::ReportSink;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountRecord;
use crate::integrity::IntegrityRecord;

const CSV_HEADER: &str = "Path,Package,Changed";

/// Account audit document: the full account list plus the two filtered
/// sub-lists consumers key on.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountReport {
    pub users: Vec<AccountRecord>,
    pub privilege: Vec<AccountRecord>,
    pub interactive: Vec<AccountRecord>,
}

impl AccountReport {
    #[must_use]
    pub fn new(records: &[AccountRecord]) -> Self {
        Self {
            users: records.to_vec(),
            privilege: records.iter().filter(|r| r.privilege).cloned().collect(),
            interactive: records.iter().filter(|r| r.interactive).cloned().collect(),
        }
    }

    /// Serialize the report as a JSON document.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize account report to JSON")
    }
}

/// Package integrity document: the full finding list, no sub-categorization.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub packages: Vec<IntegrityRecord>,
}

impl IntegrityReport {
    #[must_use]
    pub fn new(packages: Vec<IntegrityRecord>) -> Self {
        Self { packages }
    }

    /// Serialize the report as a JSON document.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize integrity report to JSON")
    }

    /// Serialize the report as the legacy delimited-text document.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut document = String::from(CSV_HEADER);
        document.push('\n');
        for record in &self.packages {
            document.push_str(&csv_field(&record.path));
            document.push(',');
            document.push_str(&csv_field(&record.package));
            document.push(',');
            document.push_str(&csv_field(&record.changed));
            document.push('\n');
        }
        document
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
