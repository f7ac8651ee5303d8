// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! A host-integrity auditing utility for Linux machines.
//!
//! This crate provides functionality to:
//! - Verify files installed by the system package manager (deb or rpm family)
//!   against its checksum/verification database
//! - Enumerate local accounts and classify login capability and sudo privilege
//! - Emit the findings as JSON or CSV reports for fleet-security tooling

pub mod accounts;
pub mod integrity;
pub mod privilege;
pub mod process;
pub mod report;

// Re-export key types for convenience
pub use accounts::{list_accounts, AccountError, AccountRecord};
pub use integrity::{check_integrity, IntegrityError, IntegrityRecord};
pub use privilege::{Elevation, PrivilegeRequired};
pub use process::{CommandRunner, SystemRunner};
pub use report::{AccountReport, IntegrityReport, ReportSink};
