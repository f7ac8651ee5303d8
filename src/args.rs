// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "host_auditor")]
#[command(version)]
#[command(about = "Audits package integrity and local accounts on Linux hosts")]
pub(crate) struct Args {
    #[command(subcommand)]
    pub command: AuditCommand,
}

#[derive(Subcommand)]
pub(crate) enum AuditCommand {
    /// Verify all package-managed files against the package manager's
    /// checksum/verification database.
    Integrity {
        /// Write the report to standard output instead of
        /// <hostname>-sig-check.<ext>.
        #[arg(long)]
        stdout: bool,

        /// Report format. CSV is the legacy tabular variant.
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
    },

    /// Enumerate local accounts and classify interactive-login capability
    /// and sudo privilege.
    Accounts {
        /// Write the report to standard output instead of
        /// <hostname>-profile-audit.json.
        #[arg(long)]
        stdout: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    Json,
    Csv,
}
