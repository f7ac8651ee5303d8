// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod args;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use args::{Args, AuditCommand, ReportFormat};
use host_auditor::privilege::Elevation;
use host_auditor::process::SystemRunner;
use host_auditor::report::{AccountReport, IntegrityReport, ReportSink};
use host_auditor::{check_integrity, list_accounts};

/// Exit code when the elevated-privilege precondition fails. Engine and
/// report failures exit with 1.
const EXIT_PRIVILEGE_REQUIRED: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    // Precondition: no engine work before the privilege check has passed.
    let elevation = match Elevation::acquire() {
        Ok(elevation) => elevation,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(EXIT_PRIVILEGE_REQUIRED);
        }
    };

    match run(&args, &elevation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, elevation: &Elevation) -> Result<()> {
    let runner = SystemRunner::default();
    match &args.command {
        AuditCommand::Integrity { stdout, format } => {
            eprintln!("Comparing ALL installed packages, this may take a while...");
            let records =
                check_integrity(elevation, &runner).context("Integrity check failed")?;
            eprintln!("Verification completed: findings={}", records.len());

            let report = IntegrityReport::new(records);
            let (document, extension) = match format {
                ReportFormat::Json => (report.to_json()?, "json"),
                ReportFormat::Csv => (report.to_csv(), "csv"),
            };
            sink(*stdout).write("sig-check", extension, &document)
        }
        AuditCommand::Accounts { stdout } => {
            let records = list_accounts(elevation, &runner).context("Account audit failed")?;
            eprintln!("Account enumeration completed: accounts={}", records.len());

            let report = AccountReport::new(&records);
            sink(*stdout).write("profile-audit", "json", &report.to_json()?)
        }
    }
}

fn sink(stdout: bool) -> ReportSink {
    if stdout {
        ReportSink::Stdout
    } else {
        ReportSink::HostnameFile
    }
}
