// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Report destinations.
//!
//! Documents are built fully in memory before any byte reaches the sink;
//! file writes go through a temporary file and an atomic rename so a failed
//! serialization can never leave a truncated report behind.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where a finished report document goes.
pub enum ReportSink {
    /// Write the document to standard output.
    Stdout,
    /// Write to `<hostname>-<report>.<ext>` in the working directory.
    HostnameFile,
}

impl ReportSink {
    /// Write a complete report document to this sink.
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    pub fn write(&self, report_name: &str, extension: &str, document: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(document.as_bytes())
                    .context("Failed to write report to stdout")?;
                if !document.ends_with('\n') {
                    stdout
                        .write_all(b"\n")
                        .context("Failed to write report to stdout")?;
                }
                Ok(())
            }
            Self::HostnameFile => {
                let dest = PathBuf::from(format!("{}-{report_name}.{extension}", hostname()));
                eprintln!("Writing report to file: file={}", dest.display());
                write_atomic(&dest, document)
            }
        }
    }
}

fn write_atomic(dest: &Path, document: &str) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary report file in {}", dir.display()))?;
    file.write_all(document.as_bytes())
        .with_context(|| format!("Failed to write report: {}", dest.display()))?;
    file.persist(dest)
        .with_context(|| format!("Failed to persist report: {}", dest.display()))?;
    Ok(())
}

/// Local hostname, from `/etc/hostname` with an environment fallback.
fn hostname() -> String {
    if let Ok(contents) = std::fs::read_to_string("/etc/hostname") {
        let name = contents.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}
