// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Elevated-privilege precondition for both audit engines.
//!
//! The engines require an [`Elevation`] token in their contracts, so no
//! engine work (and no external process invocation) can happen before the
//! check at the entry point has passed.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("administrative privilege required: re-run as root")]
pub struct PrivilegeRequired;

/// Proof that the process runs with administrative privilege.
pub struct Elevation(());

impl Elevation {
    /// Check the effective UID of the calling process.
    ///
    /// # Errors
    /// Returns [`PrivilegeRequired`] when not running as root.
    pub fn acquire() -> Result<Self, PrivilegeRequired> {
        if nix::unistd::geteuid().is_root() {
            Ok(Self(()))
        } else {
            Err(PrivilegeRequired)
        }
    }

    #[cfg(test)]
    /// Construct the token without a privilege check.
    /// This is only available in test builds.
    pub(crate) fn assume_for_testing() -> Self {
        Self(())
    }
}
