// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Account-database line grammar and interactive-shell classification.
//!
//! A line is colon-delimited: the login name is the first field, the login
//! shell the last. Malformed lines are not validated; their fields propagate
//! as parsed.

/// Field delimiter of the account database.
const FIELD_DELIMITER: char = ':';

/// Shell basenames that allow an interactive login, matched as a trailing
/// path segment (`/bin/bash` ends with `/bash`; `/usr/sbin/nologin` matches
/// nothing).
pub(crate) const INTERACTIVE_SHELL_SUFFIXES: [&str; 6] =
    ["/bash", "/sh", "/zsh", "/ksh", "/csh", "/dash"];

/// Extract `(name, shell)` from one account-database line.
pub(crate) fn parse_entry(line: &str) -> (String, String) {
    let name = line
        .split(FIELD_DELIMITER)
        .next()
        .unwrap_or_default()
        .to_string();
    let shell = line
        .rsplit(FIELD_DELIMITER)
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_string();
    (name, shell)
}

pub(crate) fn is_interactive_shell(shell: &str) -> bool {
    INTERACTIVE_SHELL_SUFFIXES
        .iter()
        .any(|suffix| shell.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_standard_line() {
        let (name, shell) = parse_entry("alice:x:1000:1000::/home/alice:/bin/bash");
        assert_eq!(name, "alice");
        assert_eq!(shell, "/bin/bash");
    }

    #[test]
    fn test_parse_entry_trims_trailing_newline() {
        let (name, shell) = parse_entry("daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin\n");
        assert_eq!(name, "daemon");
        assert_eq!(shell, "/usr/sbin/nologin");
    }

    #[test]
    fn test_parse_entry_propagates_malformed_line() {
        // No delimiter at all: both fields become the whole line.
        let (name, shell) = parse_entry("garbage");
        assert_eq!(name, "garbage");
        assert_eq!(shell, "garbage");
    }

    #[test]
    fn test_parse_entry_empty_shell_field() {
        let (name, shell) = parse_entry("ghost:x:999:999::/nonexistent:");
        assert_eq!(name, "ghost");
        assert_eq!(shell, "");
    }

    #[test]
    fn test_interactive_shells() {
        for shell in [
            "/bin/bash",
            "/bin/sh",
            "/usr/bin/zsh",
            "/bin/ksh",
            "/bin/csh",
            "/bin/dash",
        ] {
            assert!(is_interactive_shell(shell), "{shell} should be interactive");
        }
    }

    #[test]
    fn test_non_interactive_shells() {
        for shell in ["/usr/sbin/nologin", "/bin/false", "", "bash", "/bin/fish"] {
            assert!(
                !is_interactive_shell(shell),
                "{shell} should not be interactive"
            );
        }
    }

    #[test]
    fn test_suffix_is_a_trailing_path_segment() {
        // "/bin/dash" must match "/dash", not be caught by "/sh".
        assert!(is_interactive_shell("/bin/dash"));
        assert!(!is_interactive_shell("/bin/flash"));
    }
}
