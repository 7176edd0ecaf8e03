//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use std::io::{self, BufRead, IsTerminal};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read defect references from stdin if available (Unix philosophy support)
///
/// Returns `Some(Vec<String>)` with references if stdin is piped (not a terminal),
/// or `None` if stdin is a terminal (interactive mode).
///
/// This enables Unix-style pipelines like:
/// ```bash
/// shq defect list --status closed --format csv | cut -d, -f2 | tail -n +2 | shq defect delete
/// ```
///
/// References are read one per line, with empty lines and whitespace-only lines ignored.
pub fn read_refs_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();

    // Only read from stdin if it's piped (not a terminal)
    if stdin.is_terminal() {
        return None;
    }

    let refs: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if refs.is_empty() {
        None
    } else {
        Some(refs)
    }
}
