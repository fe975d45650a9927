//! Read-only views for report consumers
//!
//! Sorted snapshots and codepoint labels for export code. Nothing here
//! mutates a report; every snapshot is a fresh `Vec`.

use super::{EntityTallies, Report};

/// `U+` label with uppercase hex, zero-padded to at least four digits
///
/// `0x41` -> `U+0041`, `0x1F4A9` -> `U+1F4A9`
pub fn codepoint_label(codepoint: u32) -> String {
    format!("U+{codepoint:04X}")
}

/// Entity spellings with their total count across files
///
/// Ascending by total, ties broken by spelling.
pub fn tallies_by_total(table: &EntityTallies) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = table
        .iter()
        .map(|(text, files)| (text.as_str(), files.values().sum()))
        .collect();
    rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    rows
}

impl Report {
    /// Codepoint histogram ascending by count, ties by codepoint
    pub fn codepoints_by_count(&self) -> Vec<(u32, u64)> {
        let mut rows: Vec<(u32, u64)> = self.codepoints.iter().map(|(&cp, &n)| (cp, n)).collect();
        // BTreeMap order already sorts ties by codepoint; a stable sort keeps it
        rows.sort_by_key(|&(_, count)| count);
        rows
    }

    /// Unknown entities ascending by total count
    pub fn unknown_entities_by_total(&self) -> Vec<(&str, u64)> {
        tallies_by_total(&self.unknown_entities)
    }

    /// Parse errors ascending by total count
    pub fn parsing_errors_by_total(&self) -> Vec<(&str, u64)> {
        tallies_by_total(&self.parsing_errors)
    }
}
