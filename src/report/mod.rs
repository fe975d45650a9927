//! Aggregate Report
//!
//! Three independent tally tables built during one corpus run:
//! - codepoint -> occurrences
//! - unknown entity text -> (file -> occurrences)
//! - malformed reference text -> (file -> occurrences)
//!
//! A `Report` is read-only. It is filled through a `ReportAccumulator` and
//! frozen with `ReportAccumulator::freeze`; partial reports (one per worker)
//! are combined with `Report::merge`, which is associative and commutative
//! with the empty report as identity.

pub mod accumulator;
pub mod view;

use std::collections::BTreeMap;

pub use accumulator::ReportAccumulator;
pub use view::{codepoint_label, tallies_by_total};

/// Per-file counts for one entity spelling. Never empty inside a report.
pub type FileTally = BTreeMap<String, u64>;

/// Spelling -> per-file counts
pub type EntityTallies = BTreeMap<String, FileTally>;

/// Frozen statistics of one corpus scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawReport"))]
pub struct Report {
    codepoints: BTreeMap<u32, u64>,
    unknown_entities: EntityTallies,
    parsing_errors: EntityTallies,
}

impl Report {
    /// Codepoint histogram
    #[inline]
    pub fn codepoints(&self) -> &BTreeMap<u32, u64> {
        &self.codepoints
    }

    /// Well-formed but unresolved named references, by file
    #[inline]
    pub fn unknown_entities(&self) -> &EntityTallies {
        &self.unknown_entities
    }

    /// Malformed references, by file
    #[inline]
    pub fn parsing_errors(&self) -> &EntityTallies {
        &self.parsing_errors
    }

    /// Count for one codepoint (0 if never seen)
    #[inline]
    pub fn codepoint_count(&self, codepoint: u32) -> u64 {
        self.codepoints.get(&codepoint).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty() && self.unknown_entities.is_empty() && self.parsing_errors.is_empty()
    }

    /// Sum of all codepoint occurrences
    pub fn total_codepoints(&self) -> u64 {
        self.codepoints.values().sum()
    }

    /// Combine two partial reports by summing every count
    pub fn merge(self, other: Report) -> Report {
        // Fold the smaller report into the larger one
        let (mut into, from) = if self.weight() >= other.weight() {
            (self, other)
        } else {
            (other, self)
        };

        for (codepoint, count) in from.codepoints {
            *into.codepoints.entry(codepoint).or_insert(0) += count;
        }
        merge_tallies(&mut into.unknown_entities, from.unknown_entities);
        merge_tallies(&mut into.parsing_errors, from.parsing_errors);
        into
    }

    /// Merge any number of partial reports
    pub fn merge_all<I: IntoIterator<Item = Report>>(reports: I) -> Report {
        reports.into_iter().fold(Report::default(), Report::merge)
    }

    #[inline]
    fn weight(&self) -> usize {
        self.codepoints.len() + self.unknown_entities.len() + self.parsing_errors.len()
    }
}

/// Unchecked wire form of a report
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawReport {
    codepoints: BTreeMap<u32, u64>,
    unknown_entities: EntityTallies,
    parsing_errors: EntityTallies,
}

#[cfg(feature = "serde")]
impl TryFrom<RawReport> for Report {
    type Error = String;

    /// Reject tables an accumulator could never have built
    fn try_from(raw: RawReport) -> Result<Self, Self::Error> {
        for (name, table) in [
            ("unknown_entities", &raw.unknown_entities),
            ("parsing_errors", &raw.parsing_errors),
        ] {
            if let Some((text, _)) = table.iter().find(|(_, files)| files.is_empty()) {
                return Err(format!("{name}: entry {text:?} has no files"));
            }
        }
        Ok(Report {
            codepoints: raw.codepoints,
            unknown_entities: raw.unknown_entities,
            parsing_errors: raw.parsing_errors,
        })
    }
}

fn merge_tallies(into: &mut EntityTallies, from: EntityTallies) {
    for (text, files) in from {
        let target = into.entry(text).or_default();
        for (file, count) in files {
            *target.entry(file).or_insert(0) += count;
        }
    }
}
