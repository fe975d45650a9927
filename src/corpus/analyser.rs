//! Corpus Analyser
//!
//! Walks each decoded document depth-first in document order, scans every
//! text leaf, and tallies the resulting events under the document's file
//! name. Null leaves are logged and skipped; other scalars are ignored.

use super::document::{DocumentValue, SourceDocument};
use crate::core::scanner::scan_text;
use crate::report::{Report, ReportAccumulator};

/// What a single document walk touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Text leaves scanned
    pub strings: u64,
    /// Null leaves skipped
    pub nulls: u64,
    /// Classified events recorded
    pub events: u64,
}

impl WalkStats {
    fn add(&mut self, other: WalkStats) {
        self.strings += other.strings;
        self.nulls += other.nulls;
        self.events += other.events;
    }
}

/// Scan one document tree into `acc`, tagging events with `file`
pub fn analyse_value(value: &DocumentValue, file: &str, acc: &mut ReportAccumulator) -> WalkStats {
    let mut stats = WalkStats::default();
    let mut stack: Vec<&DocumentValue> = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            DocumentValue::Text(text) => {
                let mut recorder = acc.for_file(file);
                scan_text(text, &mut recorder);
                stats.strings += 1;
                stats.events += recorder.events();
            }
            DocumentValue::Null => {
                stats.nulls += 1;
                log::warn!(target: "xmlcensus::corpus", "null value in {file}, nothing to analyse");
            }
            DocumentValue::Sequence(_) | DocumentValue::Map(_) => {
                // Reverse so the first child is popped first
                stack.extend(node.children().rev());
            }
            DocumentValue::Other => {}
        }
    }

    log::debug!(
        target: "xmlcensus::corpus",
        "{file}: {} strings, {} events, {} nulls",
        stats.strings,
        stats.events,
        stats.nulls
    );
    stats
}

/// Accumulates any number of documents into one report
#[derive(Debug, Default)]
pub struct CorpusAnalyser {
    acc: ReportAccumulator,
    documents: u64,
    stats: WalkStats,
}

impl CorpusAnalyser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document into the report
    pub fn analyse(&mut self, document: &SourceDocument) -> WalkStats {
        self.analyse_value(&document.value, &document.file)
    }

    /// Fold a bare value, tagged with `file`
    pub fn analyse_value(&mut self, value: &DocumentValue, file: &str) -> WalkStats {
        let stats = analyse_value(value, file, &mut self.acc);
        self.documents += 1;
        self.stats.add(stats);
        stats
    }

    /// Documents analysed so far
    #[inline]
    pub fn documents(&self) -> u64 {
        self.documents
    }

    /// Totals across all documents so far
    #[inline]
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Report accumulated so far
    #[inline]
    pub fn report(&self) -> &Report {
        self.acc.report()
    }

    /// Freeze the report; the analyser is consumed
    pub fn finish(self) -> Report {
        let report = self.acc.freeze();
        log::debug!(
            target: "xmlcensus::corpus",
            "analysed {} documents: {} distinct codepoints, {} unknown entities, {} parse errors",
            self.documents,
            report.codepoints().len(),
            report.unknown_entities().len(),
            report.parsing_errors().len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_nested_values() {
        let doc = DocumentValue::Map(vec![
            ("title".into(), DocumentValue::text("Hi")),
            (
                "body".into(),
                DocumentValue::Sequence(vec![
                    DocumentValue::text("&amp;"),
                    DocumentValue::Sequence(vec![DocumentValue::text("&nope;")]),
                ]),
            ),
        ]);
        let mut acc = ReportAccumulator::new();
        let stats = analyse_value(&doc, "a.xml", &mut acc);
        assert_eq!(stats, WalkStats { strings: 3, nulls: 0, events: 4 });

        let report = acc.freeze();
        assert_eq!(report.codepoint_count('H' as u32), 1);
        assert_eq!(report.codepoint_count('i' as u32), 1);
        assert_eq!(report.codepoint_count('&' as u32), 1);
        assert_eq!(report.unknown_entities()["&nope;"]["a.xml"], 1);
    }

    #[test]
    fn test_map_keys_not_scanned() {
        let doc = DocumentValue::Map(vec![("key".into(), DocumentValue::text("v"))]);
        let mut acc = ReportAccumulator::new();
        analyse_value(&doc, "f", &mut acc);
        let report = acc.freeze();
        assert_eq!(report.codepoints().len(), 1);
        assert_eq!(report.codepoint_count('v' as u32), 1);
    }

    #[test]
    fn test_null_and_other_leaves() {
        let doc = DocumentValue::Sequence(vec![
            DocumentValue::Null,
            DocumentValue::Other,
            DocumentValue::text("x"),
            DocumentValue::Null,
        ]);
        let mut acc = ReportAccumulator::new();
        let stats = analyse_value(&doc, "f", &mut acc);
        assert_eq!(stats, WalkStats { strings: 1, nulls: 2, events: 1 });
        assert_eq!(acc.freeze().total_codepoints(), 1);
    }

    #[test]
    fn test_null_root_contributes_nothing() {
        let mut analyser = CorpusAnalyser::new();
        let stats = analyser.analyse(&SourceDocument::new("empty.xml", DocumentValue::Null));
        assert_eq!(stats.nulls, 1);
        assert_eq!(analyser.documents(), 1);
        assert!(analyser.finish().is_empty());
    }

    #[test]
    fn test_analyser_tags_by_file() {
        let mut analyser = CorpusAnalyser::new();
        analyser.analyse(&SourceDocument::new("a.xml", "&unknown;"));
        analyser.analyse(&SourceDocument::new("b.xml", vec!["&unknown;", "&unknown;"]));
        assert_eq!(analyser.stats().strings, 3);

        let report = analyser.finish();
        let files = &report.unknown_entities()["&unknown;"];
        assert_eq!(files.len(), 2);
        assert_eq!(files["a.xml"], 1);
        assert_eq!(files["b.xml"], 2);
    }

    #[test]
    fn test_deep_nesting_uses_no_recursion() {
        let mut doc = DocumentValue::text("z");
        for _ in 0..100_000 {
            doc = DocumentValue::Sequence(vec![doc]);
        }
        let mut acc = ReportAccumulator::new();
        let stats = analyse_value(&doc, "deep.xml", &mut acc);
        assert_eq!(stats.strings, 1);
        // Unwind the nesting by hand; the derived Drop would recurse
        while let DocumentValue::Sequence(mut items) = doc {
            doc = items.pop().unwrap_or(DocumentValue::Null);
        }
    }
}
