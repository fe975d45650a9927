//! Report Accumulator
//!
//! The only way to mutate report tables. Counts only ever go up; an outer
//! entity key is created together with its first per-file entry, so inner
//! tables are never empty.

use super::{EntityTallies, Report};
use crate::core::events::{ClassifiedEvent, EventSink};

/// Mutable statistics sink that freezes into a `Report`
#[derive(Debug, Clone, Default)]
pub struct ReportAccumulator {
    report: Report,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_codepoint(&mut self, codepoint: u32) {
        *self.report.codepoints.entry(codepoint).or_insert(0) += 1;
    }

    #[inline]
    pub fn add_unknown_entity(&mut self, text: &str, file: &str) {
        bump(&mut self.report.unknown_entities, text, file);
    }

    #[inline]
    pub fn add_parsing_error(&mut self, text: &str, file: &str) {
        bump(&mut self.report.parsing_errors, text, file);
    }

    /// Route one classified event to its table
    pub fn record(&mut self, event: &ClassifiedEvent, file: &str) {
        match event {
            ClassifiedEvent::Found { codepoint, .. } => self.add_codepoint(*codepoint),
            ClassifiedEvent::UnknownName { raw_text } => self.add_unknown_entity(raw_text, file),
            ClassifiedEvent::ParseError { raw_text, .. } => self.add_parsing_error(raw_text, file),
        }
    }

    /// Add a frozen partial report (e.g. from another worker)
    pub fn absorb(&mut self, partial: Report) {
        let current = std::mem::take(&mut self.report);
        self.report = current.merge(partial);
    }

    /// Read access while still accumulating
    #[inline]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Event sink that tags everything with `file`
    pub fn for_file<'a>(&'a mut self, file: &'a str) -> FileRecorder<'a> {
        FileRecorder { acc: self, file, events: 0 }
    }

    /// Stop accumulating and hand the report out
    pub fn freeze(self) -> Report {
        self.report
    }
}

fn bump(table: &mut EntityTallies, text: &str, file: &str) {
    // Avoid allocating the key on the common already-present path
    if let Some(files) = table.get_mut(text) {
        match files.get_mut(file) {
            Some(count) => *count += 1,
            None => {
                files.insert(file.to_string(), 1);
            }
        }
        return;
    }
    table
        .entry(text.to_string())
        .or_default()
        .insert(file.to_string(), 1);
}

/// `EventSink` adapter recording events against one source file
pub struct FileRecorder<'a> {
    acc: &'a mut ReportAccumulator,
    file: &'a str,
    events: u64,
}

impl FileRecorder<'_> {
    /// Events recorded through this adapter
    #[inline]
    pub fn events(&self) -> u64 {
        self.events
    }
}

impl EventSink for FileRecorder<'_> {
    #[inline]
    fn event(&mut self, event: ClassifiedEvent) {
        self.events += 1;
        self.acc.record(&event, self.file);
    }
}
