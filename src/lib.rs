//! xmlcensus - Character and entity census over decoded XML text
//!
//! Every text leaf of every document is split into characters and `&...;`
//! references, each classified as:
//! - Found: a plain character or resolved reference, tallied by codepoint
//! - UnknownName: `&name;` outside the predefined set, tallied by file
//! - ParseError: malformed reference, tallied by file
//!
//! Strategies:
//! A: Sequential corpus analysis (analyse_corpus)
//! B: Parallel corpus analysis with per-document partial reports (analyse_parallel)
//!
//! ```
//! use xmlcensus::{analyse_corpus, SourceDocument};
//!
//! let docs = vec![
//!     SourceDocument::new("a.xml", "caf&#xE9; &amp; &nbsp;"),
//!     SourceDocument::new("b.xml", vec!["&nbsp;", "&nbsp;"]),
//! ];
//! let report = analyse_corpus(&docs);
//! assert_eq!(report.codepoint_count(0xE9), 1);
//! assert_eq!(report.unknown_entities()["&nbsp;"]["b.xml"], 2);
//! ```

pub mod core;
pub mod corpus;
pub mod report;
pub mod strategy;

pub use crate::core::entity_machine::{EntityStateMachine, EntityType, LexerOutcome, LexerStep};
pub use crate::core::events::{ClassifiedEvent, EventSink, LexError};
pub use crate::core::scanner::{classify, scan_text, scan_utf16, TextScanner};
pub use crate::core::walker::{walk, walk_utf16, CharProcessor, Codepoints, Utf16Codepoints};
pub use crate::corpus::{CorpusAnalyser, DocumentValue, SourceDocument, WalkStats};
pub use crate::report::{codepoint_label, Report, ReportAccumulator};
#[cfg(feature = "parallel")]
pub use crate::strategy::analyse_parallel;
pub use crate::strategy::analyse_corpus;

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
