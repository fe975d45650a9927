//! Corpus Analysis
//!
//! Decoded document trees in, one aggregate `Report` out.

pub mod analyser;
pub mod document;

pub use analyser::{analyse_value, CorpusAnalyser, WalkStats};
pub use document::{DocumentValue, SourceDocument};
