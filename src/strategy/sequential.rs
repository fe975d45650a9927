//! Sequential Corpus Analysis

use crate::corpus::{CorpusAnalyser, SourceDocument};
use crate::report::Report;

/// Analyse every document in order into a single report
pub fn analyse_corpus<'a, I>(documents: I) -> Report
where
    I: IntoIterator<Item = &'a SourceDocument>,
{
    let mut analyser = CorpusAnalyser::new();
    for document in documents {
        analyser.analyse(document);
    }
    analyser.finish()
}
