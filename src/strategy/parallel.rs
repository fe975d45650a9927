//! Parallel Corpus Analysis
//!
//! Uses Rayon to scan documents in parallel. Each document gets a private
//! partial report; partials are merged pairwise, which is safe because merge
//! is associative and commutative.

use rayon::prelude::*;

use crate::corpus::{analyse_value, SourceDocument};
use crate::report::{Report, ReportAccumulator};

/// Analyse documents in parallel into a single report
pub fn analyse_parallel(documents: &[SourceDocument]) -> Report {
    documents
        .par_iter()
        .map(analyse_one)
        .reduce(Report::default, Report::merge)
}

/// Analyse and then map each document's own partial report
///
/// Partials come back in input order.
pub fn partial_reports<F, T>(documents: &[SourceDocument], mapper: F) -> Vec<T>
where
    F: Fn(&SourceDocument, Report) -> T + Sync + Send,
    T: Send,
{
    documents
        .par_iter()
        .map(|doc| mapper(doc, analyse_one(doc)))
        .collect()
}

fn analyse_one(document: &SourceDocument) -> Report {
    let mut acc = ReportAccumulator::new();
    analyse_value(&document.value, &document.file, &mut acc);
    acc.freeze()
}
