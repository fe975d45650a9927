//! Corpus Strategy Module
//!
//! Two ways to run a corpus, producing identical reports:
//! - Sequential: one accumulator, documents folded in order
//! - Parallel: one private report per document (Rayon), merged afterwards

pub mod sequential;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use sequential::analyse_corpus;
#[cfg(feature = "parallel")]
pub use parallel::analyse_parallel;
