//! Summarization components
//!
//! Extractive summarization: sentences are scored by corpus-relative term
//! weight times a position weight, and the top N are returned in document
//! order.

pub mod extractive;
pub mod scorer;
pub mod selector;
pub mod statistics;

pub use extractive::ExtractiveSummarizer;
pub use scorer::SummaryScorer;
pub use selector::{SelectedSentence, SentenceSelector, SummaryResult, DEFAULT_NUM_SENTENCES};
pub use statistics::CorpusStatistics;
