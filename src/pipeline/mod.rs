//! Document digest pipeline
//!
//! Identify a document's language, then produce keyword, extractive and
//! abstractive summaries with per-stage timings. Keyword extraction and
//! abstractive summarization are pluggable collaborators.

pub mod config;
pub mod observer;
pub mod runner;
pub mod traits;

pub use config::DigestConfig;
pub use observer::{NoopObserver, PipelineObserver, StageRecorder};
pub use runner::{DigestPipeline, DigestReport, StageTimes};
pub use traits::{
    AbstractiveSummarizer, KeywordExtractor, NoopAbstractiveSummarizer, NoopKeywordExtractor,
    TermFrequencyKeywords,
};
