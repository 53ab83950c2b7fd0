//! # textdigest
//!
//! Language identification and extractive summarization for Russian and
//! Italian documents.
//!
//! ## Features
//!
//! - **Three identification strategies** behind one contract: letter
//!   frequencies (Manhattan distance), character n-grams (Kullback-Leibler
//!   divergence) and a trainable bag-of-words neural classifier
//! - **Extractive summaries**: corpus-relative term weighting combined with
//!   sentence position
//! - **Digest pipeline**: identification plus keyword, extractive and
//!   abstractive summaries with per-stage timings
//!
//! All reference state (profiles, corpus statistics, trained classifier) is
//! built once and read-only afterwards, so it can be shared across threads.

pub mod classifier;
pub mod corpus;
pub mod errors;
pub mod identify;
pub mod nlp;
pub mod pipeline;
pub mod profile;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextDigestError};
pub use types::{
    language_tag, CorpusDocument, LabeledText, Language, Sentence, SentenceScore,
    UNKNOWN_LANGUAGE,
};

// Re-export main functionality
pub use classifier::{ClassifierConfig, LanguageClassifier, TrainingReport};
pub use identify::{DistanceIdentifier, IdentifierSet, LanguageIdentifier, Strategy};
pub use nlp::{stopwords::StopwordFilter, tokenizer::Tokenizer, LanguageResources, TextAnalyzer};
pub use pipeline::{DigestConfig, DigestPipeline, DigestReport};
pub use profile::{
    DistanceMetric, FrequencyProfile, ProfileBuilder, ProfilePaths, ReferenceProfiles, SymbolKind,
};
pub use summarizer::{CorpusStatistics, ExtractiveSummarizer, SentenceSelector, SummaryScorer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
