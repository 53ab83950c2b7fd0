//! Digest configuration.
//!
//! Every field has a default, so `{}` is a valid configuration. Paths are
//! optional: a strategy or corpus without one is simply not set up.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "strategy": "ngram",
//!   "num_sentences": 5,
//!   "ngram_size": 2,
//!   "ngram_profiles": {
//!     "russian": "profiles/russian_language_profile.json",
//!     "italian": "profiles/italian_language_profile.json"
//!   },
//!   "corpus_manifest": "corpus/manifest.json",
//!   "classifier_corpus": "corpus/labeled.json",
//!   "classifier": { "epochs": 10, "seed": 42 }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::ClassifierConfig;
use crate::errors::{Result, TextDigestError};
use crate::identify::Strategy;
use crate::profile::{ProfilePaths, DEFAULT_NGRAM_SIZE};
use crate::summarizer::DEFAULT_NUM_SENTENCES;

/// Top-level configuration of a [`DigestPipeline`](super::DigestPipeline)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Identification strategy used by `run`
    pub strategy: Strategy,

    /// Sentences in the extractive summary
    pub num_sentences: usize,

    /// Width of the n-grams in the n-gram reference profiles
    pub ngram_size: usize,

    /// Reference profiles for the n-gram strategy
    pub ngram_profiles: Option<ProfilePaths>,

    /// Reference corpus manifest for the summarizer's document frequencies
    pub corpus_manifest: Option<PathBuf>,

    /// Labeled samples for training the neural strategy
    pub classifier_corpus: Option<PathBuf>,

    pub classifier: ClassifierConfig,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten, skip_serializing_if = "HashMap::is_empty")]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            num_sentences: DEFAULT_NUM_SENTENCES,
            ngram_size: DEFAULT_NGRAM_SIZE,
            ngram_profiles: None,
            corpus_manifest: None,
            classifier_corpus: None,
            classifier: ClassifierConfig::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

impl DigestConfig {
    /// Parse and validate; unknown fields are logged and ignored.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.warn_unknown_fields();
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| TextDigestError::resource_load(path, e.to_string()))?;
        Self::from_json_str(&json)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_num_sentences(mut self, num_sentences: usize) -> Self {
        self.num_sentences = num_sentences;
        self
    }

    pub fn with_ngram_size(mut self, ngram_size: usize) -> Self {
        self.ngram_size = ngram_size;
        self
    }

    pub fn with_ngram_profiles(mut self, paths: ProfilePaths) -> Self {
        self.ngram_profiles = Some(paths);
        self
    }

    pub fn with_corpus_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_manifest = Some(path.into());
        self
    }

    pub fn with_classifier_corpus(mut self, path: impl Into<PathBuf>) -> Self {
        self.classifier_corpus = Some(path.into());
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(TextDigestError::InvalidConfig(
                "ngram_size must be positive".to_string(),
            ));
        }
        self.classifier.validate()
    }

    fn warn_unknown_fields(&self) {
        let mut keys: Vec<&String> = self.unknown_fields.keys().collect();
        keys.sort();
        for key in keys {
            warn!(field = %key, "ignoring unknown configuration field");
        }
    }
}
