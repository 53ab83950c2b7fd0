//! Stopword lookup
//!
//! Per-language stopword lists come from the `stop-words` crate. The lists
//! are lowercase and matching is exact, so "Il" is not the stopword "il".

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::types::Language;

/// Stopword set of one language
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    pub fn new(language: Language) -> Self {
        let lang = match language {
            Language::Russian => LANGUAGE::Russian,
            Language::Italian => LANGUAGE::Italian,
        };
        Self {
            stopwords: get(lang).iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Exact, case-sensitive membership
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}
