//! Natural Language Processing components
//!
//! This module provides tokenization and stopword filtering, bundled per
//! language into a [`TextAnalyzer`].

pub mod stopwords;
pub mod tokenizer;

use stopwords::StopwordFilter;
use tokenizer::Tokenizer;

use crate::errors::Result;
use crate::types::{Language, Sentence};

/// Tokenizer and stopword list for one language.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
}

impl TextAnalyzer {
    /// Create an analyzer with the built-in resources for `language`
    pub fn new(language: Language) -> Self {
        Self {
            tokenizer: Tokenizer::new(language),
            stopwords: StopwordFilter::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.tokenizer.language()
    }

    /// Split `text` into sentences
    pub fn sentences(&self, text: &str) -> Vec<Sentence> {
        self.tokenizer.sentences(text)
    }

    /// Purely alphabetic, non-stopword terms of `text`, lowercased, in order.
    ///
    /// The stopword check sees the token as written, so a capitalized
    /// stopword at the start of a sentence survives as a term.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .words(text)
            .filter(|w| is_alphabetic(w) && !self.stopwords.is_stopword(w))
            .map(str::to_lowercase)
            .collect()
    }

    /// Like [`terms`](Self::terms), but lowercases before the stopword check.
    pub fn keyword_terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.tokenizer
            .words(&lowered)
            .filter(|w| is_alphabetic(w) && !self.stopwords.is_stopword(w))
            .map(str::to_string)
            .collect()
    }
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Analyzers for every supported language, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    russian: TextAnalyzer,
    italian: TextAnalyzer,
}

impl Default for LanguageResources {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageResources {
    pub fn new() -> Self {
        Self {
            russian: TextAnalyzer::new(Language::Russian),
            italian: TextAnalyzer::new(Language::Italian),
        }
    }

    /// Analyzer for a supported language
    pub fn analyzer(&self, language: Language) -> &TextAnalyzer {
        match language {
            Language::Russian => &self.russian,
            Language::Italian => &self.italian,
        }
    }

    /// Analyzer for a language tag; unsupported tags are an error.
    pub fn analyzer_for_tag(&self, tag: &str) -> Result<&TextAnalyzer> {
        let language: Language = tag.parse()?;
        Ok(self.analyzer(language))
    }
}
