//! Collaborator traits for the digest pipeline.
//!
//! Keyword extraction and abstractive summarization sit outside this crate.
//! The pipeline only needs the narrow interfaces below; callers plug in real
//! implementations behind trait objects.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::nlp::LanguageResources;
use crate::types::Language;

// ============================================================================
// KeywordExtractor
// ============================================================================

/// Extracts the key terms of a document.
///
/// # Contract
///
/// - **Input**: document text and its identified language.
/// - **Output**: keywords, most relevant first. The pipeline joins them
///   with `", "`.
pub trait KeywordExtractor: Send + Sync {
    fn extract_keywords(&self, text: &str, language: Language) -> Result<Vec<String>>;
}

/// Produces no keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopKeywordExtractor;

impl KeywordExtractor for NoopKeywordExtractor {
    #[inline]
    fn extract_keywords(&self, _text: &str, _language: Language) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Most frequent content terms of the document.
///
/// The text is lowercased first, then purely alphabetic non-stopword words
/// are counted. Equal counts keep first-occurrence order.
#[derive(Debug, Clone)]
pub struct TermFrequencyKeywords {
    resources: Arc<LanguageResources>,
    top_n: usize,
}

impl TermFrequencyKeywords {
    pub const DEFAULT_TOP_N: usize = 10;

    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self {
            resources,
            top_n: Self::DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

impl KeywordExtractor for TermFrequencyKeywords {
    fn extract_keywords(&self, text: &str, language: Language) -> Result<Vec<String>> {
        let terms = self.resources.analyzer(language).keyword_terms(text);

        let mut counts: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        for (position, term) in terms.iter().enumerate() {
            counts.entry(term.as_str()).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        Ok(ranked
            .into_iter()
            .take(self.top_n)
            .map(|(term, _, _)| term.to_string())
            .collect())
    }
}

// ============================================================================
// AbstractiveSummarizer
// ============================================================================

/// Generates a free-form summary of a document.
pub trait AbstractiveSummarizer: Send + Sync {
    fn summarize(&self, text: &str, language: Language) -> Result<String>;
}

/// Produces an empty summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAbstractiveSummarizer;

impl AbstractiveSummarizer for NoopAbstractiveSummarizer {
    #[inline]
    fn summarize(&self, _text: &str, _language: Language) -> Result<String> {
        Ok(String::new())
    }
}
