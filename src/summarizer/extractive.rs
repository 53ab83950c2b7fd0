//! Extractive summarizer over a fixed reference corpus

use std::sync::Arc;

use tracing::debug;

use super::scorer::SummaryScorer;
use super::selector::{SentenceSelector, SummaryResult};
use super::statistics::CorpusStatistics;
use crate::errors::Result;
use crate::nlp::LanguageResources;
use crate::types::{CorpusDocument, Language};

/// Picks the highest scoring sentences of a document, verbatim and in order.
///
/// Holds read-only shared state only, so one instance can serve concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    resources: Arc<LanguageResources>,
    statistics: Arc<CorpusStatistics>,
}

impl ExtractiveSummarizer {
    pub fn new(resources: Arc<LanguageResources>, statistics: Arc<CorpusStatistics>) -> Self {
        Self {
            resources,
            statistics,
        }
    }

    /// Build corpus statistics from `documents` with the built-in resources
    pub fn from_corpus(documents: &[CorpusDocument]) -> Self {
        let resources = LanguageResources::new();
        let statistics = CorpusStatistics::build(documents, &resources);
        Self::new(Arc::new(resources), Arc::new(statistics))
    }

    pub fn statistics(&self) -> &CorpusStatistics {
        &self.statistics
    }

    pub fn resources(&self) -> &Arc<LanguageResources> {
        &self.resources
    }

    /// Summary text: up to `num_sentences` sentences joined by single spaces
    pub fn summarize(&self, document: &str, language: Language, num_sentences: usize) -> String {
        self.summarize_detailed(document, language, num_sentences)
            .text()
    }

    /// Like [`summarize`](Self::summarize), for a language tag such as `"italian"`
    pub fn summarize_tagged(
        &self,
        document: &str,
        tag: &str,
        num_sentences: usize,
    ) -> Result<String> {
        let language: Language = tag.parse()?;
        Ok(self.summarize(document, language, num_sentences))
    }

    /// Selected sentences with their scores
    pub fn summarize_detailed(
        &self,
        document: &str,
        language: Language,
        num_sentences: usize,
    ) -> SummaryResult {
        let analyzer = self.resources.analyzer(language);
        let sentences = analyzer.sentences(document);
        let scores = SummaryScorer::new(analyzer, &self.statistics).score(&sentences, document);
        let result = SentenceSelector::new()
            .with_num_sentences(num_sentences)
            .select(&sentences, &scores);

        debug!(
            %language,
            sentences = result.total_sentences,
            selected = result.sentences.len(),
            "summarized document"
        );
        result
    }
}
