//! Top-N sentence selection for extractive summarization
//!
//! Sentences are ranked by score, the best `num_sentences` are kept, and the
//! result is restored to document order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{Sentence, SentenceScore};

/// Default number of sentences in a summary
pub const DEFAULT_NUM_SENTENCES: usize = 10;

/// Configuration for sentence selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Number of sentences to select
    pub num_sentences: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            num_sentences: DEFAULT_NUM_SENTENCES,
        }
    }
}

/// Result of sentence selection
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    /// Selected sentences in document order
    pub sentences: Vec<SelectedSentence>,
    /// Number of sentences the document was split into
    pub total_sentences: usize,
}

impl SummaryResult {
    /// Selected sentence texts joined with single spaces
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A selected sentence with its scores
#[derive(Debug, Clone, Serialize)]
pub struct SelectedSentence {
    pub text: String,
    pub index: usize,
    pub term_weight: f64,
    pub position: f64,
    /// Rank key, `term_weight * position`
    pub score: f64,
}

/// Top-N sentence selector
#[derive(Debug, Clone, Default)]
pub struct SentenceSelector {
    config: SelectorConfig,
}

impl SentenceSelector {
    /// Create a new selector with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Set number of sentences to select
    pub fn with_num_sentences(mut self, n: usize) -> Self {
        self.config.num_sentences = n;
        self
    }

    pub fn num_sentences(&self) -> usize {
        self.config.num_sentences
    }

    /// Indices of the selected sentences, ascending.
    ///
    /// Higher scores win; equal scores go to the earlier sentence. NaN
    /// scores rank below everything else.
    pub fn select_indices(&self, scores: &[SentenceScore]) -> Vec<usize> {
        let mut ranked: Vec<&SentenceScore> = scores.iter().collect();
        ranked.sort_by(|a, b| compare_scores(a, b));

        let mut selected: Vec<usize> = ranked
            .into_iter()
            .take(self.config.num_sentences)
            .map(|s| s.index)
            .collect();
        selected.sort_unstable();
        selected
    }

    /// Select sentences; `scores` must be aligned with `sentences`.
    pub fn select(&self, sentences: &[Sentence], scores: &[SentenceScore]) -> SummaryResult {
        let chosen = self.select_indices(scores);
        let selected = sentences
            .iter()
            .zip(scores)
            .filter(|(sentence, _)| chosen.binary_search(&sentence.index).is_ok())
            .map(|(sentence, score)| SelectedSentence {
                text: sentence.text.clone(),
                index: sentence.index,
                term_weight: score.term_weight,
                position: score.position,
                score: score.value(),
            })
            .collect();

        SummaryResult {
            sentences: selected,
            total_sentences: sentences.len(),
        }
    }
}

/// NaN ranks last; -0.0 ties with 0.0
fn rank_key(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Best first, then by sentence index
fn compare_scores(a: &SentenceScore, b: &SentenceScore) -> Ordering {
    rank_key(b.value())
        .total_cmp(&rank_key(a.value()))
        .then_with(|| a.index.cmp(&b.index))
}
