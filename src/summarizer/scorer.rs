//! Sentence scoring: corpus-relative term weight times position weight
//!
//! Term weight of a sentence `s` in document `d`:
//!
//! ```text
//! sum over distinct terms t of s:
//!     tf(t, s) / |s| * 0.5 * (1 + count(t, d) / max_tf(s)) * ln(N / (1 + df(t)))
//! ```
//!
//! where `count(t, d)` is the raw, case-sensitive substring count of `t` in the
//! document text. It overcounts terms that occur inside longer words.
//!
//! Position weight of sentence `i`, with `before` the characters in the
//! sentences preceding it:
//!
//! ```text
//! (1 - before / len(d)) * (1 - before / len(s_i))
//! ```
//!
//! The second factor divides by the sentence's own length, not a paragraph's,
//! so it turns negative after the first sentence.

use std::collections::BTreeMap;

use super::statistics::CorpusStatistics;
use crate::nlp::TextAnalyzer;
use crate::types::{Sentence, SentenceScore};

/// Scores the sentences of one document
#[derive(Debug, Clone, Copy)]
pub struct SummaryScorer<'a> {
    analyzer: &'a TextAnalyzer,
    statistics: &'a CorpusStatistics,
}

impl<'a> SummaryScorer<'a> {
    pub fn new(analyzer: &'a TextAnalyzer, statistics: &'a CorpusStatistics) -> Self {
        Self {
            analyzer,
            statistics,
        }
    }

    /// Term weight of `sentence` within `document`; 0 without eligible terms
    pub fn term_weight(&self, sentence: &str, document: &str) -> f64 {
        let terms = self.analyzer.terms(sentence);
        if terms.is_empty() {
            return 0.0;
        }

        let mut frequencies: BTreeMap<&str, usize> = BTreeMap::new();
        for term in &terms {
            *frequencies.entry(term.as_str()).or_insert(0) += 1;
        }
        let max_frequency = frequencies.values().copied().max().unwrap_or(1) as f64;
        let num_terms = terms.len() as f64;

        frequencies
            .iter()
            .map(|(term, &freq)| {
                let tf_local = freq as f64 / num_terms;
                let tf_document = document.matches(term).count() as f64;
                let weight =
                    0.5 * (1.0 + tf_document / max_frequency) * self.statistics.idf(term);
                tf_local * weight
            })
            .sum()
    }

    /// Score every sentence of `document`
    pub fn score(&self, sentences: &[Sentence], document: &str) -> Vec<SentenceScore> {
        sentences
            .iter()
            .zip(position_scores(sentences, document))
            .map(|(sentence, position)| SentenceScore {
                index: sentence.index,
                term_weight: self.term_weight(&sentence.text, document),
                position,
            })
            .collect()
    }
}

/// Position weight of every sentence, in order
pub fn position_scores(sentences: &[Sentence], document: &str) -> Vec<f64> {
    let total_chars = document.chars().count();
    let mut chars_before = 0;
    sentences
        .iter()
        .map(|sentence| {
            let len = sentence.char_len();
            let score = position_score(chars_before, len, total_chars);
            chars_before += len;
            score
        })
        .collect()
}

/// `(1 - before/total) * (1 - before/len)`, each factor 0 on a zero denominator
pub fn position_score(chars_before: usize, sentence_len: usize, total_chars: usize) -> f64 {
    let before = chars_before as f64;
    let in_document = if total_chars > 0 {
        1.0 - before / total_chars as f64
    } else {
        0.0
    };
    let local = if sentence_len > 0 {
        1.0 - before / sentence_len as f64
    } else {
        0.0
    };
    in_document * local
}
