//! Bag-of-words vectorization
//!
//! Tokens are lowercased runs of word characters (alphanumerics and `_`) at
//! least two characters long. The vocabulary is sorted, so term indices do
//! not depend on corpus order.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

/// Sparse count vector: `(term index, count)` pairs sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Term-count vectorizer with a fitted vocabulary
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    vocabulary: FxHashMap<String, usize>,
}

impl CountVectorizer {
    /// Fit the vocabulary on `texts`
    pub fn fit<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let terms: BTreeSet<String> = texts.into_iter().flat_map(tokenize).collect();
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();
        Self { vocabulary }
    }

    /// Count vector of `text`; terms outside the vocabulary are ignored
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        let mut vector: SparseVector = counts.into_iter().collect();
        vector.sort_unstable_by_key(|(index, _)| *index);
        vector
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Lowercased word tokens of `text`
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_lowercase)
}
