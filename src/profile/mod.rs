//! Symbol frequency profiles
//!
//! A profile maps a symbol (a character or a character n-gram) to its
//! relative frequency in a text. Profiles built from text sum to 1, or are
//! empty when the text has no eligible symbols.

pub mod builder;
pub mod distance;
pub mod reference;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use builder::{ProfileBuilder, SymbolKind, DEFAULT_NGRAM_SIZE};
pub use distance::DistanceMetric;
pub use reference::{ProfilePaths, ReferenceProfiles};

/// Normalized symbol-frequency distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyProfile {
    frequencies: FxHashMap<String, f64>,
}

impl FrequencyProfile {
    /// Normalize raw counts by their total. Zero total gives an empty profile.
    pub fn from_counts(counts: FxHashMap<String, usize>) -> Self {
        let total: usize = counts.values().sum();
        if total == 0 {
            return Self::default();
        }
        let total = total as f64;
        let frequencies = counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(symbol, count)| (symbol, count as f64 / total))
            .collect();
        Self { frequencies }
    }

    /// Wrap precomputed frequencies as-is (reference statistics).
    pub fn from_frequencies(frequencies: FxHashMap<String, f64>) -> Self {
        Self { frequencies }
    }

    /// Frequency of `symbol`, if present
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.frequencies.get(symbol).copied()
    }

    /// Frequency of `symbol`, 0 when absent
    pub fn frequency(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frequencies.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    /// Sum of all frequencies
    pub fn total(&self) -> f64 {
        self.frequencies.values().sum()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl FromIterator<(String, f64)> for FrequencyProfile {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            frequencies: iter.into_iter().collect(),
        }
    }
}
