//! Profile construction from raw text
//!
//! Text is lowercased and reduced to the Latin and Cyrillic base alphabets,
//! the Italian accented vowels (à è ì ò ù) and Cyrillic ё. Everything else,
//! including whitespace, is discarded before counting, so n-grams may span
//! word boundaries.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::FrequencyProfile;

/// N-gram width used by the n-gram strategy
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Whether `c` (already lowercased) takes part in profiles
pub fn is_profile_symbol(c: char) -> bool {
    matches!(c, 'a'..='z' | 'а'..='я' | 'ё' | 'à' | 'è' | 'ì' | 'ò' | 'ù')
}

/// Lowercase `text` and keep only profile symbols
pub fn filter_symbols(text: &str) -> Vec<char> {
    text.to_lowercase()
        .chars()
        .filter(|&c| is_profile_symbol(c))
        .collect()
}

/// Unit of counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Single characters
    Character,
    /// Overlapping character windows of the given width, stride 1
    NGram(usize),
}

impl SymbolKind {
    /// Number of characters per symbol
    pub fn width(&self) -> usize {
        match self {
            SymbolKind::Character => 1,
            SymbolKind::NGram(n) => *n,
        }
    }
}

/// Builds [`FrequencyProfile`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBuilder {
    kind: SymbolKind,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::characters()
    }
}

impl ProfileBuilder {
    pub fn new(kind: SymbolKind) -> Self {
        Self { kind }
    }

    /// Character-level profiles
    pub fn characters() -> Self {
        Self::new(SymbolKind::Character)
    }

    /// N-gram profiles of width `n`
    pub fn ngrams(n: usize) -> Self {
        Self::new(SymbolKind::NGram(n))
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Build the profile of `text`.
    ///
    /// Empty when `text` has no eligible symbols, or fewer than `n` of them
    /// for n-grams.
    pub fn build(&self, text: &str) -> FrequencyProfile {
        let mut counts = FxHashMap::default();
        self.count_into(text, &mut counts);
        FrequencyProfile::from_counts(counts)
    }

    /// Add the symbol counts of `text` to `counts`
    pub fn count_into(&self, text: &str, counts: &mut FxHashMap<String, usize>) {
        let symbols = filter_symbols(text);
        match self.kind {
            SymbolKind::Character => {
                for c in symbols {
                    *counts.entry(c.to_string()).or_insert(0) += 1;
                }
            }
            SymbolKind::NGram(0) => {}
            SymbolKind::NGram(n) => {
                for window in symbols.windows(n) {
                    *counts.entry(window.iter().collect()).or_insert(0) += 1;
                }
            }
        }
    }
}
