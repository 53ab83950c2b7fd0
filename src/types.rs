//! Core data types shared by identification and summarization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TextDigestError;

/// Tag reported when no supported language could be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A supported document language.
///
/// The set is closed: identification is only defined over these variants.
/// [`Language::ALL`] fixes the iteration order used for tie-breaking, so on
/// exactly equal distances Russian wins over Italian.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Russian,
    Italian,
}

impl Language {
    /// Every supported language, in tie-break order.
    pub const ALL: [Language; 2] = [Language::Russian, Language::Italian];

    /// Lowercase English name, the wire form of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Russian => "russian",
            Language::Italian => "italian",
        }
    }

    /// Class index used by the trainable classifier.
    pub fn class_index(&self) -> usize {
        match self {
            Language::Russian => 0,
            Language::Italian => 1,
        }
    }

    /// Inverse of [`Language::class_index`].
    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = TextDigestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "russian" | "ru" | "rus" => Ok(Language::Russian),
            "italian" | "it" | "ita" => Ok(Language::Italian),
            _ => Err(TextDigestError::UnsupportedLanguage(value.to_string())),
        }
    }
}

/// Wire tag for an identification result, `"unknown"` when undetermined.
pub fn language_tag(language: Option<Language>) -> &'static str {
    language.map_or(UNKNOWN_LANGUAGE, |l| l.as_str())
}

/// A sentence of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Sentence text, trimmed
    pub text: String,
    /// Byte offset of the first character in the document
    pub start: usize,
    /// Byte offset one past the last character in the document
    pub end: usize,
    /// Position among the document's sentences
    pub index: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
        }
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Per-sentence scores, combined multiplicatively into the rank key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentenceScore {
    /// Index into the document's sentence sequence
    pub index: usize,
    /// Corpus-relative term weight
    pub term_weight: f64,
    /// Structural position weight
    pub position: f64,
}

impl SentenceScore {
    /// The rank key: `term_weight * position`.
    pub fn value(&self) -> f64 {
        self.term_weight * self.position
    }
}

/// A reference corpus entry: document text paired with its language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub text: String,
    pub language: Language,
}

impl CorpusDocument {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

/// A labeled sample for training the language classifier.
pub type LabeledText = CorpusDocument;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_aliases() {
        assert_eq!("russian".parse::<Language>().unwrap(), Language::Russian);
        assert_eq!("Russian".parse::<Language>().unwrap(), Language::Russian);
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Russian);
        assert_eq!(" IT ".parse::<Language>().unwrap(), Language::Italian);
        assert_eq!("italian".parse::<Language>().unwrap(), Language::Italian);
    }

    #[test]
    fn test_unsupported_language_is_an_error() {
        let err = "english".parse::<Language>().unwrap_err();
        assert!(matches!(err, TextDigestError::UnsupportedLanguage(ref s) if s == "english"));
    }

    #[test]
    fn test_class_index_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_class_index(lang.class_index()), Some(lang));
        }
        assert_eq!(Language::from_class_index(2), None);
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag(Some(Language::Italian)), "italian");
        assert_eq!(language_tag(None), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Language::Russian).unwrap();
        assert_eq!(json, "\"russian\"");
        let lang: Language = serde_json::from_str("\"italian\"").unwrap();
        assert_eq!(lang, Language::Italian);
    }

    #[test]
    fn test_sentence_char_len_counts_characters() {
        let s = Sentence::new("Это тест.", 0, "Это тест.".len(), 0);
        assert_eq!(s.char_len(), 9);
        assert!(s.text.len() > s.char_len());
    }

    #[test]
    fn test_sentence_score_value() {
        let score = SentenceScore {
            index: 0,
            term_weight: 0.5,
            position: 0.4,
        };
        assert!((score.value() - 0.2).abs() < 1e-12);
    }
}
