//! Sentence and word segmentation
//!
//! Segmentation follows Unicode text boundaries (UAX #29). Sentence breaks
//! that fall right after a known abbreviation or inside a run of capital
//! initials are merged back, since UAX #29 has no notion of either.
//!
//! A lone initial ("А. Пушкин") is not recognized: a single capital before a
//! period only counts when another initial is right before or after it, so
//! "vitamina C. Poi" still ends a sentence.

use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Language, Sentence};

const RUSSIAN_ABBREVIATIONS: &[&str] = &[
    "г", "гг", "в", "вв", "др", "пр", "т", "е", "п", "д", "ул", "им", "см", "стр", "тыс",
    "млн", "млрд", "руб", "коп", "проф", "акад", "св", "нач", "зам", "ср", "рис", "табл",
];

const ITALIAN_ABBREVIATIONS: &[&str] = &[
    "sig", "sigg", "sigra", "dott", "dr", "prof", "ing", "avv", "arch", "geom", "rag", "ecc",
    "pag", "pagg", "cap", "art", "es", "ca", "vol", "on", "mons", "fig", "tab", "n",
];

/// Language-aware tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    language: Language,
    abbreviations: FxHashSet<&'static str>,
}

impl Tokenizer {
    /// Create a tokenizer for the given language
    pub fn new(language: Language) -> Self {
        let list = match language {
            Language::Russian => RUSSIAN_ABBREVIATIONS,
            Language::Italian => ITALIAN_ABBREVIATIONS,
        };
        Self {
            language,
            abbreviations: list.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Split text into trimmed, non-empty sentences.
    ///
    /// Offsets are byte offsets into `text`; indices are contiguous from 0.
    pub fn sentences(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut carried: Option<usize> = None;

        for (offset, segment) in text.split_sentence_bound_indices() {
            let start = carried.take().unwrap_or(offset);
            let end = offset + segment.len();

            if end < text.len()
                && self.ends_with_abbreviation(&text[start..end], &text[end..])
            {
                carried = Some(start);
                continue;
            }
            push_trimmed(&mut sentences, text, start, end);
        }

        if let Some(start) = carried {
            push_trimmed(&mut sentences, text, start, text.len());
        }

        sentences
    }

    /// Word tokens of `text`, punctuation and whitespace excluded.
    ///
    /// Words joined by a hyphen stay one token ("роман-эпопея").
    pub fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        let mut after_hyphen = false;

        for (offset, segment) in text.split_word_bound_indices() {
            let end = offset + segment.len();
            if segment.chars().any(char::is_alphanumeric) {
                match spans.last_mut() {
                    Some(span) if after_hyphen => span.1 = end,
                    _ => spans.push((offset, end)),
                }
                after_hyphen = false;
            } else {
                after_hyphen = segment == "-"
                    && !after_hyphen
                    && spans.last().is_some_and(|&(_, last_end)| last_end == offset);
            }
        }

        spans.into_iter().map(move |(start, end)| &text[start..end])
    }

    fn ends_with_abbreviation(&self, segment: &str, rest: &str) -> bool {
        let Some(body) = segment.trim_end().strip_suffix('.') else {
            return false;
        };
        let last = last_word(body);
        if is_initial(last) {
            // runs of initials, as in "А. С. Пушкин"
            let before = body[..body.len() - last.len()].trim_end();
            return before
                .strip_suffix('.')
                .is_some_and(|b| is_initial(last_word(b)))
                || starts_with_initial(rest);
        }
        !last.is_empty() && self.abbreviations.contains(last.to_lowercase().as_str())
    }
}

fn last_word(text: &str) -> &str {
    text.rsplit(|c: char| !c.is_alphabetic()).next().unwrap_or("")
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn starts_with_initial(text: &str) -> bool {
    let mut chars = text.trim_start().chars();
    matches!((chars.next(), chars.next()), (Some(c), Some('.')) if c.is_uppercase())
}

fn push_trimmed(sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let trimmed_start = start + (raw.len() - raw.trim_start().len());
    let index = sentences.len();
    sentences.push(Sentence::new(
        trimmed,
        trimmed_start,
        trimmed_start + trimmed.len(),
        index,
    ));
}
