//! Language identification
//!
//! Three interchangeable strategies share the [`LanguageIdentifier`]
//! contract:
//! - Alphabet: character profile vs. built-in letter frequencies (Manhattan)
//! - NGram: bigram profile vs. persisted reference profiles (Kullback-Leibler)
//! - Neural: a [`LanguageClassifier`] trained on a labeled corpus
//!
//! [`IdentifierSet`] owns the configured strategies and dispatches on a
//! [`Strategy`] chosen by the caller.

pub mod distance;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use distance::DistanceIdentifier;

use crate::classifier::LanguageClassifier;
use crate::errors::{Result, TextDigestError};
use crate::profile::ReferenceProfiles;
use crate::types::Language;

/// Resolves the language of a text.
///
/// `None` is the "unknown" outcome: empty input, input without recognizable
/// symbols, or a classifier output with no mapped language.
pub trait LanguageIdentifier: Send + Sync {
    fn identify(&self, text: &str) -> Option<Language>;
}

/// Identification strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Alphabet,
    #[serde(rename = "ngram")]
    NGram,
    Neural,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Alphabet, Strategy::NGram, Strategy::Neural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Alphabet => "alphabet",
            Strategy::NGram => "ngram",
            Strategy::Neural => "neural",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = TextDigestError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "alphabet" | "alphabetic" | "letters" => Ok(Strategy::Alphabet),
            "ngram" | "n_gram" | "n-gram" | "ngrams" => Ok(Strategy::NGram),
            "neural" | "classifier" | "nn" => Ok(Strategy::Neural),
            _ => Err(TextDigestError::UnknownStrategy(value.to_string())),
        }
    }
}

/// The language with the smallest distance.
///
/// Candidates are scanned in the given order and only a strictly smaller
/// distance replaces the current best, so exact ties go to the earliest
/// candidate. NaN distances never win.
pub fn closest_language(distances: impl IntoIterator<Item = (Language, f64)>) -> Option<Language> {
    let mut best: Option<(Language, f64)> = None;
    for (language, d) in distances {
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((language, d)),
        }
    }
    best.map(|(language, _)| language)
}

/// The configured strategies, frozen after construction.
pub struct IdentifierSet {
    alphabet: DistanceIdentifier,
    ngram: Option<DistanceIdentifier>,
    neural: Option<Arc<LanguageClassifier>>,
}

impl Default for IdentifierSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierSet {
    /// Only the alphabet strategy, which needs no external state
    pub fn new() -> Self {
        Self {
            alphabet: DistanceIdentifier::alphabet(),
            ngram: None,
            neural: None,
        }
    }

    /// Enable the n-gram strategy with loaded reference profiles
    pub fn with_ngram_profiles(mut self, references: ReferenceProfiles) -> Self {
        self.ngram = Some(DistanceIdentifier::ngram(references));
        self
    }

    /// Enable the neural strategy with a trained classifier
    pub fn with_classifier(mut self, classifier: Arc<LanguageClassifier>) -> Self {
        self.neural = Some(classifier);
        self
    }

    pub fn is_available(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::Alphabet => true,
            Strategy::NGram => self.ngram.is_some(),
            Strategy::Neural => self.neural.is_some(),
        }
    }

    /// The identifier behind `strategy`
    pub fn get(&self, strategy: Strategy) -> Result<&dyn LanguageIdentifier> {
        let identifier: Option<&dyn LanguageIdentifier> = match strategy {
            Strategy::Alphabet => Some(&self.alphabet),
            Strategy::NGram => self.ngram.as_ref().map(|i| i as &dyn LanguageIdentifier),
            Strategy::Neural => self
                .neural
                .as_deref()
                .map(|c| c as &dyn LanguageIdentifier),
        };
        identifier.ok_or(TextDigestError::StrategyUnavailable(strategy))
    }

    /// Identify `text` with the selected strategy
    pub fn identify(&self, strategy: Strategy, text: &str) -> Result<Option<Language>> {
        Ok(self.get(strategy)?.identify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileBuilder;
    use crate::types::CorpusDocument;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("alphabet".parse::<Strategy>().unwrap(), Strategy::Alphabet);
        assert_eq!("N-Gram".parse::<Strategy>().unwrap(), Strategy::NGram);
        assert_eq!("neural".parse::<Strategy>().unwrap(), Strategy::Neural);
        assert!(matches!(
            "markov".parse::<Strategy>(),
            Err(TextDigestError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_serde_names() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.as_str()));
        }
    }

    #[test]
    fn test_closest_language_picks_minimum() {
        let best = closest_language([(Language::Russian, 0.8), (Language::Italian, 0.3)]);
        assert_eq!(best, Some(Language::Italian));
    }

    #[test]
    fn test_closest_language_tie_goes_to_first() {
        let best = closest_language([(Language::Russian, 0.5), (Language::Italian, 0.5)]);
        assert_eq!(best, Some(Language::Russian));

        let best = closest_language([(Language::Italian, 0.5), (Language::Russian, 0.5)]);
        assert_eq!(best, Some(Language::Italian));
    }

    #[test]
    fn test_closest_language_ignores_nan() {
        let best = closest_language([(Language::Russian, f64::NAN), (Language::Italian, 2.0)]);
        assert_eq!(best, Some(Language::Italian));
        assert_eq!(closest_language([(Language::Russian, f64::NAN)]), None);
        assert_eq!(closest_language([]), None);
    }

    #[test]
    fn test_unconfigured_strategies_are_errors() {
        let set = IdentifierSet::new();
        assert!(set.is_available(Strategy::Alphabet));
        assert!(matches!(
            set.identify(Strategy::NGram, "ciao"),
            Err(TextDigestError::StrategyUnavailable(Strategy::NGram))
        ));
        assert!(matches!(
            set.identify(Strategy::Neural, "ciao"),
            Err(TextDigestError::StrategyUnavailable(Strategy::Neural))
        ));
    }

    #[test]
    fn test_dispatch_is_uniform() {
        let samples = vec![
            CorpusDocument::new("Москва является столицей России и крупнейшим городом страны", Language::Russian),
            CorpusDocument::new("Roma è la capitale d'Italia e la città più popolosa del paese", Language::Italian),
        ];
        let refs = ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &samples).unwrap();
        let set = IdentifierSet::new().with_ngram_profiles(refs);

        for strategy in [Strategy::Alphabet, Strategy::NGram] {
            assert_eq!(
                set.identify(strategy, "Столица России — город Москва").unwrap(),
                Some(Language::Russian)
            );
            assert_eq!(
                set.identify(strategy, "La capitale d'Italia è Roma").unwrap(),
                Some(Language::Italian)
            );
            assert_eq!(set.identify(strategy, "").unwrap(), None);
        }
    }
}
