//! Property-based tests for frequency profiles and distance metrics.

use proptest::prelude::*;
use textdigest::identify::LanguageIdentifier;
use textdigest::profile::distance::{kullback_leibler, manhattan};
use textdigest::{DistanceIdentifier, FrequencyProfile, Language, ProfileBuilder};

/// Mixed Cyrillic/Latin text with punctuation, digits and case
fn mixed_text() -> impl Strategy<Value = String> {
    "[a-zA-Zа-яА-ЯёàèìòùÈ0-9 .,!?]{0,200}"
}

/// Normalized profile over a small symbol set
fn profile() -> impl Strategy<Value = FrequencyProfile> {
    "[a-fа-е]{1,60}".prop_map(|text| ProfileBuilder::characters().build(&text))
}

proptest! {
    /// Property: character profiles sum to 1 unless empty
    #[test]
    fn character_profile_is_normalized(text in mixed_text()) {
        let profile = ProfileBuilder::characters().build(&text);
        if profile.is_empty() {
            prop_assert!(text.to_lowercase().chars().all(|c| !textdigest::profile::builder::is_profile_symbol(c)));
        } else {
            prop_assert!((profile.total() - 1.0).abs() < 1e-9);
        }
    }

    /// Property: n-gram profiles sum to 1 unless empty
    #[test]
    fn ngram_profile_is_normalized(text in mixed_text(), n in 1usize..4) {
        let profile = ProfileBuilder::ngrams(n).build(&text);
        prop_assert!(profile.is_empty() || (profile.total() - 1.0).abs() < 1e-9);
        for symbol in profile.symbols() {
            prop_assert_eq!(symbol.chars().count(), n);
        }
    }

    /// Property: Manhattan distance is symmetric, bounded and zero on itself
    #[test]
    fn manhattan_is_symmetric(a in profile(), b in profile()) {
        let ab = manhattan(&a, &b);
        let ba = manhattan(&b, &a);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= 2.0 + 1e-9);
        prop_assert_eq!(manhattan(&a, &a), 0.0);
    }

    /// Property: Kullback-Leibler divergence of a profile from itself is zero
    #[test]
    fn kullback_leibler_self_is_zero(a in profile()) {
        prop_assert!(kullback_leibler(&a, &a).abs() < 1e-9);
    }

    /// Property: divergence from a reference that covers the query is non-negative
    #[test]
    fn kullback_leibler_non_negative(a in profile(), b in profile()) {
        let mixed: FrequencyProfile = a
            .symbols()
            .chain(b.symbols())
            .map(|s| (s.to_string(), 0.5 * a.frequency(s) + 0.5 * b.frequency(s)))
            .collect();
        prop_assert!(kullback_leibler(&a, &mixed) >= -1e-9);
    }

    /// Property: pure Cyrillic text is identified as Russian
    #[test]
    fn cyrillic_text_is_russian(text in "[а-яё]{3,80}") {
        let identifier = DistanceIdentifier::alphabet();
        prop_assert_eq!(identifier.identify(&text), Some(Language::Russian));
    }

    /// Property: Latin text over the Italian alphabet is identified as Italian
    #[test]
    fn italian_letters_are_italian(text in "[abcdefghilmnopqrstuvzàèìòù]{3,80}") {
        let identifier = DistanceIdentifier::alphabet();
        prop_assert_eq!(identifier.identify(&text), Some(Language::Italian));
    }

    /// Property: identification never fails, whatever the input
    #[test]
    fn identify_is_total(text in "\\PC{0,100}") {
        let identifier = DistanceIdentifier::alphabet();
        let _ = identifier.identify(&text);
    }
}
