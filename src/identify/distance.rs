//! Profile-distance identification (alphabet and n-gram strategies)

use tracing::debug;

use super::{closest_language, LanguageIdentifier};
use crate::profile::{DistanceMetric, ProfileBuilder, ReferenceProfiles};
use crate::types::Language;

/// Builds a query profile and returns the reference language at minimum
/// distance.
#[derive(Debug, Clone)]
pub struct DistanceIdentifier {
    builder: ProfileBuilder,
    metric: DistanceMetric,
    references: ReferenceProfiles,
}

impl DistanceIdentifier {
    pub fn new(metric: DistanceMetric, references: ReferenceProfiles) -> Self {
        Self {
            builder: references.builder(),
            metric,
            references,
        }
    }

    /// Character profile vs. built-in letter frequencies, Manhattan distance
    pub fn alphabet() -> Self {
        Self::new(DistanceMetric::Manhattan, ReferenceProfiles::alphabet())
    }

    /// N-gram profile vs. the given references, Kullback-Leibler divergence.
    ///
    /// The n-gram width is taken from the references.
    pub fn ngram(references: ReferenceProfiles) -> Self {
        Self::new(DistanceMetric::KullbackLeibler, references)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Distance from `text` to every reference, in tie-break order.
    ///
    /// Empty when `text` yields an empty profile.
    pub fn distances(&self, text: &str) -> Vec<(Language, f64)> {
        let query = self.builder.build(text);
        if query.is_empty() {
            return Vec::new();
        }
        self.references
            .iter()
            .map(|(language, reference)| (language, self.metric.distance(&query, reference)))
            .collect()
    }
}

impl LanguageIdentifier for DistanceIdentifier {
    fn identify(&self, text: &str) -> Option<Language> {
        let distances = self.distances(text);
        debug!(metric = ?self.metric, ?distances, "profile distances");
        closest_language(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FrequencyProfile;
    use crate::profile::SymbolKind;
    use crate::types::CorpusDocument;

    const RUSSIAN_TEXT: &str = "Война и мир — роман-эпопея Льва Николаевича Толстого, \
        описывающий русское общество в эпоху войн против Наполеона в 1805—1812 годах. \
        Эпилог романа доводит повествование до 1820 года. Роман принёс автору \
        мировую славу и считается одним из лучших произведений русской литературы.";

    const ITALIAN_TEXT: &str = "I promessi sposi è un celebre romanzo storico di \
        Alessandro Manzoni, ritenuto il più famoso e il più letto tra quelli scritti \
        in lingua italiana. Preceduto dal Fermo e Lucia, spesso considerato romanzo \
        a sé, fu pubblicato in una prima versione tra il 1825 e il 1827.";

    fn reference_samples() -> Vec<CorpusDocument> {
        vec![
            CorpusDocument::new(
                "Москва — столица России, город федерального значения. Население \
                 города составляет более двенадцати миллионов человек, это крупнейший \
                 по численности населения город страны и один из крупнейших городов мира.",
                Language::Russian,
            ),
            CorpusDocument::new(
                "Roma è la capitale della Repubblica Italiana e il comune più popoloso \
                 d'Italia. La città è stata fondata secondo la tradizione nel 753 a.C. \
                 e ha una storia lunga quasi tre millenni, con monumenti e opere d'arte.",
                Language::Italian,
            ),
        ]
    }

    #[test]
    fn test_alphabet_identifies_long_texts() {
        let identifier = DistanceIdentifier::alphabet();
        assert_eq!(identifier.identify(RUSSIAN_TEXT), Some(Language::Russian));
        assert_eq!(identifier.identify(ITALIAN_TEXT), Some(Language::Italian));
    }

    #[test]
    fn test_ngram_identifies_long_texts() {
        let refs =
            ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &reference_samples())
                .unwrap();
        let identifier = DistanceIdentifier::ngram(refs);
        assert_eq!(identifier.metric(), DistanceMetric::KullbackLeibler);
        assert_eq!(identifier.identify(RUSSIAN_TEXT), Some(Language::Russian));
        assert_eq!(identifier.identify(ITALIAN_TEXT), Some(Language::Italian));
    }

    #[test]
    fn test_empty_and_symbol_free_text_is_unknown() {
        let identifier = DistanceIdentifier::alphabet();
        assert_eq!(identifier.identify(""), None);
        assert_eq!(identifier.identify("12345 !!! ???"), None);
        assert!(identifier.distances("").is_empty());

        let refs =
            ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &reference_samples())
                .unwrap();
        let identifier = DistanceIdentifier::ngram(refs);
        // a single eligible character has no bigrams
        assert_eq!(identifier.identify("a"), None);
    }

    #[test]
    fn test_distances_follow_reference_order() {
        let identifier = DistanceIdentifier::alphabet();
        let distances = identifier.distances(ITALIAN_TEXT);
        let order: Vec<_> = distances.iter().map(|(l, _)| *l).collect();
        assert_eq!(order, Language::ALL.to_vec());
        assert!(distances[1].1 < distances[0].1);
    }

    #[test]
    fn test_equal_distances_resolve_to_russian() {
        let profile: FrequencyProfile = [("a".to_string(), 1.0)].into_iter().collect();
        let refs = ReferenceProfiles::from_profiles(
            SymbolKind::Character,
            vec![
                (Language::Italian, profile.clone()),
                (Language::Russian, profile),
            ],
        )
        .unwrap();
        let identifier = DistanceIdentifier::new(DistanceMetric::Manhattan, refs);
        assert_eq!(identifier.identify("b"), Some(Language::Russian));
    }

    #[test]
    fn test_identification_is_repeatable() {
        let identifier = DistanceIdentifier::alphabet();
        let first = identifier.distances(RUSSIAN_TEXT);
        for _ in 0..3 {
            assert_eq!(identifier.distances(RUSSIAN_TEXT), first);
        }
    }
}
