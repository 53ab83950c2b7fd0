//! Reference profiles for the supported languages
//!
//! Alphabet profiles are hand-tuned letter frequencies compiled into the
//! crate. N-gram profiles are persisted as one JSON object per language
//! (`{"symbol": frequency, ...}`) and loaded once at startup; they can also be
//! generated from sample texts and saved in the same format.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::builder::{ProfileBuilder, SymbolKind};
use super::FrequencyProfile;
use crate::errors::{Result, TextDigestError};
use crate::types::{CorpusDocument, Language};

const RUSSIAN_LETTERS: &[(char, f64)] = &[
    ('а', 0.0817),
    ('б', 0.0159),
    ('в', 0.0453),
    ('г', 0.0170),
    ('д', 0.0356),
    ('е', 0.0843),
    ('ё', 0.0020),
    ('ж', 0.0054),
    ('з', 0.0135),
    ('и', 0.0709),
    ('й', 0.0150),
    ('к', 0.0350),
    ('л', 0.0426),
    ('м', 0.0294),
    ('н', 0.0670),
    ('о', 0.1095),
    ('п', 0.0271),
    ('р', 0.0422),
    ('с', 0.0544),
    ('т', 0.0657),
    ('у', 0.0231),
    ('ф', 0.0022),
    ('х', 0.0060),
    ('ц', 0.0047),
    ('ч', 0.0156),
    ('ш', 0.0069),
    ('щ', 0.0016),
    ('ъ', 0.0007),
    ('ы', 0.0193),
    ('ь', 0.0185),
    ('э', 0.0123),
    ('ю', 0.0077),
    ('я', 0.0202),
];

const ITALIAN_LETTERS: &[(char, f64)] = &[
    ('e', 0.1177),
    ('a', 0.1172),
    ('i', 0.1012),
    ('o', 0.0983),
    ('n', 0.0688),
    ('r', 0.0635),
    ('t', 0.0561),
    ('l', 0.0560),
    ('s', 0.0496),
    ('c', 0.0450),
    ('d', 0.0373),
    ('p', 0.0305),
    ('u', 0.0301),
    ('m', 0.0251),
    ('g', 0.0164),
    ('v', 0.0163),
    ('b', 0.0092),
    ('z', 0.0049),
    ('f', 0.0095),
    ('q', 0.0051),
    ('h', 0.0049),
    ('x', 0.0000),
    ('j', 0.0000),
    ('k', 0.0000),
    ('w', 0.0000),
    ('y', 0.0000),
    ('à', 0.0110),
    ('è', 0.0105),
    ('é', 0.0019),
    ('ì', 0.0053),
    ('ò', 0.0065),
    ('ù', 0.0021),
];

/// Locations of the persisted per-language profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePaths {
    pub russian: PathBuf,
    pub italian: PathBuf,
}

impl ProfilePaths {
    /// Conventional file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            russian: dir.join("russian_language_profile.json"),
            italian: dir.join("italian_language_profile.json"),
        }
    }

    pub fn get(&self, language: Language) -> &Path {
        match language {
            Language::Russian => &self.russian,
            Language::Italian => &self.italian,
        }
    }
}

/// One read-only profile per supported language, in [`Language::ALL`] order.
#[derive(Debug, Clone)]
pub struct ReferenceProfiles {
    kind: SymbolKind,
    profiles: Vec<(Language, FrequencyProfile)>,
}

impl ReferenceProfiles {
    /// Built-in letter frequencies
    pub fn alphabet() -> Self {
        let table = |letters: &[(char, f64)]| -> FrequencyProfile {
            letters.iter().map(|(c, f)| (c.to_string(), *f)).collect()
        };
        Self {
            kind: SymbolKind::Character,
            profiles: Language::ALL
                .iter()
                .map(|&lang| {
                    let letters = match lang {
                        Language::Russian => RUSSIAN_LETTERS,
                        Language::Italian => ITALIAN_LETTERS,
                    };
                    (lang, table(letters))
                })
                .collect(),
        }
    }

    /// Validate and order externally supplied profiles.
    ///
    /// Every supported language must appear exactly once with a non-empty
    /// profile of finite, non-negative frequencies whose symbols match `kind`.
    pub fn from_profiles(
        kind: SymbolKind,
        profiles: impl IntoIterator<Item = (Language, FrequencyProfile)>,
    ) -> Result<Self> {
        let mut by_language: FxHashMap<Language, FrequencyProfile> = FxHashMap::default();
        for (language, profile) in profiles {
            validate_profile(kind, language, &profile)?;
            if by_language.insert(language, profile).is_some() {
                return Err(TextDigestError::InvalidProfile {
                    language,
                    reason: "profile supplied more than once".to_string(),
                });
            }
        }

        let mut ordered = Vec::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let profile = by_language
                .remove(&language)
                .ok_or_else(|| TextDigestError::InvalidProfile {
                    language,
                    reason: "profile missing".to_string(),
                })?;
            ordered.push((language, profile));
        }

        Ok(Self {
            kind,
            profiles: ordered,
        })
    }

    /// Aggregate symbol counts over labeled sample texts, per language.
    pub fn from_samples(builder: ProfileBuilder, samples: &[CorpusDocument]) -> Result<Self> {
        let mut counts: FxHashMap<Language, FxHashMap<String, usize>> = FxHashMap::default();
        for sample in samples {
            builder.count_into(&sample.text, counts.entry(sample.language).or_default());
        }

        let profiles = Language::ALL.iter().map(|&language| {
            let profile = counts
                .remove(&language)
                .map(FrequencyProfile::from_counts)
                .unwrap_or_default();
            (language, profile)
        });
        Self::from_profiles(builder.kind(), profiles)
    }

    /// Load one JSON profile per language. Any missing or malformed file fails
    /// the whole load.
    pub fn load_json(kind: SymbolKind, paths: &ProfilePaths) -> Result<Self> {
        let mut loaded = Vec::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let path = paths.get(language);
            let profile = read_profile(path)?;
            validate_profile(kind, language, &profile)
                .map_err(|e| TextDigestError::resource_load(path, e.to_string()))?;
            info!(
                language = %language,
                path = %path.display(),
                symbols = profile.len(),
                "loaded reference profile"
            );
            loaded.push((language, profile));
        }
        Self::from_profiles(kind, loaded)
    }

    /// Persist every profile as JSON
    pub fn save_json(&self, paths: &ProfilePaths) -> Result<()> {
        for (language, profile) in &self.profiles {
            let path = paths.get(*language);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string(profile)?)?;
        }
        Ok(())
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// A builder producing query profiles comparable with these references
    pub fn builder(&self) -> ProfileBuilder {
        ProfileBuilder::new(self.kind)
    }

    pub fn get(&self, language: Language) -> Option<&FrequencyProfile> {
        self.profiles
            .iter()
            .find(|(l, _)| *l == language)
            .map(|(_, p)| p)
    }

    /// Profiles in tie-break order
    pub fn iter(&self) -> impl Iterator<Item = (Language, &FrequencyProfile)> {
        self.profiles.iter().map(|(l, p)| (*l, p))
    }
}

fn read_profile(path: &Path) -> Result<FrequencyProfile> {
    let raw = fs::read_to_string(path)
        .map_err(|e| TextDigestError::resource_load(path, e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| TextDigestError::resource_load(path, e.to_string()))
}

fn validate_profile(kind: SymbolKind, language: Language, profile: &FrequencyProfile) -> Result<()> {
    let invalid = |reason: String| TextDigestError::InvalidProfile { language, reason };

    if profile.is_empty() {
        return Err(invalid("profile is empty".to_string()));
    }
    for (symbol, frequency) in profile.iter() {
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(invalid(format!("bad frequency {frequency} for `{symbol}`")));
        }
        if symbol.chars().count() != kind.width() {
            return Err(invalid(format!(
                "symbol `{symbol}` is not {} character(s) wide",
                kind.width()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<CorpusDocument> {
        vec![
            CorpusDocument::new("мама мыла раму", Language::Russian),
            CorpusDocument::new("la mamma lava", Language::Italian),
        ]
    }

    #[test]
    fn test_alphabet_profiles() {
        let refs = ReferenceProfiles::alphabet();
        assert_eq!(refs.kind(), SymbolKind::Character);

        let order: Vec<_> = refs.iter().map(|(l, _)| l).collect();
        assert_eq!(order, Language::ALL.to_vec());

        let russian = refs.get(Language::Russian).unwrap();
        assert_eq!(russian.len(), 33);
        assert!((russian.frequency("о") - 0.1095).abs() < 1e-12);

        let italian = refs.get(Language::Italian).unwrap();
        assert!((italian.frequency("e") - 0.1177).abs() < 1e-12);
        assert_eq!(italian.frequency("x"), 0.0);
    }

    #[test]
    fn test_from_samples_builds_every_language() {
        let refs = ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &samples()).unwrap();

        assert_eq!(refs.kind(), SymbolKind::NGram(2));
        let russian = refs.get(Language::Russian).unwrap();
        assert!(russian.get("ма").is_some());
        assert!((russian.total() - 1.0).abs() < 1e-9);
        assert!(refs.get(Language::Italian).unwrap().get("ma").is_some());
    }

    #[test]
    fn test_missing_language_is_rejected() {
        let only_russian = vec![CorpusDocument::new("мама мыла раму", Language::Russian)];
        let err = ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &only_russian)
            .unwrap_err();
        assert!(matches!(
            err,
            TextDigestError::InvalidProfile {
                language: Language::Italian,
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_symbol_width_is_rejected() {
        let bad: FrequencyProfile = [("abc".to_string(), 1.0)].into_iter().collect();
        let good: FrequencyProfile = [("ab".to_string(), 1.0)].into_iter().collect();
        let result = ReferenceProfiles::from_profiles(
            SymbolKind::NGram(2),
            vec![(Language::Russian, bad), (Language::Italian, good)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_frequency_is_rejected() {
        let bad: FrequencyProfile = [("ab".to_string(), -0.5)].into_iter().collect();
        let good: FrequencyProfile = [("ab".to_string(), 1.0)].into_iter().collect();
        let result = ReferenceProfiles::from_profiles(
            SymbolKind::NGram(2),
            vec![(Language::Russian, good), (Language::Italian, bad)],
        );
        assert!(matches!(result, Err(TextDigestError::InvalidProfile { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProfilePaths::in_dir(dir.path().join("profiles"));

        let refs = ReferenceProfiles::from_samples(ProfileBuilder::ngrams(2), &samples()).unwrap();
        refs.save_json(&paths).unwrap();
        assert!(paths.russian.ends_with("russian_language_profile.json"));

        let loaded = ReferenceProfiles::load_json(SymbolKind::NGram(2), &paths).unwrap();
        for language in Language::ALL {
            let a = refs.get(language).unwrap();
            let b = loaded.get(language).unwrap();
            assert_eq!(a.len(), b.len());
            for (symbol, freq) in a.iter() {
                assert!((b.frequency(symbol) - freq).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProfilePaths::in_dir(dir.path());
        let err = ReferenceProfiles::load_json(SymbolKind::NGram(2), &paths).unwrap_err();
        assert!(matches!(err, TextDigestError::ResourceLoad { .. }));
    }

    #[test]
    fn test_malformed_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProfilePaths::in_dir(dir.path());
        fs::write(&paths.russian, r#"{"ма": 0.5}"#).unwrap();
        fs::write(&paths.italian, "not json").unwrap();

        let err = ReferenceProfiles::load_json(SymbolKind::NGram(2), &paths).unwrap_err();
        match err {
            TextDigestError::ResourceLoad { path, .. } => assert_eq!(path, paths.italian),
            other => panic!("unexpected error: {other}"),
        }
    }
}
