//! Loaders for the reference corpus and labeled training samples
//!
//! The reference corpus is a JSON manifest listing document files:
//!
//! ```json
//! [{ "text_file": "texts/ru_01.txt", "language": "russian" }]
//! ```
//!
//! Relative paths resolve against the manifest's directory. Training samples
//! are inline: `[{ "text": "...", "language": "Italian" }]`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::{Result, TextDigestError};
use crate::types::{CorpusDocument, Language, LabeledText};

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    text_file: PathBuf,
    language: String,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    text: String,
    language: String,
}

/// Load every document named by the manifest at `path`.
///
/// Any unreadable file or unsupported language tag fails the whole load.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<CorpusDocument>> {
    let path = path.as_ref();
    let entries: Vec<ManifestEntry> = read_json(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let documents = entries
        .into_iter()
        .map(|entry| {
            let language: Language = entry.language.parse().map_err(|_| {
                TextDigestError::resource_load(
                    path,
                    format!("unsupported language `{}`", entry.language),
                )
            })?;
            let file = if entry.text_file.is_absolute() {
                entry.text_file
            } else {
                base.join(&entry.text_file)
            };
            let text = fs::read_to_string(&file)
                .map_err(|e| TextDigestError::resource_load(&file, e.to_string()))?;
            Ok(CorpusDocument::new(text, language))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(path = %path.display(), documents = documents.len(), "loaded reference corpus");
    Ok(documents)
}

/// Load labeled samples from the JSON file at `path`.
///
/// Samples whose label is not a supported language are dropped.
pub fn load_labeled_samples(path: impl AsRef<Path>) -> Result<Vec<LabeledText>> {
    let path = path.as_ref();
    let raw: Vec<RawSample> = read_json(path)?;
    let samples = labeled_samples(raw.into_iter().map(|s| (s.text, s.language)));
    info!(path = %path.display(), samples = samples.len(), "loaded labeled samples");
    Ok(samples)
}

/// Pair texts with parsed labels, dropping unrecognized labels.
pub fn labeled_samples(
    rows: impl IntoIterator<Item = (String, String)>,
) -> Vec<LabeledText> {
    let mut dropped = 0usize;
    let samples: Vec<LabeledText> = rows
        .into_iter()
        .filter_map(|(text, label)| match label.parse::<Language>() {
            Ok(language) => Some(LabeledText::new(text, language)),
            Err(_) => {
                dropped += 1;
                None
            }
        })
        .collect();
    if dropped > 0 {
        warn!(dropped, "dropped samples with unsupported labels");
    }
    samples
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| TextDigestError::resource_load(path, e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| TextDigestError::resource_load(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_documents_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        write(&dir, "texts/ru.txt", "Кошка спит.");
        let absolute = write(&dir, "it.txt", "Il gatto dorme.");
        let manifest = write(
            &dir,
            "manifest.json",
            &serde_json::json!([
                { "text_file": "texts/ru.txt", "language": "russian" },
                { "text_file": absolute, "language": "Italian" }
            ])
            .to_string(),
        );

        let docs = load_documents(&manifest).unwrap();
        assert_eq!(
            docs,
            vec![
                CorpusDocument::new("Кошка спит.", Language::Russian),
                CorpusDocument::new("Il gatto dorme.", Language::Italian),
            ]
        );
    }

    #[test]
    fn test_load_documents_failures() {
        let dir = TempDir::new().unwrap();

        let missing = load_documents(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(TextDigestError::ResourceLoad { .. })));

        let malformed = write(&dir, "bad.json", "{ not json");
        assert!(matches!(
            load_documents(&malformed),
            Err(TextDigestError::ResourceLoad { .. })
        ));

        let missing_text = write(
            &dir,
            "m1.json",
            r#"[{ "text_file": "absent.txt", "language": "russian" }]"#,
        );
        let err = load_documents(&missing_text).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));

        write(&dir, "de.txt", "Der Hund.");
        let german = write(&dir, "m2.json", r#"[{ "text_file": "de.txt", "language": "german" }]"#);
        let err = load_documents(&german).unwrap_err();
        assert!(err.is_initialization_error());
        assert!(err.to_string().contains("german"));
    }

    #[test]
    fn test_load_labeled_samples_drops_unknown_labels() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "samples.json",
            r#"[
                { "text": "Привет", "language": "Russian" },
                { "text": "Ciao", "language": "it" },
                { "text": "Hallo", "language": "German" }
            ]"#,
        );

        let samples = load_labeled_samples(&path).unwrap();
        assert_eq!(
            samples,
            vec![
                LabeledText::new("Привет", Language::Russian),
                LabeledText::new("Ciao", Language::Italian),
            ]
        );
    }

    #[test]
    fn test_labeled_samples_from_rows() {
        let rows = vec![
            ("uno".to_string(), "ITALIAN".to_string()),
            ("x".to_string(), "".to_string()),
        ];
        let samples = labeled_samples(rows);
        assert_eq!(samples, vec![LabeledText::new("uno", Language::Italian)]);
    }
}
