//! Error types
//!
//! Degenerate inputs (empty text, sentences without terms) are not errors:
//! they resolve to neutral values at the call site. Everything here is either
//! a caller mistake or a failed one-time initialization.

use std::path::PathBuf;

use thiserror::Error;

use crate::identify::Strategy;
use crate::types::Language;

/// Result type alias for textdigest operations.
pub type Result<T> = std::result::Result<T, TextDigestError>;

/// Errors that can occur while initializing or querying the engine.
#[derive(Debug, Error)]
pub enum TextDigestError {
    /// A language tag outside the supported set.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A strategy selector that does not name any identification strategy.
    #[error("unknown identification strategy: {0}")]
    UnknownStrategy(String),

    /// The strategy exists but its reference state was never configured.
    #[error("identification strategy `{0}` is not configured")]
    StrategyUnavailable(Strategy),

    /// A reference file is missing or malformed.
    #[error("failed to load {}: {reason}", path.display())]
    ResourceLoad { path: PathBuf, reason: String },

    /// A reference profile contains unusable values.
    #[error("invalid reference profile for {language}: {reason}")]
    InvalidProfile { language: Language, reason: String },

    /// A reference or training corpus cannot be used.
    #[error("invalid corpus: {reason}")]
    InvalidCorpus { reason: String },

    /// A configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error during file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TextDigestError {
    /// Create a resource load error for `path`.
    #[must_use]
    pub fn resource_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid corpus error.
    #[must_use]
    pub fn invalid_corpus(reason: impl Into<String>) -> Self {
        Self::InvalidCorpus {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised while loading reference state.
    pub fn is_initialization_error(&self) -> bool {
        matches!(
            self,
            Self::ResourceLoad { .. }
                | Self::InvalidProfile { .. }
                | Self::InvalidCorpus { .. }
                | Self::InvalidConfig(_)
                | Self::Io(_)
                | Self::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_load_message_names_path() {
        let err = TextDigestError::resource_load("profiles/ru.json", "file not found");
        let msg = err.to_string();
        assert!(msg.contains("profiles/ru.json"));
        assert!(msg.contains("file not found"));
        assert!(err.is_initialization_error());
    }

    #[test]
    fn test_input_errors_are_not_initialization_errors() {
        let err = TextDigestError::UnsupportedLanguage("klingon".to_string());
        assert_eq!(err.to_string(), "unsupported language: klingon");
        assert!(!err.is_initialization_error());

        let err = TextDigestError::StrategyUnavailable(Strategy::NGram);
        assert_eq!(
            err.to_string(),
            "identification strategy `ngram` is not configured"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TextDigestError = io.into();
        assert!(matches!(err, TextDigestError::Io(_)));
    }
}
