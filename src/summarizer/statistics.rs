//! Corpus-wide document frequencies
//!
//! Built once from the reference collection and read-only afterwards.

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use crate::errors::{Result, TextDigestError};
use crate::nlp::LanguageResources;
use crate::types::{CorpusDocument, Language};

/// Document counts per term over a reference corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    document_count: usize,
    document_frequency: FxHashMap<String, usize>,
}

impl CorpusStatistics {
    /// Count, for every term, the documents that contain it at least once.
    ///
    /// Each document is analyzed with its own language's resources.
    pub fn build(documents: &[CorpusDocument], resources: &LanguageResources) -> Self {
        let document_frequency = documents
            .par_iter()
            .map(|doc| {
                resources
                    .analyzer(doc.language)
                    .terms(&doc.text)
                    .into_iter()
                    .collect::<FxHashSet<String>>()
            })
            .fold(FxHashMap::default, |mut acc: FxHashMap<String, usize>, terms| {
                for term in terms {
                    *acc.entry(term).or_insert(0) += 1;
                }
                acc
            })
            .reduce(FxHashMap::default, |mut a, b| {
                for (term, count) in b {
                    *a.entry(term).or_insert(0) += count;
                }
                a
            });

        info!(
            documents = documents.len(),
            terms = document_frequency.len(),
            "built corpus statistics"
        );

        Self {
            document_count: documents.len(),
            document_frequency,
        }
    }

    /// Build from parallel text and language lists, which must be the same length.
    pub fn from_parallel(
        texts: &[String],
        languages: &[Language],
        resources: &LanguageResources,
    ) -> Result<Self> {
        if texts.len() != languages.len() {
            return Err(TextDigestError::invalid_corpus(format!(
                "{} documents but {} languages",
                texts.len(),
                languages.len()
            )));
        }
        let documents: Vec<CorpusDocument> = texts
            .iter()
            .zip(languages)
            .map(|(text, language)| CorpusDocument::new(text.clone(), *language))
            .collect();
        Ok(Self::build(&documents, resources))
    }

    /// Number of documents in the corpus
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of documents containing `term`, 0 for unseen terms
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// `ln(N / (1 + df))`; 0 for an empty corpus.
    ///
    /// Negative when a term occurs in every document.
    pub fn idf(&self, term: &str) -> f64 {
        if self.document_count == 0 {
            return 0.0;
        }
        (self.document_count as f64 / (1 + self.document_frequency(term)) as f64).ln()
    }
}
