//! Pipeline runner: identification followed by the three summaries.
//!
//! [`DigestPipeline::run`] executes the stages in order, timing each one and
//! notifying an optional [`PipelineObserver`] at every boundary:
//!
//! 1. Identify the document language (`extraction_time`)
//! 2. Extract keywords (`keywords_time`)
//! 3. Extractive summary (`classic_time`)
//! 4. Abstractive summary (`neural_time`)
//!
//! When no language can be determined the summary stages are skipped and the
//! report carries the `"unknown"` tag with empty summaries.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::LanguageClassifier;
use crate::corpus;
use crate::errors::{Result, TextDigestError};
use crate::identify::{IdentifierSet, Strategy};
use crate::nlp::LanguageResources;
use crate::pipeline::config::DigestConfig;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, STAGE_CLASSIC, STAGE_IDENTIFY, STAGE_KEYWORDS,
    STAGE_NEURAL,
};
use crate::pipeline::traits::{
    AbstractiveSummarizer, KeywordExtractor, NoopAbstractiveSummarizer, TermFrequencyKeywords,
};
use crate::profile::{ReferenceProfiles, SymbolKind};
use crate::summarizer::{CorpusStatistics, ExtractiveSummarizer, DEFAULT_NUM_SENTENCES};
use crate::types::{language_tag, Language};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("digest_stage", stage = $name).entered();
    };
}

/// Wall-clock seconds spent in each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageTimes {
    pub extraction_time: f64,
    pub keywords_time: f64,
    pub classic_time: f64,
    pub neural_time: f64,
}

/// Result of digesting one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestReport {
    pub filename: String,
    /// Language tag, `"unknown"` when undetermined
    pub language: String,
    pub classic_summary: String,
    /// Keywords joined with `", "`
    pub keywords_summary: String,
    pub neural_summary: String,
    pub times: StageTimes,
}

impl DigestReport {
    /// The identified language, if any
    pub fn detected_language(&self) -> Option<Language> {
        self.language.parse().ok()
    }
}

/// Language identification plus keyword, extractive and abstractive
/// summaries over frozen reference state.
pub struct DigestPipeline {
    identifiers: IdentifierSet,
    summarizer: ExtractiveSummarizer,
    keywords: Arc<dyn KeywordExtractor>,
    abstractive: Arc<dyn AbstractiveSummarizer>,
    strategy: Strategy,
    num_sentences: usize,
}

impl DigestPipeline {
    /// Term-frequency keywords, no abstractive summary, alphabet strategy
    pub fn new(identifiers: IdentifierSet, summarizer: ExtractiveSummarizer) -> Self {
        let keywords = TermFrequencyKeywords::new(Arc::clone(summarizer.resources()));
        Self {
            identifiers,
            summarizer,
            keywords: Arc::new(keywords),
            abstractive: Arc::new(NoopAbstractiveSummarizer),
            strategy: Strategy::default(),
            num_sentences: DEFAULT_NUM_SENTENCES,
        }
    }

    /// Load every configured resource and train the classifier if one is
    /// configured.
    ///
    /// Fails if any configured resource cannot be loaded, or if the default
    /// strategy has no reference state.
    pub fn from_config(config: &DigestConfig) -> Result<Self> {
        config.validate()?;
        let resources = Arc::new(LanguageResources::new());

        let documents = match &config.corpus_manifest {
            Some(path) => corpus::load_documents(path)?,
            None => Vec::new(),
        };
        let statistics = Arc::new(CorpusStatistics::build(&documents, &resources));

        let mut identifiers = IdentifierSet::new();
        if let Some(paths) = &config.ngram_profiles {
            let references =
                ReferenceProfiles::load_json(SymbolKind::NGram(config.ngram_size), paths)?;
            identifiers = identifiers.with_ngram_profiles(references);
        }
        if let Some(path) = &config.classifier_corpus {
            let samples = corpus::load_labeled_samples(path)?;
            let classifier = LanguageClassifier::train(&samples, &config.classifier)?;
            identifiers = identifiers.with_classifier(Arc::new(classifier));
        }
        if !identifiers.is_available(config.strategy) {
            return Err(TextDigestError::StrategyUnavailable(config.strategy));
        }

        let available: Vec<&str> = Strategy::ALL
            .iter()
            .filter(|s| identifiers.is_available(**s))
            .map(Strategy::as_str)
            .collect();
        info!(
            strategy = %config.strategy,
            ?available,
            corpus_documents = documents.len(),
            "digest pipeline ready"
        );

        Ok(Self::new(identifiers, ExtractiveSummarizer::new(resources, statistics))
            .with_strategy(config.strategy)
            .with_num_sentences(config.num_sentences))
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_num_sentences(mut self, num_sentences: usize) -> Self {
        self.num_sentences = num_sentences;
        self
    }

    pub fn with_keyword_extractor(mut self, extractor: impl KeywordExtractor + 'static) -> Self {
        self.keywords = Arc::new(extractor);
        self
    }

    pub fn with_abstractive_summarizer(
        mut self,
        summarizer: impl AbstractiveSummarizer + 'static,
    ) -> Self {
        self.abstractive = Arc::new(summarizer);
        self
    }

    pub fn identifiers(&self) -> &IdentifierSet {
        &self.identifiers
    }

    pub fn summarizer(&self) -> &ExtractiveSummarizer {
        &self.summarizer
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Digest one document with the configured strategy
    pub fn run(&self, filename: &str, text: &str) -> Result<DigestReport> {
        self.run_with(filename, text, self.strategy, &mut NoopObserver)
    }

    /// Digest documents in parallel, reports in input order
    pub fn run_all<S: AsRef<str> + Sync>(&self, documents: &[(S, S)]) -> Result<Vec<DigestReport>> {
        documents
            .par_iter()
            .map(|(filename, text)| self.run(filename.as_ref(), text.as_ref()))
            .collect()
    }

    /// Digest one document with an explicit strategy and observer
    pub fn run_with(
        &self,
        filename: &str,
        text: &str,
        strategy: Strategy,
        observer: &mut impl PipelineObserver,
    ) -> Result<DigestReport> {
        let mut times = StageTimes::default();

        let (language, elapsed) = timed(STAGE_IDENTIFY, observer, || {
            self.identifiers.identify(strategy, text)
        });
        times.extraction_time = elapsed;
        let language = language?;

        let mut report = DigestReport {
            filename: filename.to_string(),
            language: language_tag(language).to_string(),
            classic_summary: String::new(),
            keywords_summary: String::new(),
            neural_summary: String::new(),
            times,
        };
        let Some(language) = language else {
            debug!(filename, %strategy, "language undetermined; skipping summaries");
            return Ok(report);
        };

        let (keywords, elapsed) = timed(STAGE_KEYWORDS, observer, || {
            self.keywords.extract_keywords(text, language)
        });
        report.keywords_summary = keywords?.join(", ");
        report.times.keywords_time = elapsed;

        let (classic, elapsed) = timed(STAGE_CLASSIC, observer, || {
            self.summarizer.summarize(text, language, self.num_sentences)
        });
        report.classic_summary = classic;
        report.times.classic_time = elapsed;

        let (neural, elapsed) = timed(STAGE_NEURAL, observer, || {
            self.abstractive.summarize(text, language)
        });
        report.neural_summary = neural?;
        report.times.neural_time = elapsed;

        debug!(filename, %language, times = ?report.times, "digested document");
        Ok(report)
    }
}

/// Run `f` as stage `stage`, returning its output and elapsed seconds
fn timed<T>(
    stage: &'static str,
    observer: &mut impl PipelineObserver,
    f: impl FnOnce() -> T,
) -> (T, f64) {
    trace_stage!(stage);
    observer.on_stage_start(stage);
    let clock = StageClock::start();
    let output = f();
    let elapsed = clock.elapsed();
    observer.on_stage_end(stage, elapsed);
    (output, elapsed.as_secs_f64())
}
