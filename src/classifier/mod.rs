//! Trainable language classifier
//!
//! A bag-of-words vectorizer feeding a two-hidden-layer network. Training
//! happens inside [`LanguageClassifier::train`]; there is no untrained state
//! to query. Construction is expensive, prediction is cheap: build once at
//! startup and share behind an `Arc`.

pub mod network;
pub mod vectorizer;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use network::{argmax, Adam, FeedForward};
use vectorizer::{CountVectorizer, SparseVector};

use crate::errors::{Result, TextDigestError};
use crate::identify::LanguageIdentifier;
use crate::types::{Language, LabeledText};

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Widths of the hidden layers
    pub hidden_layers: Vec<usize>,
    /// Passes over the training partition
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Share of samples held out for validation
    pub validation_fraction: f64,
    /// Seed for the split, weight init and per-epoch shuffling
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![64, 32],
            epochs: 10,
            batch_size: 4,
            learning_rate: 0.001,
            validation_fraction: 0.2,
            seed: 42,
        }
    }
}

impl ClassifierConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(TextDigestError::InvalidConfig(
                "batch size must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(TextDigestError::InvalidConfig(format!(
                "validation fraction {} outside [0, 1)",
                self.validation_fraction
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TextDigestError::InvalidConfig(format!(
                "learning rate {} must be positive",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Outcome of training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub train_samples: usize,
    pub validation_samples: usize,
    pub vocabulary_size: usize,
    pub epochs: usize,
    /// Mean training loss of the last epoch
    pub final_loss: f64,
    /// Accuracy on the held-out partition, if there is one
    pub validation_accuracy: Option<f64>,
}

/// A trained bag-of-words language classifier
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    vectorizer: CountVectorizer,
    network: FeedForward,
    report: TrainingReport,
}

impl LanguageClassifier {
    /// Fit the vocabulary on all samples, split 80/20 (by default) and train.
    pub fn train(samples: &[LabeledText], config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        if samples.is_empty() {
            return Err(TextDigestError::invalid_corpus("no training samples"));
        }

        let vectorizer = CountVectorizer::fit(samples.iter().map(|s| s.text.as_str()));
        if vectorizer.is_empty() {
            return Err(TextDigestError::invalid_corpus(
                "training samples contain no terms",
            ));
        }
        if Language::ALL
            .iter()
            .any(|lang| !samples.iter().any(|s| s.language == *lang))
        {
            warn!("training corpus does not cover every supported language");
        }

        let data: Vec<(SparseVector, usize)> = samples
            .iter()
            .map(|s| (vectorizer.transform(&s.text), s.language.class_index()))
            .collect();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut order: Vec<usize> = (0..data.len()).collect();
        order.shuffle(&mut rng);
        let held_out = ((data.len() as f64 * config.validation_fraction).ceil() as usize)
            .min(data.len() - 1);
        let (validation, train) = order.split_at(held_out);
        let mut train = train.to_vec();

        let mut network = FeedForward::new(
            vectorizer.vocabulary_size(),
            &config.hidden_layers,
            Language::ALL.len(),
            &mut rng,
        );
        let mut adam = Adam::new(&network, config.learning_rate);
        let mut grads = adam.gradients();

        let mut final_loss = f64::NAN;
        let mut validation_accuracy = None;
        for epoch in 1..=config.epochs {
            train.shuffle(&mut rng);
            let mut epoch_loss = 0.0;
            for batch in train.chunks(config.batch_size) {
                grads.reset();
                for &i in batch {
                    let (x, y) = &data[i];
                    epoch_loss += network.accumulate(x, *y, &mut grads);
                }
                adam.apply(&mut network, &grads, batch.len());
            }
            final_loss = epoch_loss / train.len() as f64;
            validation_accuracy = accuracy(&network, &data, validation);
            debug!(epoch, loss = final_loss, ?validation_accuracy, "classifier epoch");
        }
        if config.epochs == 0 {
            validation_accuracy = accuracy(&network, &data, validation);
        }

        let report = TrainingReport {
            train_samples: train.len(),
            validation_samples: validation.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            epochs: config.epochs,
            final_loss,
            validation_accuracy,
        };
        info!(
            train = report.train_samples,
            validation = report.validation_samples,
            vocabulary = report.vocabulary_size,
            accuracy = ?report.validation_accuracy,
            "trained language classifier"
        );

        Ok(Self {
            vectorizer,
            network,
            report,
        })
    }

    /// Class probabilities for `text`, indexed by [`Language::class_index`]
    pub fn probabilities(&self, text: &str) -> Vec<f64> {
        self.network.predict(&self.vectorizer.transform(text))
    }

    /// Most probable language.
    ///
    /// `None` when `text` has no word tokens at all, or when the winning
    /// class has no mapped language. Text made only of unseen terms still
    /// goes through the network.
    pub fn predict(&self, text: &str) -> Option<Language> {
        if vectorizer::tokenize(text).next().is_none() {
            return None;
        }
        argmax(&self.probabilities(text)).and_then(Language::from_class_index)
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }
}

impl LanguageIdentifier for LanguageClassifier {
    fn identify(&self, text: &str) -> Option<Language> {
        self.predict(text)
    }
}

fn accuracy(network: &FeedForward, data: &[(SparseVector, usize)], indices: &[usize]) -> Option<f64> {
    if indices.is_empty() {
        return None;
    }
    let correct = indices
        .iter()
        .filter(|&&i| argmax(&network.predict(&data[i].0)) == Some(data[i].1))
        .count();
    Some(correct as f64 / indices.len() as f64)
}
