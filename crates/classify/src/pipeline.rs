#![forbid(unsafe_code)]

use crate::error::ArtifactError;
use crate::logistic::LogisticRegression;
use crate::vectorizer::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fitted TF-IDF + logistic-regression pipeline.
///
/// Immutable after `fit`; `save`/`load` persist the whole pipeline with
/// bincode so a session process can load it once at startup and classify
/// for the rest of its lifetime.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SentimentPipeline {
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
}

impl SentimentPipeline {
    /// Fit vectorizer and classifier on the labeled corpus.
    pub fn fit(texts: &[&str], labels: &[u8]) -> Self {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(texts);
        let features: Vec<Vec<f64>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let mut model = LogisticRegression::default();
        model.fit(&features, labels);
        Self { vectorizer, model }
    }

    /// Hard binary label for `text`: 1 positive, 0 negative.
    pub fn predict(&self, text: &str) -> u8 {
        self.model.predict(&self.vectorizer.transform(text))
    }

    /// Class probabilities `[p(negative), p(positive)]`.
    pub fn predict_proba(&self, text: &str) -> [f64; 2] {
        self.model.predict_proba(&self.vectorizer.transform(text))
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocab_len(&self) -> usize {
        self.vectorizer.vocab_len()
    }

    /// Serialize the pipeline to `path`, overwriting any existing file.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = bincode::serialize(self)?;
        std::fs::write(path, bytes).map_err(|source| ArtifactError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Load a pipeline previously written by [`SentimentPipeline::save`].
    pub fn load(path: &str) -> Result<Self, ArtifactError> {
        if !Path::new(path).exists() {
            return Err(ArtifactError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "artifact not found"),
            });
        }
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(bincode::deserialize(&bytes)?)
    }
}
