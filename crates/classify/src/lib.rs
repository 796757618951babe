#![forbid(unsafe_code)]

//! Sentiment classification: TF-IDF features + logistic regression.
//!
//! A small, auditable reimplementation of the classic vectorizer →
//! linear-model pipeline: `fit` on a labeled corpus, `predict` /
//! `predict_proba` on new text, and bincode persistence so the fitted
//! pipeline can be shipped as a single artifact file.
//!
//! Layout:
//! - `vectorizer.rs` — TF-IDF vocabulary + smoothed idf weights
//! - `logistic.rs` — binary logistic regression (full-batch GD)
//! - `pipeline.rs` — vectorizer + model glued together, save/load
//! - `corpus.rs` — the fixed 6-example training set
//! - `error.rs` — artifact io/codec errors

/// Fixed training corpus and the default trainer entry point.
pub mod corpus;
/// Artifact error taxonomy.
pub mod error;
/// Binary logistic regression.
pub mod logistic;
/// Fitted vectorizer + classifier pipeline with persistence.
pub mod pipeline;
/// TF-IDF text vectorizer.
pub mod vectorizer;

pub use error::ArtifactError;
pub use pipeline::SentimentPipeline;
