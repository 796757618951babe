#![forbid(unsafe_code)]

//! Toy causal text generation with explicit decoding constraints.
//!
//! Each supported model id binds to a small word-bigram model fitted over
//! an embedded corpus at load time. Generation is autoregressive sampling
//! over bigram successor logits under temperature, top-k, nucleus (top-p)
//! and no-repeat-n-gram constraints, driven by a caller-owned seeded RNG.
//!
//! Layout:
//! - `tokenizer.rs` — whitespace word tokenizer + lookup normalization
//! - `sampler.rs` — `DecodeConfig` and the constrained sampling step
//! - `model.rs` — `ModelId`, the `TextGenerator` trait, `BigramModel`
//! - `loader.rs` — per-process generator cache keyed by model id
//! - `error.rs` — generation error taxonomy

/// Generation error taxonomy.
pub mod error;
/// Generator cache keyed by model id.
pub mod loader;
/// Model identifiers, generator trait and the bigram model.
pub mod model;
/// Decoding configuration and constrained sampling.
pub mod sampler;
/// Word tokenizer helpers.
pub mod tokenizer;

pub use error::GenerateError;
pub use loader::GeneratorCache;
pub use model::{BigramModel, ModelId, TextGenerator};
pub use sampler::DecodeConfig;
