#![forbid(unsafe_code)]

//! Interactive generation-and-scoring session.
//!
//! Ties the toy generator and the sentiment classifier together behind an
//! explicit request handler: build a [`GenerationRequest`] from UI state,
//! run it through [`Session::run`], get back the scored batch while the
//! session history grows append-only. The `train` binary produces the
//! classifier artifact; the `gui` binary is the egui front end.

/// Session error taxonomy.
pub mod error;
/// CSV and data-URI export of a result batch.
pub mod export;
/// Session state and the request handler.
pub mod handler;
/// Request/result types.
pub mod types;

pub use error::SessionError;
pub use handler::{Session, ARTIFACT_PATH, PROCESS_SEED};
pub use types::{GenerationRequest, GenerationResult, Sentiment};
