//! One-shot trainer: fit the sentiment pipeline on the built-in corpus and
//! write the artifact the interactive session loads at startup.

use classify::corpus;
use session::ARTIFACT_PATH;
use tracing::info;

fn main() -> Result<(), classify::ArtifactError> {
    tracing_subscriber::fmt().init();

    info!(examples = corpus::TRAINING_SET.len(), "fitting sentiment pipeline");
    let pipeline = corpus::train_default();
    pipeline.save(ARTIFACT_PATH)?;
    info!(path = ARTIFACT_PATH, vocab = pipeline.vocab_len(), "artifact written");

    println!("✅ Model trained and saved to {ARTIFACT_PATH}.");
    Ok(())
}
