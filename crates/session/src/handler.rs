#![forbid(unsafe_code)]

use crate::error::SessionError;
use crate::types::{GenerationRequest, GenerationResult, Sentiment};
use classify::SentimentPipeline;
use generate::{DecodeConfig, GeneratorCache};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Default location of the trained classifier artifact.
pub const ARTIFACT_PATH: &str = "text_classifier.bin";

/// Process-wide RNG seed. Set once; generation calls share the RNG, so
/// repeated identical requests are only approximately reproducible
/// (call-order dependent), by contract.
pub const PROCESS_SEED: u64 = 42;

fn round_pct(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}

/// Session state: the generator cache, the loaded classifier, the shared
/// RNG and the append-only history. One instance per process.
pub struct Session {
    generators: GeneratorCache,
    classifier: SentimentPipeline,
    rng: ChaCha8Rng,
    history: Vec<GenerationResult>,
}

impl Session {
    /// Load the classifier artifact and set up an empty session.
    /// Fails when the artifact is missing or corrupt.
    pub fn open(artifact_path: &str) -> Result<Self, SessionError> {
        let classifier = SentimentPipeline::load(artifact_path)?;
        info!(
            path = artifact_path,
            vocab = classifier.vocab_len(),
            "classifier artifact loaded"
        );
        Ok(Self::with_parts(GeneratorCache::new(), classifier))
    }

    /// Assemble a session from explicit parts (stub injection point).
    pub fn with_parts(generators: GeneratorCache, classifier: SentimentPipeline) -> Self {
        Self {
            generators,
            classifier,
            rng: ChaCha8Rng::seed_from_u64(PROCESS_SEED),
            history: Vec::new(),
        }
    }

    /// Run one generation-and-scoring cycle.
    ///
    /// Produces the requested number of continuations, classifies each,
    /// appends them to the history in generation order and returns the
    /// batch. On error nothing is appended.
    pub fn run(&mut self, req: &GenerationRequest) -> Result<Vec<GenerationResult>, SessionError> {
        let max_length = req.max_length.clamp(50, 300);
        let num_outputs = req.num_outputs.clamp(1, 3);
        info!(model = %req.model, num_outputs, max_length, "running generation batch");

        let generator = self.generators.get(req.model)?;
        let cfg = DecodeConfig {
            max_tokens: max_length,
            ..DecodeConfig::default()
        };

        let mut batch = Vec::with_capacity(num_outputs);
        for i in 0..num_outputs {
            let text = generator.generate(&req.prompt, &cfg, &mut self.rng)?;
            let label = self.classifier.predict(&text);
            let sentiment = Sentiment::from_label(label);
            let (positive_pct, negative_pct) = if req.show_probabilities {
                let [neg, pos] = self.classifier.predict_proba(&text);
                (Some(round_pct(pos)), Some(round_pct(neg)))
            } else {
                (None, None)
            };
            debug!(output = i + 1, %sentiment, "output scored");
            batch.push(GenerationResult {
                prompt: req.prompt.clone(),
                generated_text: text,
                sentiment,
                positive_pct,
                negative_pct,
                time: chrono::Utc::now().format("%H:%M:%S").to_string(),
            });
        }

        self.history.extend(batch.iter().cloned());
        Ok(batch)
    }

    /// Full session history, oldest first.
    pub fn history(&self) -> &[GenerationResult] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generate::{GenerateError, ModelId, TextGenerator};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubGenerator {
        id: ModelId,
        texts: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl TextGenerator for StubGenerator {
        fn id(&self) -> ModelId {
            self.id
        }

        fn generate(
            &self,
            _prompt: &str,
            _cfg: &DecodeConfig,
            _rng: &mut ChaCha8Rng,
        ) -> Result<String, GenerateError> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.texts[i % self.texts.len()].to_string())
        }
    }

    fn stub_session() -> Session {
        let cache = GeneratorCache::with_loader(Box::new(|id| {
            Ok(Box::new(StubGenerator {
                id,
                texts: vec![
                    "I love this product, it works perfectly",
                    "terrible experience, I hate it",
                ],
                calls: AtomicUsize::new(0),
            }) as Box<dyn TextGenerator>)
        }));
        Session::with_parts(cache, classify::corpus::train_default())
    }

    fn request(num_outputs: usize, show_probabilities: bool) -> GenerationRequest {
        GenerationRequest {
            prompt: "a prompt".to_string(),
            model: ModelId::Gpt2,
            max_length: 100,
            num_outputs,
            show_probabilities,
        }
    }

    #[test]
    fn batch_size_matches_num_outputs() {
        let mut session = stub_session();
        for n in 1..=3 {
            let batch = session.run(&request(n, false)).unwrap();
            assert_eq!(batch.len(), n);
        }
    }

    #[test]
    fn history_grows_by_each_batch_and_keeps_order() {
        let mut session = stub_session();
        session.run(&request(2, false)).unwrap();
        session.run(&request(3, false)).unwrap();
        session.run(&request(1, false)).unwrap();
        assert_eq!(session.history().len(), 6);

        // stub alternates positive/negative, so order is observable
        let first = &session.history()[0];
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert_eq!(session.history()[1].sentiment, Sentiment::Negative);
    }

    #[test]
    fn stub_outputs_are_scored_as_expected() {
        let mut session = stub_session();
        let batch = session.run(&request(2, false)).unwrap();
        assert_eq!(batch[0].sentiment, Sentiment::Positive);
        assert_eq!(batch[1].sentiment, Sentiment::Negative);
        assert!(batch[0].positive_pct.is_none());
    }

    #[test]
    fn probability_percentages_sum_to_about_one_hundred() {
        let mut session = stub_session();
        let batch = session.run(&request(3, true)).unwrap();
        for result in batch {
            let pos = result.positive_pct.unwrap();
            let neg = result.negative_pct.unwrap();
            assert!((pos + neg - 100.0).abs() <= 0.01, "pos={pos} neg={neg}");
        }
    }

    #[test]
    fn generator_errors_propagate_and_append_nothing() {
        let cache = GeneratorCache::with_loader(Box::new(|id| {
            Err(GenerateError::UnknownModel(id.to_string()))
        }));
        let mut session = Session::with_parts(cache, classify::corpus::train_default());
        assert!(matches!(
            session.run(&request(2, false)),
            Err(SessionError::Generate(_))
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn out_of_range_settings_are_clamped() {
        let mut session = stub_session();
        let mut req = request(9, false);
        req.max_length = 10_000;
        let batch = session.run(&req).unwrap();
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn end_to_end_with_the_builtin_models() {
        let mut session = Session::with_parts(
            GeneratorCache::new(),
            classify::corpus::train_default(),
        );
        let req = GenerationRequest {
            prompt: "The future of AI is".to_string(),
            model: ModelId::DistilGpt2,
            max_length: 60,
            num_outputs: 2,
            show_probabilities: true,
        };
        let batch = session.run(&req).unwrap();

        assert_eq!(batch.len(), 2);
        for result in &batch {
            assert!(result.generated_text.starts_with("The future of AI is"));
            assert!(result.generated_text.split_whitespace().count() <= 60);
            let pos = result.positive_pct.unwrap();
            let neg = result.negative_pct.unwrap();
            assert!((pos + neg - 100.0).abs() <= 0.01);
        }
        assert_eq!(session.history().len(), 2);
    }
}
