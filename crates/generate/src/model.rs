#![forbid(unsafe_code)]

use crate::error::GenerateError;
use crate::sampler::{self, DecodeConfig};
use crate::tokenizer::{detokenize, normalize, tokenize};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported generative model identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    /// The larger embedded model.
    Gpt2,
    /// The smaller embedded model.
    DistilGpt2,
}

impl ModelId {
    /// All supported ids, in UI order.
    pub const ALL: [ModelId; 2] = [ModelId::Gpt2, ModelId::DistilGpt2];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Gpt2 => "gpt2",
            ModelId::DistilGpt2 => "distilgpt2",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt2" => Ok(ModelId::Gpt2),
            "distilgpt2" => Ok(ModelId::DistilGpt2),
            other => Err(GenerateError::UnknownModel(other.to_string())),
        }
    }
}

/// A text-generation backend. The RNG is caller-owned so the process-wide
/// seed policy (and test determinism) stays outside the model.
pub trait TextGenerator: Send {
    /// Which model id this instance was built for.
    fn id(&self) -> ModelId;

    /// Produce one continuation of `prompt` under the decoding constraints.
    fn generate(
        &self,
        prompt: &str,
        cfg: &DecodeConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<String, GenerateError>;
}

// Embedded corpora the bigram tables are fitted on. Two different texts so
// the two model ids produce recognizably different continuations.
const GPT2_CORPUS: &str = "\
the future of ai is not written yet and the future of technology depends on \
the people who build it every new model is trained on more data than the last \
one and the results are often surprising researchers believe that language \
models will change the way we work and the way we learn machines can now \
write stories answer questions and translate text between many languages the \
pace of progress is fast and the field moves quickly some experts say the \
best ideas are still ahead of us while others warn that we must build these \
systems carefully the world is watching and the stakes are high";

const DISTILGPT2_CORPUS: &str = "\
the future of ai is smaller faster and cheaper than people expect a compact \
model can run on a laptop and still produce useful text this product of \
modern research works perfectly for quick experiments many developers love \
the speed and the simple setup the quality of the output depends on the \
prompt and on the sampling settings short prompts give short answers while \
longer prompts give the model more context to work with distillation keeps \
most of the quality at a fraction of the cost and that is why small models \
are everywhere today";

/// Word-bigram language model fitted over an embedded corpus.
///
/// Stand-in for a pretrained causal model: successor logits are log counts
/// of bigrams in the corpus, with a unigram fallback when the previous word
/// is unknown or has no recorded successor.
pub struct BigramModel {
    id: ModelId,
    vocab: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<(usize, f32)>>,
    unigram: Vec<(usize, f32)>,
}

impl BigramModel {
    /// Fit the bigram table for `id` from its embedded corpus.
    pub fn load(id: ModelId) -> Self {
        let corpus = match id {
            ModelId::Gpt2 => GPT2_CORPUS,
            ModelId::DistilGpt2 => DISTILGPT2_CORPUS,
        };
        let tokens: Vec<String> = tokenize(corpus)
            .iter()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect();

        let mut vocab: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut ids: Vec<usize> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let id = match index.get(token) {
                Some(&i) => i,
                None => {
                    let i = vocab.len();
                    vocab.push(token.clone());
                    index.insert(token.clone(), i);
                    i
                }
            };
            ids.push(id);
        }

        let mut bigram_counts: Vec<HashMap<usize, f32>> = vec![HashMap::new(); vocab.len()];
        let mut unigram_counts: HashMap<usize, f32> = HashMap::new();
        for window in ids.windows(2) {
            if let (Some(&prev), Some(&next)) = (window.first(), window.last()) {
                if let Some(row) = bigram_counts.get_mut(prev) {
                    *row.entry(next).or_insert(0.0) += 1.0;
                }
            }
        }
        for &id in &ids {
            *unigram_counts.entry(id).or_insert(0.0) += 1.0;
        }

        // logits are log counts; ties at count 1 are broken by sampling
        let successors: Vec<Vec<(usize, f32)>> = bigram_counts
            .into_iter()
            .map(|row| row.into_iter().map(|(t, c)| (t, c.ln())).collect())
            .collect();
        let unigram: Vec<(usize, f32)> = unigram_counts.into_iter().map(|(t, c)| (t, c.ln())).collect();

        debug!(model = %id, vocab = vocab.len(), "bigram model fitted");
        Self {
            id,
            vocab,
            index,
            successors,
            unigram,
        }
    }

    fn candidates(&self, prev: Option<usize>) -> &[(usize, f32)] {
        match prev.and_then(|p| self.successors.get(p)) {
            Some(row) if !row.is_empty() => row,
            _ => &self.unigram,
        }
    }
}

impl TextGenerator for BigramModel {
    fn id(&self) -> ModelId {
        self.id
    }

    fn generate(
        &self,
        prompt: &str,
        cfg: &DecodeConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<String, GenerateError> {
        let mut tokens = tokenize(prompt);
        let mut normalized: Vec<String> = tokens.iter().map(|t| normalize(t)).collect();

        let budget = cfg.max_tokens.saturating_sub(tokens.len());
        for _ in 0..budget {
            let prev = normalized
                .last()
                .and_then(|t| self.index.get(t))
                .copied();
            let banned = sampler::banned_next(&normalized, cfg.no_repeat_ngram);
            let allowed: Vec<(usize, f32)> = self
                .candidates(prev)
                .iter()
                .filter(|(t, _)| {
                    self.vocab
                        .get(*t)
                        .map(|w| !banned.contains(w))
                        .unwrap_or(false)
                })
                .copied()
                .collect();

            // every candidate banned: end the output early rather than repeat
            let Some(next) = sampler::sample_from_logits(&allowed, cfg, rng) else {
                break;
            };
            let Some(word) = self.vocab.get(next) else {
                break;
            };
            tokens.push(word.clone());
            normalized.push(word.clone());
        }

        Ok(detokenize(&tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::banned_next;
    use rand::SeedableRng;

    #[test]
    fn model_names_parse_and_display() {
        assert_eq!("gpt2".parse::<ModelId>().unwrap(), ModelId::Gpt2);
        assert_eq!("distilgpt2".parse::<ModelId>().unwrap(), ModelId::DistilGpt2);
        assert_eq!(ModelId::Gpt2.to_string(), "gpt2");
    }

    #[test]
    fn unknown_model_name_is_rejected() {
        assert!("gpt5".parse::<ModelId>().is_err());
    }

    #[test]
    fn output_starts_with_the_prompt() {
        let model = BigramModel::load(ModelId::DistilGpt2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cfg = DecodeConfig {
            max_tokens: 60,
            ..DecodeConfig::default()
        };
        let text = model.generate("The future of AI is", &cfg, &mut rng).unwrap();
        assert!(text.starts_with("The future of AI is"));
        assert!(text.len() > "The future of AI is".len());
    }

    #[test]
    fn output_respects_the_token_budget() {
        let model = BigramModel::load(ModelId::Gpt2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for max_tokens in [50, 60, 300] {
            let cfg = DecodeConfig {
                max_tokens,
                ..DecodeConfig::default()
            };
            let text = model.generate("The future of AI is", &cfg, &mut rng).unwrap();
            assert!(text.split_whitespace().count() <= max_tokens);
        }
    }

    #[test]
    fn output_contains_no_repeated_bigram() {
        let model = BigramModel::load(ModelId::Gpt2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cfg = DecodeConfig {
            max_tokens: 120,
            ..DecodeConfig::default()
        };
        let text = model.generate("the future of ai is", &cfg, &mut rng).unwrap();

        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        for end in 2..=tokens.len() {
            // no token may complete a bigram that already occurred earlier
            let (head, _) = tokens.split_at(end);
            let (prefix, last) = head.split_at(end - 1);
            let banned = banned_next(prefix, 2);
            assert!(
                !banned.contains(&last[0]),
                "repeated bigram ending in {:?}",
                last[0]
            );
        }
    }

    #[test]
    fn empty_prompt_still_generates() {
        let model = BigramModel::load(ModelId::DistilGpt2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cfg = DecodeConfig {
            max_tokens: 50,
            ..DecodeConfig::default()
        };
        let text = model.generate("", &cfg, &mut rng).unwrap();
        assert!(!text.is_empty());
    }
}
