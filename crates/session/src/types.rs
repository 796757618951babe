#![forbid(unsafe_code)]

use generate::ModelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary sentiment label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    /// Classifier label 1.
    Positive,
    /// Classifier label 0.
    Negative,
}

impl Sentiment {
    /// Map the classifier's binary label onto a sentiment.
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generation request, built fresh from UI state per interaction.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    /// Free-text prompt to continue.
    pub prompt: String,
    /// Which generator to use.
    pub model: ModelId,
    /// Token budget per output, clamped to [50, 300] by the handler.
    pub max_length: usize,
    /// Continuations to produce, clamped to [1, 3] by the handler.
    pub num_outputs: usize,
    /// Whether to expose class probabilities on each result.
    pub show_probabilities: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            model: ModelId::Gpt2,
            max_length: 100,
            num_outputs: 1,
            show_probabilities: false,
        }
    }
}

/// One scored continuation. Never mutated after creation; appended to the
/// session history in generation order.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationResult {
    /// The prompt this output continued.
    pub prompt: String,
    /// The generated text, prompt included.
    pub generated_text: String,
    /// Classifier verdict on the generated text.
    pub sentiment: Sentiment,
    /// Positive-class percentage, 2 decimals, when probabilities are shown.
    pub positive_pct: Option<f64>,
    /// Negative-class percentage, 2 decimals, when probabilities are shown.
    pub negative_pct: Option<f64>,
    /// Wall-clock time the result was produced (HH:MM:SS).
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_onto_sentiments() {
        assert_eq!(Sentiment::from_label(1), Sentiment::Positive);
        assert_eq!(Sentiment::from_label(0), Sentiment::Negative);
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }
}
