#![forbid(unsafe_code)]

use crate::pipeline::SentimentPipeline;

/// Fixed training set: 3 positive and 3 negative product reviews.
pub const TRAINING_SET: [(&str, u8); 6] = [
    ("I love this product. It's amazing and works perfectly.", 1),
    ("This is the best thing I've ever bought.", 1),
    ("Absolutely wonderful! Highly recommend it.", 1),
    ("Terrible experience. I hate it.", 0),
    ("Worst service ever. I'm so disappointed.", 0),
    ("It was a waste of money and time.", 0),
];

/// Fit a pipeline on the built-in corpus.
pub fn train_default() -> SentimentPipeline {
    let texts: Vec<&str> = TRAINING_SET.iter().map(|(t, _)| *t).collect();
    let labels: Vec<u8> = TRAINING_SET.iter().map(|(_, l)| *l).collect();
    SentimentPipeline::fit(&texts, &labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_is_balanced() {
        let positives = TRAINING_SET.iter().filter(|(_, l)| *l == 1).count();
        assert_eq!(positives, 3);
        assert_eq!(TRAINING_SET.len(), 6);
    }

    #[test]
    fn trained_pipeline_recalls_its_own_corpus() {
        let pipeline = train_default();
        for (text, label) in TRAINING_SET {
            assert_eq!(pipeline.predict(text), label, "misclassified: {text}");
        }
    }
}
