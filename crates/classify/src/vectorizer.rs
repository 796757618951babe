#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Lowercase word tokenizer: splits on whitespace and ASCII punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// TF-IDF vectorizer: `fit` learns a vocabulary and smoothed inverse
/// document frequencies, `transform` turns a document into a dense
/// feature vector over that vocabulary. Words unseen at fit time are
/// ignored at transform time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Build vocabulary and idf weights from the training documents.
    pub fn fit(&mut self, documents: &[&str]) {
        self.n_documents = documents.len();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<String> = tokenize(doc).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }

        // smoothed idf: ln((N + 1) / (df + 1)) + 1
        let mut idf = vec![0.0; vocabulary.len()];
        for (word, &idx) in &vocabulary {
            let df = document_frequency.get(word).copied().unwrap_or(0);
            if let Some(slot) = idf.get_mut(idx) {
                *slot = ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
            }
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
    }

    /// Transform a document into its TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let tokens = tokenize(document);
        let mut tf = vec![0.0; self.vocabulary.len()];
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                if let Some(slot) = tf.get_mut(idx) {
                    *slot += 1.0;
                }
            }
        }

        // normalize by document length, then weight by idf
        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for (count, idf) in tf.iter_mut().zip(&self.idf) {
                *count = *count / doc_length * idf;
            }
        }
        tf
    }

    /// Number of distinct terms learned at fit time.
    pub fn vocab_len(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_and_lowercases() {
        let toks = tokenize("I love this product. It's amazing!");
        assert_eq!(toks, vec!["i", "love", "this", "product", "it", "s", "amazing"]);
    }

    #[test]
    fn fit_builds_vocabulary_and_transform_weights_terms() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["good good thing", "bad thing"]);
        assert_eq!(v.vocab_len(), 3);

        let x = v.transform("good thing");
        assert_eq!(x.len(), 3);
        // both terms are present, so exactly two non-zero features
        assert_eq!(x.iter().filter(|&&f| f > 0.0).count(), 2);
    }

    #[test]
    fn unseen_words_produce_zero_vector() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["alpha beta", "gamma delta"]);
        let x = v.transform("epsilon zeta");
        assert!(x.iter().all(|&f| f == 0.0));
    }
}
