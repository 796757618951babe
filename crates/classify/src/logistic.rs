#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Gradient-descent iteration cap, matching the classic max_iter=1000 setup.
const MAX_ITER: usize = 1000;
const LEARNING_RATE: f64 = 0.5;

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Binary logistic regression trained with full-batch gradient descent.
/// Deterministic: weights start at zero and updates depend only on the data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit on feature rows `x` with binary labels `y` (0 or 1).
    /// Rows shorter than the widest row are treated as zero-padded.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        let dim = x.iter().map(|row| row.len()).max().unwrap_or(0);
        self.weights = vec![0.0; dim];
        self.bias = 0.0;
        let n = x.len() as f64;
        if n == 0.0 {
            return;
        }

        for _ in 0..MAX_ITER {
            let mut grad_w = vec![0.0; dim];
            let mut grad_b = 0.0;
            for (row, &label) in x.iter().zip(y) {
                let error = sigmoid(self.decision(row)) - f64::from(label);
                for (g, &f) in grad_w.iter_mut().zip(row) {
                    *g += error * f;
                }
                grad_b += error;
            }
            for (w, g) in self.weights.iter_mut().zip(&grad_w) {
                *w -= LEARNING_RATE * g / n;
            }
            self.bias -= LEARNING_RATE * grad_b / n;
        }
    }

    /// Raw decision value w·x + b.
    pub fn decision(&self, x: &[f64]) -> f64 {
        let mut s = self.bias;
        for (w, f) in self.weights.iter().zip(x) {
            s += w * f;
        }
        s
    }

    /// Class probabilities `[p(0), p(1)]`, summing to 1.
    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let p = sigmoid(self.decision(x));
        [1.0 - p, p]
    }

    /// Hard label: 1 when p(1) >= 0.5, else 0.
    pub fn predict(&self, x: &[f64]) -> u8 {
        u8::from(self.decision(x) >= 0.0)
    }
}
