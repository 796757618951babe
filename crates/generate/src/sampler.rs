#![forbid(unsafe_code)]

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Decoding constraints applied to every sampling step.
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// Total token budget for one output, prompt included.
    pub max_tokens: usize,
    /// Logit temperature; higher is more diverse.
    pub temperature: f32,
    /// Keep only the k highest-logit candidates (0 disables).
    pub top_k: usize,
    /// Nucleus cut: keep the smallest prefix of probability mass >= top_p.
    pub top_p: f32,
    /// Forbid any n-gram of this size from occurring twice (0 disables).
    pub no_repeat_ngram: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.8,
            top_k: 50,
            top_p: 0.9,
            no_repeat_ngram: 2,
        }
    }
}

/// Tokens that would complete an already-seen n-gram if emitted next.
///
/// `tokens` is the normalized sequence produced so far. With n = 2 this
/// bans every word that has already followed the current last word.
pub fn banned_next(tokens: &[String], n: usize) -> HashSet<String> {
    let mut banned = HashSet::new();
    if n == 0 || tokens.len() + 1 < n {
        return banned;
    }
    let prefix = &tokens[tokens.len() - (n - 1)..];
    for window in tokens.windows(n) {
        if &window[..n - 1] == prefix {
            if let Some(last) = window.last() {
                banned.insert(last.clone());
            }
        }
    }
    banned
}

/// One constrained sampling step over sparse `(token, logit)` candidates.
///
/// Applies temperature, top-k truncation, softmax, the nucleus cut, then
/// draws from the renormalized distribution. Returns `None` when no
/// candidate survives.
pub fn sample_from_logits(
    candidates: &[(usize, f32)],
    cfg: &DecodeConfig,
    rng: &mut ChaCha8Rng,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let mut scored: Vec<(usize, f32)> = candidates.to_vec();

    let t = if cfg.temperature > 0.0 { cfg.temperature } else { 1.0 };
    for s in scored.iter_mut() {
        s.1 /= t;
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    if cfg.top_k > 0 && scored.len() > cfg.top_k {
        scored.truncate(cfg.top_k);
    }

    // softmax over the kept logits
    let max = scored.iter().map(|s| s.1).fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0_f32;
    for s in scored.iter_mut() {
        s.1 = (s.1 - max).exp();
        sum += s.1;
    }
    if sum <= 0.0 {
        return scored.first().map(|s| s.0);
    }
    for s in scored.iter_mut() {
        s.1 /= sum;
    }

    // nucleus cut, keeping at least the top candidate
    if cfg.top_p > 0.0 && cfg.top_p < 1.0 {
        let mut cum = 0.0_f32;
        let mut keep = scored.len();
        for (i, s) in scored.iter().enumerate() {
            cum += s.1;
            if cum >= cfg.top_p {
                keep = i + 1;
                break;
            }
        }
        scored.truncate(keep);
        let mass: f32 = scored.iter().map(|s| s.1).sum();
        if mass > 0.0 {
            for s in scored.iter_mut() {
                s.1 /= mass;
            }
        }
    }

    // cumulative draw
    let r: f32 = rng.gen();
    let mut acc = 0.0_f32;
    for &(idx, p) in &scored {
        acc += p;
        if r <= acc {
            return Some(idx);
        }
    }
    scored.last().map(|s| s.0)
}
