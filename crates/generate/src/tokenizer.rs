#![forbid(unsafe_code)]

/// Whitespace word tokenizer. Punctuation stays attached to its word so
/// detokenization is a plain space join.
pub fn tokenize(s: &str) -> Vec<String> {
    s.split_whitespace().map(|t| t.to_string()).collect()
}

/// Join tokens back into a string.
pub fn detokenize(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Normalized form used for vocabulary lookup and n-gram tracking:
/// lowercase with surrounding punctuation stripped.
pub fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_round_trips_through_detokenize() {
        let text = "The future of AI is";
        assert_eq!(detokenize(&tokenize(text)), text);
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Bought."), "bought");
        assert_eq!(normalize("\"Amazing!\""), "amazing");
        assert_eq!(normalize("AI"), "ai");
    }
}
