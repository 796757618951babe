#![forbid(unsafe_code)]

use crate::types::GenerationResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Column header of the exported CSV.
pub const CSV_HEADER: &str = "Prompt,Generated Text,Sentiment,Positive %,Negative %";

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Render one result batch (not the full history) as CSV.
pub fn batch_to_csv(batch: &[GenerationResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for result in batch {
        out.push_str(&escape(&result.prompt));
        out.push(',');
        out.push_str(&escape(&result.generated_text));
        out.push(',');
        out.push_str(result.sentiment.as_str());
        out.push(',');
        out.push_str(&pct(result.positive_pct));
        out.push(',');
        out.push_str(&pct(result.negative_pct));
        out.push('\n');
    }
    out
}

/// Wrap a CSV string in a base64 `data:` URI usable as a download link.
pub fn csv_data_uri(csv: &str) -> String {
    format!("data:file/csv;base64,{}", STANDARD.encode(csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    fn result(text: &str, pos: Option<f64>) -> GenerationResult {
        GenerationResult {
            prompt: "The future of AI is".to_string(),
            generated_text: text.to_string(),
            sentiment: Sentiment::Positive,
            positive_pct: pos,
            negative_pct: pos.map(|p| 100.0 - p),
            time: "12:00:00".to_string(),
        }
    }

    #[test]
    fn csv_has_header_plus_one_row_per_result() {
        let batch = vec![result("a fine day", None), result("another day", None)];
        let csv = batch_to_csv(&batch);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].ends_with("Positive,,"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let batch = vec![result("good, very good", Some(87.5))];
        let csv = batch_to_csv(&batch);
        assert!(csv.contains("\"good, very good\""));
        assert!(csv.contains("87.50"));
        assert!(csv.contains("12.50"));
    }

    #[test]
    fn data_uri_decodes_back_to_the_csv() {
        let csv = batch_to_csv(&[result("hello world", None)]);
        let uri = csv_data_uri(&csv);
        let encoded = uri.strip_prefix("data:file/csv;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), csv);
    }
}
