//! Recovers the JSON payload from free-form model output.
//!
//! Models wrap their answer in prose or markdown fences often enough that the raw
//! text cannot be handed to a parser directly. The heuristic here does not balance
//! delimiters: a stray closing brace or bracket after the real payload widens the
//! slice, and the subsequent parse fails.

use ddd_core::{Error, Result};
use serde_json::Value;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Returns the slice of `raw` most likely to hold a JSON object or array.
pub fn extract_json_payload(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find(JSON_FENCE) {
        let body = &trimmed[start + JSON_FENCE.len()..];
        if let Some(end) = body.find(FENCE) {
            return Ok(body[..end].trim());
        }
    }

    let (start, closing) = match (trimmed.find('{'), trimmed.find('[')) {
        (Some(brace), Some(bracket)) if bracket < brace => (bracket, ']'),
        (Some(brace), _) => (brace, '}'),
        (None, Some(bracket)) => (bracket, ']'),
        (None, None) => {
            return Err(Error::Extraction("no JSON object or array in model output".to_string()))
        }
    };

    match trimmed.rfind(closing) {
        Some(end) if end > start => Ok(&trimmed[start..=end]),
        _ => Err(Error::Extraction(format!("no closing '{}' after position {}", closing, start))),
    }
}

/// Extracts and fully parses the payload. A parse failure is an extraction failure.
pub fn parse_json_payload(raw: &str) -> Result<Value> {
    let payload = extract_json_payload(raw)?;
    serde_json::from_str(payload)
        .map_err(|e| Error::Extraction(format!("payload is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_block_wins_over_surrounding_prose() {
        let raw = "Here you go!\n```json\n[{\"title\": \"A\"}]\n```\nLet me know {if} you need more.";
        assert_eq!(extract_json_payload(raw).unwrap(), "[{\"title\": \"A\"}]");
    }

    #[test]
    fn test_prose_wrapped_array_is_recovered() {
        let raw = "Sure. I found these: [{\"title\": \"A\", \"tags\": [\"x\"]}] Hope that helps.";
        let value = parse_json_payload(raw).unwrap();
        assert_eq!(value, json!([{"title": "A", "tags": ["x"]}]));
    }

    #[test]
    fn test_array_chosen_when_bracket_precedes_brace() {
        let raw = "[{\"a\": 1}, {\"a\": 2}]";
        assert_eq!(extract_json_payload(raw).unwrap(), raw);
    }

    #[test]
    fn test_object_chosen_when_brace_precedes_bracket() {
        let raw = "Analysis: {\"title\": \"A\", \"summary\": [\"p1\"]} done";
        assert_eq!(
            parse_json_payload(raw).unwrap(),
            json!({"title": "A", "summary": ["p1"]})
        );
    }

    #[test]
    fn test_unlabelled_fence_uses_delimiter_heuristic() {
        let raw = "```\n{\"title\": \"A\"}\n```";
        assert_eq!(extract_json_payload(raw).unwrap(), "{\"title\": \"A\"}");
    }

    #[test]
    fn test_missing_delimiters_fail() {
        assert!(matches!(extract_json_payload("I could not find anything."), Err(Error::Extraction(_))));
        assert!(matches!(extract_json_payload("   "), Err(Error::Extraction(_))));
    }

    #[test]
    fn test_unterminated_payload_fails() {
        assert!(matches!(extract_json_payload("[{\"title\": \"A\"}"), Err(Error::Extraction(_))));
        assert!(matches!(extract_json_payload("] then [ nothing"), Err(Error::Extraction(_))));
    }

    #[test]
    fn test_trailing_stray_delimiter_surfaces_as_parse_failure() {
        let raw = "[{\"title\": \"A\"}] (see [1]";
        assert!(extract_json_payload(raw).is_ok());
        assert!(matches!(parse_json_payload(raw), Err(Error::Extraction(_))));
    }
}
