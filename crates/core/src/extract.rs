//! Best-effort recovery of structured output from free-form model text.
//!
//! Language models are asked to answer with HTML or JSON but are not
//! guaranteed to comply: the payload may arrive wrapped in a fenced code
//! block, surrounded by prose, or not be well-formed at all. The functions
//! here maximise the chance of recovering structure without ever failing;
//! callers fall back to the raw text when nothing parseable is found.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Fenced code block with an optional language tag, capturing tag and body.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```([A-Za-z0-9_-]*)[ \t]*\r?\n([\s\S]*?)```").expect("valid regex")
});

/// Widest `{...}` span: first opening brace to last closing brace.
static JSON_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));

/// Extract an HTML document or fragment from model output.
///
/// Strips a fenced code block tagged `html` (or untagged) if one is
/// present; otherwise returns the trimmed input as-is. No validation of
/// the resulting markup is performed.
pub fn extract_html(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(caps) = FENCE_RE.captures(trimmed) {
        let tag = &caps[1];
        if tag.is_empty() || tag.eq_ignore_ascii_case("html") {
            return caps[2].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Extract a JSON value from model output.
///
/// Attempts, in order:
/// 1. parse the whole trimmed text as JSON;
/// 2. parse the body of a fenced code block tagged `json` (or untagged);
/// 3. parse the widest `{...}` span found anywhere in the text.
///
/// Returns the result of the first attempt that succeeds, or `None` when
/// all three fail. Never errors: malformed output is the expected case,
/// not the exceptional one.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(caps) = FENCE_RE.captures(trimmed) {
        let tag = &caps[1];
        if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
            if let Ok(value) = serde_json::from_str::<Value>(caps[2].trim()) {
                return Some(value);
            }
        }
    }

    if let Some(m) = JSON_SPAN_RE.find(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(m.as_str()) {
            return Some(value);
        }
    }

    None
}

/// Outcome of a structured-output recovery attempt.
///
/// Model output either yields a parsed JSON value or stays raw text; the
/// two cases are kept distinct so callers never handle an untyped blob.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelPayload {
    /// The text contained recoverable JSON.
    Parsed(Value),
    /// Nothing parseable was found; the trimmed text is preserved.
    Raw(String),
}

impl ModelPayload {
    /// Run [`extract_json`] over the text, keeping the raw text when no
    /// structure is recoverable.
    pub fn from_text(text: &str) -> Self {
        match extract_json(text) {
            Some(value) => ModelPayload::Parsed(value),
            None => ModelPayload::Raw(text.trim().to_string()),
        }
    }

    /// Collapse into a JSON value. Raw text is wrapped under a `raw` field
    /// so stored output is always an object-shaped payload.
    pub fn into_value(self) -> Value {
        match self {
            ModelPayload::Parsed(value) => value,
            ModelPayload::Raw(text) => serde_json::json!({ "raw": text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_bare_object_parses() {
        assert_eq!(extract_json("{\"a\":1}"), Some(json!({"a": 1})));
    }

    #[test]
    fn json_fenced_tagged_block_parses() {
        assert_eq!(
            extract_json("```json\n{\"a\":1}\n```"),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn json_fenced_untagged_block_parses() {
        assert_eq!(
            extract_json("```\n{\"a\": [1, 2]}\n```"),
            Some(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn json_embedded_in_prose_parses() {
        let text = "Here is the analysis you asked for:\n{\"insights\": []}\nLet me know!";
        assert_eq!(extract_json(text), Some(json!({"insights": []})));
    }

    #[test]
    fn json_non_json_text_is_absent() {
        assert_eq!(extract_json("hello world"), None);
    }

    #[test]
    fn json_unclosed_object_is_absent() {
        assert_eq!(extract_json("{\"a\": 1"), None);
    }

    #[test]
    fn html_fenced_block_is_stripped() {
        assert_eq!(extract_html("```html\n<div>x</div>\n```"), "<div>x</div>");
    }

    #[test]
    fn html_untagged_fence_is_stripped() {
        assert_eq!(
            extract_html("```\n<!DOCTYPE html><html></html>\n```"),
            "<!DOCTYPE html><html></html>"
        );
    }

    #[test]
    fn html_bare_document_passes_through_trimmed() {
        assert_eq!(
            extract_html("  <!DOCTYPE html><html></html>\n"),
            "<!DOCTYPE html><html></html>"
        );
    }

    #[test]
    fn html_foreign_fence_tag_is_left_alone() {
        let text = "```python\nprint('hi')\n```";
        assert_eq!(extract_html(text), text);
    }

    #[test]
    fn payload_wraps_raw_text_under_raw_field() {
        let payload = ModelPayload::from_text("not json at all");
        assert_eq!(payload.into_value(), json!({"raw": "not json at all"}));
    }

    #[test]
    fn payload_keeps_parsed_value() {
        let payload = ModelPayload::from_text("{\"ok\": true}");
        assert_eq!(payload, ModelPayload::Parsed(json!({"ok": true})));
    }
}
