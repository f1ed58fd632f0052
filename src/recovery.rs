//! Recovery of a JSON document embedded in free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{DtxError, Result};

static FENCED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("fenced block pattern is valid")
});

/// Parse the JSON a model embedded in `text`.
///
/// Candidates are tried in order and the first one that parses wins:
/// the whole text, the first fenced code block holding `{...}`, and the span
/// from the first `{` to the last `}`. Nothing partial is ever returned.
pub fn parse_json_from_response(text: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    if let Some(block) = FENCED_OBJECT
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        match serde_json::from_str(block.as_str()) {
            Ok(value) => return Ok(value),
            Err(err) => log::debug!("fenced block in model response is not valid JSON: {err}"),
        }
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => serde_json::from_str(&text[start..=end])
            .map_err(|err| {
                DtxError::response_parse(
                    format!("Could not parse JSON from AI response: {err}"),
                    text,
                )
            }),
        _ => Err(DtxError::response_parse(
            "No valid JSON found in AI response",
            text,
        )),
    }
}
