//! Turns raw model output into a validated JSON value.
//!
//! Extraction is deterministic: strip fence markers, attempt a strict
//! parse, fall back to a single repair pass, then check the top-level
//! shape once at the coercion boundary. Two caller policies exist:
//! the object path (protocol, extraction, narrative, manuscript) treats
//! every failure as fatal; the array path (batch classification)
//! soft-fails unusable output to zero records for that batch.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::repair::repair_json;
use super::LlmError;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json").expect("valid fence pattern"));

/// Raw output of one model call: free text, or a payload the provider
/// already returned as structured JSON.
#[derive(Debug, Clone)]
pub enum RawModelOutput {
    Text(String),
    Structured(Value),
}

/// A parsed model output, discriminated once by top-level shape.
#[derive(Debug, Clone)]
pub enum ExtractedValue {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    Invalid(Value),
}

impl From<Value> for ExtractedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ExtractedValue::Object(map),
            Value::Array(items) => ExtractedValue::Array(items),
            other => ExtractedValue::Invalid(other),
        }
    }
}

impl ExtractedValue {
    /// Name of the top-level shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractedValue::Object(_) => "object",
            ExtractedValue::Array(_) => "array",
            ExtractedValue::Invalid(Value::String(_)) => "string",
            ExtractedValue::Invalid(Value::Number(_)) => "number",
            ExtractedValue::Invalid(Value::Bool(_)) => "boolean",
            ExtractedValue::Invalid(_) => "null",
        }
    }

    pub fn into_object(self) -> Result<Map<String, Value>, LlmError> {
        match self {
            ExtractedValue::Object(map) => Ok(map),
            other => Err(LlmError::UnexpectedShape {
                expected: "object",
                found: other.kind(),
            }),
        }
    }

    pub fn into_array(self) -> Result<Vec<Value>, LlmError> {
        match self {
            ExtractedValue::Array(items) => Ok(items),
            other => Err(LlmError::UnexpectedShape {
                expected: "array",
                found: other.kind(),
            }),
        }
    }
}

/// Strip code-fence markers the model wraps its JSON in: every
/// case-insensitive "```json" marker and every bare "```" marker.
fn strip_fence_markers(text: &str) -> String {
    JSON_FENCE
        .replace_all(text, "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse raw model output into a JSON value.
///
/// Already-structured payloads pass through unchanged. Text is cleaned,
/// strictly parsed, and on a syntax error repaired exactly once. The
/// `MalformedOutput` error carries the original raw text for diagnostics.
pub fn extract_value(raw: RawModelOutput) -> Result<Value, LlmError> {
    let text = match raw {
        RawModelOutput::Structured(value) => return Ok(value),
        RawModelOutput::Text(text) => text,
    };
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let cleaned = strip_fence_markers(&text);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(parse_err) => {
            tracing::debug!(error = %parse_err, "strict parse failed, attempting repair");
            let repaired = repair_json(&cleaned);
            serde_json::from_str(&repaired).map_err(|repair_err| {
                tracing::warn!(error = %repair_err, "repair pass also failed");
                LlmError::MalformedOutput { raw: text }
            })
        }
    }
}

/// Object path: extraction plus a hard top-level shape check. Used by
/// the single-shot tasks, where any failure surfaces to the caller.
pub fn extract_object(raw: RawModelOutput) -> Result<Map<String, Value>, LlmError> {
    ExtractedValue::from(extract_value(raw)?).into_object()
}

/// Array path: extraction for the batch classification loop.
///
/// Output that is unparsable after repair, or parses to a non-array,
/// contributes zero records for the batch instead of aborting the
/// caller. An empty response and provider failures stay fatal.
pub fn extract_records(raw: RawModelOutput) -> Result<Vec<Value>, LlmError> {
    let value = match extract_value(raw) {
        Ok(value) => value,
        Err(LlmError::MalformedOutput { raw }) => {
            tracing::warn!(
                raw_len = raw.len(),
                "batch output unparsable after repair, contributing no records"
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };
    match ExtractedValue::from(value) {
        ExtractedValue::Array(items) => Ok(items),
        other => {
            tracing::warn!(
                found = other.kind(),
                "batch output is not a JSON array, contributing no records"
            );
            Ok(Vec::new())
        }
    }
}
