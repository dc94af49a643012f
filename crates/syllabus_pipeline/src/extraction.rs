//! Utilities for extracting structured data from model replies.
//!
//! Replies often wrap the JSON in markdown fences or surround it with prose.
//! Extraction is a soft-failure operation: anything unusable yields `None`
//! and callers decide the fallback.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json|```").expect("Valid fence regex"));

/// Extract a JSON value from a reply that may contain fences or extra text.
///
/// Strips every ```` ```json ```` and ```` ``` ```` marker (case-insensitive),
/// trims, then slices from the first `{` to the last `}` when both exist.
///
/// # Examples
///
/// ```
/// use syllabus_pipeline::extract_json;
///
/// let reply = "Here's the course:\n```JSON\n{\"course\": {\"name\": \"Rust\"}}\n```\nEnjoy!";
/// let value = extract_json(reply).unwrap();
/// assert_eq!(value["course"]["name"], "Rust");
///
/// assert!(extract_json("no structure here").is_none());
/// ```
pub fn extract_json(text: &str) -> Option<Value> {
    let stripped = FENCE.replace_all(text, "");
    let mut candidate = stripped.trim();

    if let (Some(start), Some(end)) = (candidate.find('{'), candidate.rfind('}')) {
        if start < end {
            candidate = &candidate[start..=end];
        }
    }

    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, reply_length = text.len(), "JSON extraction failed");
            None
        }
    }
}

/// Extract and deserialize into `T`, `None` on any failure.
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use syllabus_pipeline::extract_as;
///
/// #[derive(Deserialize)]
/// struct Named { name: String }
///
/// let named: Named = extract_as("```json\n{\"name\": \"Closures\"}\n```").unwrap();
/// assert_eq!(named.name, "Closures");
/// ```
pub fn extract_as<T: DeserializeOwned>(text: &str) -> Option<T> {
    let value = extract_json(text)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(error = %e, "Extracted JSON has unexpected shape");
            None
        }
    }
}
