//! JSON syntax check for untrusted descriptor files

use serde::de::IgnoredAny;

/// Whether `content` is syntactically valid JSON
///
/// The value is skipped while parsing, never built.
pub fn is_valid_json(content: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(content).is_ok()
}
