//! Display-safe value strings.
//!
//! Default object representations embed a memory address
//! (`<Foo object at 0x7f3a2c1d0e50>`). The address differs between two
//! otherwise identical objects, so it is stripped before values are compared
//! or shown.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn address_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^<(?P<description>.*) at 0x[0-9A-Fa-f]{1,16}>$").ok())
        .as_ref()
}

/// Strip a trailing memory address from a default object representation.
///
/// Any other string is returned unchanged, as is every string when the
/// pattern is unavailable.
pub fn canonicalize(raw: &str) -> String {
    let Some(pattern) = address_pattern() else {
        return raw.to_string();
    };
    match pattern.captures(raw) {
        Some(caps) => format!("<{}>", &caps["description"]),
        None => raw.to_string(),
    }
}

/// Canonical display string for a local's value.
///
/// Strings are taken as the host's own display form; any other JSON value
/// is shown in compact JSON notation.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => canonicalize(s),
        other => canonicalize(&other.to_string()),
    }
}
