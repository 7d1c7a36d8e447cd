//! Extraction fallback matcher.
//!
//! Recovers individual fields from generation output that failed the strict
//! structural parse. Patterns are tried most-specific-first so looser ones
//! cannot over-capture trailing punctuation.

use regex::Regex;

/// Extract a single field value from raw backend text.
///
/// Tries, in order: a fully quoted key-value pair, an unquoted key with a
/// quoted value, and a quoted key with an unquoted comma/brace-terminated
/// value. Returns the first match's trimmed capture.
pub fn extract_field(text: &str, field: &str) -> Option<String> {
    let escaped = regex::escape(field);
    let patterns = [
        format!(r#"(?i)"{escaped}"\s*:\s*"([^"]+)""#),
        format!(r#"(?i){escaped}\s*:\s*"([^"]+)""#),
        format!(r#"(?i)"{escaped}"\s*:\s*([^,}}]+)"#),
    ];

    for pattern in &patterns {
        let Ok(regex) = Regex::new(pattern) else {
            continue;
        };
        if let Some(value) = regex.captures(text).and_then(|caps| caps.get(1)) {
            let trimmed = value.as_str().trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    None
}
