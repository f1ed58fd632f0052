//! Token name normalization.
//!
//! Designers name styles and variables hierarchically (`"Primary/Blue/500"`).
//! Tokens are keyed by a flat, lowercase, hyphenated form of that path
//! (`"primary-blue-500"`).

/// Flatten a slash-delimited style/variable name into a token name.
///
/// Each segment is trimmed and sanitized on its own, then the segments are
/// joined with `-`. Empty or fully non-alphanumeric input yields an empty
/// string.
pub fn normalize_token_name(name: &str) -> String {
    name.split('/')
        .map(str::trim)
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Lowercase, replace anything outside `[a-z0-9]` with `-`, collapse runs of
/// `-` and strip them from both ends.
pub fn sanitize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for ch in segment.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            ch
        } else {
            '-'
        };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }
    out.trim_matches('-').to_string()
}
