//! Title and artist normalization
//!
//! Produces the fuzzy match key: lowercase, parenthesized/bracketed segments
//! stripped, non-alphanumeric runs collapsed to single spaces. The result is
//! already in normal form, so normalizing twice is a no-op.

use provider_spotify::Track;

/// Normalize a title or artist name for fuzzy matching
pub fn normalize(value: &str) -> String {
    let lowered = value.to_lowercase();
    let stripped = strip_enclosed(&strip_enclosed(&lowered, '(', ')'), '[', ']');
    collapse_non_alphanumeric(&stripped)
}

/// Fuzzy match key for a track: normalized title `|` normalized primary
/// artist name
pub fn match_key(track: &Track) -> String {
    let primary = track
        .primary_artist()
        .map(|artist| artist.name.as_str())
        .unwrap_or("");
    format!("{}|{}", normalize(&track.name), normalize(primary))
}

/// Drop every shortest `open`..`close` segment; an opener with no closer
/// stays as plain text and gets collapsed later
fn strip_enclosed(value: &str, open: char, close: char) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find(open) {
        let after_open = start + open.len_utf8();
        match rest[after_open..].find(close) {
            Some(offset) => {
                result.push_str(&rest[..start]);
                rest = &rest[after_open + offset + close.len_utf8()..];
            }
            None => break,
        }
    }

    result.push_str(rest);
    result
}

/// Collapse every non-alphanumeric run to a single interior space
fn collapse_non_alphanumeric(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut pending_space = false;

    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !result.is_empty() {
                result.push(' ');
            }
            pending_space = false;
            result.push(ch);
        } else {
            pending_space = true;
        }
    }

    result
}
