//! Reported-size parsing
//!
//! Parses the `"<width>x<height>"` string a page returns from a size
//! probe or injection script.

use crate::error::{ViewportError, ViewportResult};

/// Size a page reported for its rendered viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportReport {
    /// Reported width in CSS pixels
    pub width: u32,
    /// Reported height in CSS pixels
    pub height: u32,
}

/// Parse a reported size of the form `"<width>x<height>"`.
///
/// Script-evaluation callbacks hand results back JSON-encoded, so one
/// layer of surrounding double quotes is tolerated. Both components must
/// be non-negative integers; anything else is a `MalformedReport`.
/// Callers treat that as non-fatal and keep the last known-good report.
pub fn parse_reported_size(raw: &str) -> ViewportResult<ViewportReport> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);

    let malformed = || ViewportError::MalformedReport(raw.to_string());

    let (width, height) = unquoted.split_once('x').ok_or_else(malformed)?;
    Ok(ViewportReport {
        width: parse_component(width).ok_or_else(malformed)?,
        height: parse_component(height).ok_or_else(malformed)?,
    })
}

/// Parse one dimension: digits only, no sign, no second separator
fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
