//! Paragraph segmentation for few-shot prompt text.
//!
//! A paragraph is a run of text bounded by two or more consecutive newlines
//! (or the start/end of the text), trimmed of surrounding whitespace. Empty
//! segments are dropped rather than kept as placeholders.

use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("paragraph break pattern is valid"));

/// Split `text` into ordered, trimmed, non-empty paragraphs.
///
/// Returns an empty vector only when `text` is entirely whitespace.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
