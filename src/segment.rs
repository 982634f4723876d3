//! Naive sentence segmentation for duplicate-rate denominators.
//!
//! The splitter is intentionally simple: it breaks on runs of `.`, `!`, and
//! `?` with no abbreviation or locale handling. It exists to produce an
//! approximate "total sentences" count for rate displays, not to drive
//! matching.

/// Split text into sentence-like units.
///
/// Runs of terminators collapse because the empty pieces between them are
/// trimmed away. Never fails; empty input yields an empty vec.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of sentence-like units in the text.
pub fn sentence_count(text: &str) -> usize {
    text.split(|c| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .count()
}

/// Whitespace-delimited word count, used to fill a missing word count in
/// the payload.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
