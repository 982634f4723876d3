//! Match highlighting: partitioning text into plain and tagged runs.
//!
//! This is the core of the rendering pipeline. Given a text and the
//! backend's match list, it produces a lossless partition of the text into
//! maximal segments, each carrying at most one match tag.
//!
//! The overlap policy is first-match-wins in input order: earlier matches
//! claim characters first, and each match tags at most its first occurrence
//! that lies entirely within still-unclaimed characters. Repeated phrases
//! are therefore only ever marked once per match, a known limitation of the
//! observed behavior that is preserved deliberately.

use crate::models::{HighlightTag, Match, Segment, Side};

/// Partition `text` into segments, tagging spans claimed by `matches`.
///
/// Matches are processed in input order, not sorted by position or length.
/// For each match, the first left-to-right occurrence of its
/// side-appropriate substring that lies entirely within untagged characters
/// is tagged; later occurrences are left alone even if untagged positions
/// remain. A match whose substring is empty, absent, or only overlaps
/// already-tagged regions is skipped silently.
///
/// The function is pure and total: it never fails, and concatenating the
/// returned segments' text reproduces `text` exactly.
pub fn highlight(text: &str, matches: &[Match], side: Side) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    // One tag slot per character
    let mut tags: Vec<Option<HighlightTag>> = vec![None; chars.len()];

    for m in matches {
        let needle: Vec<char> = m.text_for(side).chars().collect();
        if let Some(start) = find_untagged_occurrence(&chars, &tags, &needle) {
            let tag = HighlightTag {
                match_id: m.id,
                similarity: m.similarity,
                side,
            };
            for slot in &mut tags[start..start + needle.len()] {
                *slot = Some(tag.clone());
            }
        }
    }

    collect_runs(&chars, &tags)
}

/// Find the first occurrence of `needle` in `chars` whose span is entirely
/// untagged, scanning left to right from position 0.
fn find_untagged_occurrence(
    chars: &[char],
    tags: &[Option<HighlightTag>],
    needle: &[char],
) -> Option<usize> {
    if needle.is_empty() || needle.len() > chars.len() {
        return None;
    }

    let last_start = chars.len() - needle.len();
    'scan: for start in 0..=last_start {
        for (i, &c) in needle.iter().enumerate() {
            if chars[start + i] != c || tags[start + i].is_some() {
                continue 'scan;
            }
        }
        return Some(start);
    }

    None
}

/// Walk the tag array and group consecutive characters with identical tag
/// identity into maximal segments.
fn collect_runs(chars: &[char], tags: &[Option<HighlightTag>]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start = 0usize;

    for i in 1..=chars.len() {
        let boundary = i == chars.len() || !same_identity(&tags[i - 1], &tags[i]);
        if boundary {
            segments.push(Segment {
                text: chars[run_start..i].iter().collect(),
                highlight: tags[run_start].clone(),
            });
            run_start = i;
        }
    }

    segments
}

/// Tag identity: both untagged, or tagged with the same match id.
fn same_identity(a: &Option<HighlightTag>, b: &Option<HighlightTag>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.match_id == y.match_id,
        _ => false,
    }
}

/// Index of the first segment carrying `match_id`, if any.
///
/// This is the companion-pane lookup: clicking a highlighted run in one
/// pane locates the segment with the same match id in the other pane.
pub fn find_companion_segment(segments: &[Segment], match_id: u64) -> Option<usize> {
    segments.iter().position(|s| s.match_id() == Some(match_id))
}

/// Character offset of each segment's start within the reconstructed text.
pub fn segment_offsets(segments: &[Segment]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(segments.len());
    let mut offset = 0usize;
    for segment in segments {
        offsets.push(offset);
        offset += segment.text.chars().count();
    }
    offsets
}

/// Position of the first segment carrying `match_id`, as a fraction of the
/// total text length. Feeds the scroll synchronizer when jumping the
/// companion pane to a clicked match.
///
/// Returns `None` when the id is absent or the text is empty.
pub fn companion_fraction(segments: &[Segment], match_id: u64) -> Option<f64> {
    let idx = find_companion_segment(segments, match_id)?;
    let offsets = segment_offsets(segments);
    let total: usize = segments.iter().map(|s| s.text.chars().count()).sum();
    if total == 0 {
        return None;
    }
    Some(offsets[idx] as f64 / total as f64)
}
