//! Client-side filtering and ordering of the candidate document list.

use crate::models::{CandidateDocument, SortKey, SortOrder, StatusFilter};
use std::cmp::Ordering;

/// Filter candidates by status tier, then sort by the chosen key and order.
///
/// Ties on the sort key break on ascending id, so the ordering is total,
/// deterministic, and idempotent. The input slice is not mutated; a new
/// ordered vec is returned.
pub fn filter_and_sort(
    candidates: &[CandidateDocument],
    filter: StatusFilter,
    key: SortKey,
    order: SortOrder,
) -> Vec<CandidateDocument> {
    let mut result: Vec<CandidateDocument> = candidates
        .iter()
        .filter(|c| filter.accepts(c.effective_status()))
        .cloned()
        .collect();

    result.sort_by(|a, b| compare(a, b, key, order));
    result
}

/// Three-way comparison on the sort key with an ascending-id tie-break.
fn compare(a: &CandidateDocument, b: &CandidateDocument, key: SortKey, order: SortOrder) -> Ordering {
    let primary = match key {
        SortKey::DuplicateRate => a.duplicate_rate.total_cmp(&b.duplicate_rate),
        SortKey::FileName => a.file_name.cmp(&b.file_name),
        SortKey::UploadedAt => a.uploaded_at.cmp(&b.uploaded_at),
    };

    let directed = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };

    directed.then_with(|| a.id.cmp(&b.id))
}
