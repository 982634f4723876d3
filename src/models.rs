//! Data structures for the dupview rendering pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the two compared documents a highlighted span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The document under inspection.
    Subject,
    /// The most-similar counterpart document.
    Other,
}

/// A claimed correspondence between a span of the subject text and a span
/// of another document, as reported by the detection backend.
///
/// `similarity` is a property of the match itself; it is never recomputed
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    pub document_id: u64,
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub matched_text: String,
    /// Percentage, 0-100.
    #[serde(default)]
    pub similarity: f32,
}

impl Match {
    /// The side-appropriate substring this match claims.
    pub fn text_for(&self, side: Side) -> &str {
        match side {
            Side::Subject => &self.original_text,
            Side::Other => &self.matched_text,
        }
    }
}

/// Highlight identity attached to a tagged run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightTag {
    pub match_id: u64,
    pub similarity: f32,
    pub side: Side,
}

/// One contiguous run of rendered text, either plain or carrying exactly
/// one match tag.
///
/// Invariants maintained by the highlighter:
/// - concatenating all segments' `text` in order reproduces the input exactly
/// - runs are maximal: adjacent segments never share the same tag identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightTag>,
}

impl Segment {
    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    /// The match id carried by this segment, if any.
    pub fn match_id(&self) -> Option<u64> {
        self.highlight.as_ref().map(|h| h.match_id)
    }
}

/// Derived severity tier for a candidate document's duplicate rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStatus {
    High,
    Medium,
    Low,
}

impl DuplicateStatus {
    /// Tier a duplicate rate (0-100): >= 70 high, >= 40 medium, else low.
    pub fn from_rate(rate: f32) -> Self {
        if rate >= 70.0 {
            DuplicateStatus::High
        } else if rate >= 40.0 {
            DuplicateStatus::Medium
        } else {
            DuplicateStatus::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateStatus::High => "high",
            DuplicateStatus::Medium => "medium",
            DuplicateStatus::Low => "low",
        }
    }
}

/// A row in the "documents matching this subject" list.
///
/// Read-only snapshot per comparison request; sorted and filtered but never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDocument {
    pub id: u64,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "epoch")]
    pub uploaded_at: DateTime<Utc>,
    /// Percentage, 0-100.
    #[serde(default)]
    pub duplicate_rate: f32,
    /// Tier supplied by the backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DuplicateStatus>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl CandidateDocument {
    /// The backend-supplied tier when present, otherwise derived from the
    /// duplicate rate.
    pub fn effective_status(&self) -> DuplicateStatus {
        self.status
            .unwrap_or_else(|| DuplicateStatus::from_rate(self.duplicate_rate))
    }
}

/// Status filter for the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl StatusFilter {
    /// Whether a candidate passes this filter.
    pub fn accepts(&self, status: DuplicateStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::High => status == DuplicateStatus::High,
            StatusFilter::Medium => status == DuplicateStatus::Medium,
            StatusFilter::Low => status == DuplicateStatus::Low,
        }
    }
}

/// Sort key for the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DuplicateRate,
    FileName,
    UploadedAt,
}

/// Sort direction for the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Document metadata and content as carried in the comparison payload.
///
/// Covers both `currentDocument` and `mostSimilarDocument`; every field the
/// backend may omit defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProfile {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_rate: Option<f32>,
}

/// The full comparison payload produced by the detection backend.
///
/// Treated as trusted input: similarity bounds are not validated and
/// missing fields substitute empty defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    #[serde(default)]
    pub current_document: DocumentProfile,
    #[serde(default)]
    pub most_similar_document: DocumentProfile,
    #[serde(default)]
    pub detailed_matches: Vec<Match>,
    #[serde(default)]
    pub overall_similarity: f32,
    #[serde(default)]
    pub matching_documents: Vec<CandidateDocument>,
}

/// One rendered pane: document metadata plus its segment partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPane {
    pub file_name: String,
    pub author: String,
    pub word_count: usize,
    pub sentence_count: usize,
    pub segments: Vec<Segment>,
}

/// Full rendered comparison: both panes, the ranked candidate list, and a
/// generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedComparison {
    pub generated_at: String,
    pub overall_similarity: f32,
    pub subject: RenderedPane,
    pub counterpart: RenderedPane,
    pub candidates: Vec<CandidateDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tiers() {
        assert_eq!(DuplicateStatus::from_rate(100.0), DuplicateStatus::High);
        assert_eq!(DuplicateStatus::from_rate(70.0), DuplicateStatus::High);
        assert_eq!(DuplicateStatus::from_rate(69.9), DuplicateStatus::Medium);
        assert_eq!(DuplicateStatus::from_rate(40.0), DuplicateStatus::Medium);
        assert_eq!(DuplicateStatus::from_rate(39.9), DuplicateStatus::Low);
        assert_eq!(DuplicateStatus::from_rate(0.0), DuplicateStatus::Low);
    }

    #[test]
    fn test_effective_status_prefers_backend_tier() {
        let mut candidate = CandidateDocument {
            id: 1,
            file_name: "a.txt".to_string(),
            file_size: 10,
            file_type: "txt".to_string(),
            author: String::new(),
            uploaded_at: Utc::now(),
            duplicate_rate: 90.0,
            status: Some(DuplicateStatus::Low),
        };

        // Backend tier wins even when it disagrees with the rate
        assert_eq!(candidate.effective_status(), DuplicateStatus::Low);

        candidate.status = None;
        assert_eq!(candidate.effective_status(), DuplicateStatus::High);
    }

    #[test]
    fn test_match_text_for_side() {
        let m = Match {
            id: 1,
            document_id: 2,
            original_text: "subject span".to_string(),
            matched_text: "other span".to_string(),
            similarity: 80.0,
        };

        assert_eq!(m.text_for(Side::Subject), "subject span");
        assert_eq!(m.text_for(Side::Other), "other span");
    }

    #[test]
    fn test_status_filter() {
        assert!(StatusFilter::All.accepts(DuplicateStatus::Low));
        assert!(StatusFilter::High.accepts(DuplicateStatus::High));
        assert!(!StatusFilter::High.accepts(DuplicateStatus::Medium));
        assert!(!StatusFilter::Low.accepts(DuplicateStatus::High));
    }

    #[test]
    fn test_report_tolerates_missing_fields() {
        let report: ComparisonReport = serde_json::from_str("{}").unwrap();
        assert!(report.current_document.content.is_empty());
        assert!(report.detailed_matches.is_empty());
        assert!(report.matching_documents.is_empty());
        assert_eq!(report.overall_similarity, 0.0);
    }
}
