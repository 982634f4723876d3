//! Loading the backend's comparison payload and deriving rendered views.

use crate::highlight::highlight;
use crate::models::{
    CandidateDocument, ComparisonReport, RenderedComparison, RenderedPane, Segment, Side, SortKey,
    SortOrder, StatusFilter,
};
use crate::rank::filter_and_sort;
use crate::segment::{sentence_count, word_count};
use chrono::Utc;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a comparison payload from a JSON string.
pub fn parse_report(json: &str) -> Result<ComparisonReport, ReportError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a comparison payload from a JSON file.
pub fn load_report(path: &Path) -> Result<ComparisonReport, ReportError> {
    let json = std::fs::read_to_string(path)?;
    parse_report(&json)
}

impl ComparisonReport {
    /// Segment partition of the subject document's content.
    pub fn subject_segments(&self) -> Vec<Segment> {
        highlight(
            &self.current_document.content,
            &self.detailed_matches,
            Side::Subject,
        )
    }

    /// Segment partition of the most-similar document's content.
    pub fn counterpart_segments(&self) -> Vec<Segment> {
        highlight(
            &self.most_similar_document.content,
            &self.detailed_matches,
            Side::Other,
        )
    }

    /// Candidate list filtered and ordered for display.
    pub fn ranked_candidates(
        &self,
        filter: StatusFilter,
        key: SortKey,
        order: SortOrder,
    ) -> Vec<CandidateDocument> {
        filter_and_sort(&self.matching_documents, filter, key, order)
    }

    /// Approximate sentence count of the subject document, the denominator
    /// for duplicate-rate displays.
    pub fn subject_sentence_count(&self) -> usize {
        sentence_count(&self.current_document.content)
    }

    /// Assemble the full rendered comparison: both panes highlighted, the
    /// candidate list ranked by duplicate rate, and a generation stamp.
    pub fn render(&self) -> RenderedComparison {
        RenderedComparison {
            generated_at: Utc::now().to_rfc3339(),
            overall_similarity: self.overall_similarity,
            subject: render_pane(
                &self.current_document.file_name,
                &self.current_document.author,
                self.current_document.word_count,
                &self.current_document.content,
                self.subject_segments(),
            ),
            counterpart: render_pane(
                &self.most_similar_document.file_name,
                &self.most_similar_document.author,
                self.most_similar_document.word_count,
                &self.most_similar_document.content,
                self.counterpart_segments(),
            ),
            candidates: self.ranked_candidates(
                StatusFilter::All,
                SortKey::DuplicateRate,
                SortOrder::Desc,
            ),
        }
    }
}

fn render_pane(
    file_name: &str,
    author: &str,
    reported_word_count: Option<usize>,
    content: &str,
    segments: Vec<Segment>,
) -> RenderedPane {
    RenderedPane {
        file_name: file_name.to_string(),
        author: author.to_string(),
        // Backend count wins when present; otherwise count locally
        word_count: reported_word_count.unwrap_or_else(|| word_count(content)),
        sentence_count: sentence_count(content),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "currentDocument": {
            "content": "The cat sat. Dogs bark loudly. Birds sing.",
            "fileName": "essay.txt",
            "fileSize": 42,
            "wordCount": 8,
            "duplicateRate": 35.0
        },
        "mostSimilarDocument": {
            "content": "Dogs bark loudly. Fish swim.",
            "fileName": "source.txt",
            "fileSize": 28,
            "author": "someone"
        },
        "detailedMatches": [
            {
                "id": 1,
                "documentId": 7,
                "originalText": "Dogs bark loudly.",
                "matchedText": "Dogs bark loudly.",
                "similarity": 92.0
            }
        ],
        "overallSimilarity": 35.0,
        "matchingDocuments": [
            {
                "id": 7,
                "fileName": "source.txt",
                "fileSize": 28,
                "fileType": "txt",
                "author": "someone",
                "uploadedAt": "2024-03-01T12:00:00Z",
                "duplicateRate": 35.0
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(report.detailed_matches.len(), 1);
        assert_eq!(report.matching_documents.len(), 1);
        assert_eq!(report.current_document.file_name, "essay.txt");
    }

    #[test]
    fn test_parse_invalid_json_errors() {
        assert!(matches!(parse_report("{not json"), Err(ReportError::Json(_))));
    }

    #[test]
    fn test_both_panes_highlighted() {
        let report = parse_report(SAMPLE).unwrap();

        let subject = report.subject_segments();
        assert!(subject.iter().any(|s| s.match_id() == Some(1)));
        let reconstructed: String = subject.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(reconstructed, report.current_document.content);

        let counterpart = report.counterpart_segments();
        assert!(counterpart.iter().any(|s| s.match_id() == Some(1)));
    }

    #[test]
    fn test_sentence_count() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(report.subject_sentence_count(), 3);
    }

    #[test]
    fn test_render_fills_word_count() {
        let report = parse_report(SAMPLE).unwrap();
        let rendered = report.render();

        // Subject carries the backend's count; counterpart omitted it
        assert_eq!(rendered.subject.word_count, 8);
        assert_eq!(rendered.counterpart.word_count, 5);
        assert_eq!(rendered.candidates.len(), 1);
        assert!(!rendered.generated_at.is_empty());
    }

    #[test]
    fn test_empty_payload_renders() {
        let report = parse_report("{}").unwrap();
        let rendered = report.render();
        assert!(rendered.subject.segments.is_empty());
        assert!(rendered.candidates.is_empty());
    }
}
