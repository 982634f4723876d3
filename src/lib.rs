//! Dupview Comparison Rendering Library
//!
//! Rendering core for document duplicate-check results. Takes the detection
//! backend's comparison payload and turns it into displayable structure:
//! a lossless highlighted partition of both documents, synchronized
//! dual-pane scroll offsets, and a filtered, ordered candidate list.
//!
//! # Example
//!
//! ```
//! use dupview::prelude::*;
//!
//! let text = "The cat sat. The cat sat. Dogs bark.";
//! let matches = vec![Match {
//!     id: 1,
//!     document_id: 7,
//!     original_text: "The cat sat.".to_string(),
//!     matched_text: "The cat sat.".to_string(),
//!     similarity: 90.0,
//! }];
//!
//! let segments = highlight(text, &matches, Side::Subject);
//!
//! // Lossless partition: only the first occurrence is tagged
//! assert_eq!(segments.len(), 2);
//! assert!(segments[0].is_highlighted());
//! let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
//! assert_eq!(rebuilt, text);
//! ```
//!
//! # Payload Example
//!
//! ```no_run
//! use dupview::prelude::*;
//! use std::path::Path;
//!
//! let report = load_report(Path::new("comparison.json")).unwrap();
//! let rendered = report.render();
//! write_viewer_html_file(&rendered, Path::new("viewer.html")).unwrap();
//! ```

pub mod highlight;
pub mod models;
pub mod output;
pub mod rank;
pub mod report;
pub mod scroll;
pub mod segment;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::highlight::{
        companion_fraction, find_companion_segment, highlight, segment_offsets,
    };
    pub use crate::models::{
        CandidateDocument, ComparisonReport, DocumentProfile, DuplicateStatus, HighlightTag,
        Match, RenderedComparison, RenderedPane, Segment, Side, SortKey, SortOrder, StatusFilter,
    };
    pub use crate::output::{
        format_candidate, generate_viewer_html, match_color, print_segments, print_summary,
        write_json, write_json_file, write_viewer_html_file, OutputError,
    };
    pub use crate::rank::filter_and_sort;
    pub use crate::report::{load_report, parse_report, ReportError};
    pub use crate::scroll::{
        scroll_top_for_fraction, target_scroll_top, PaneGeometry, ScrollSync,
    };
    pub use crate::segment::{sentence_count, split_sentences, word_count};
}

// Re-export commonly used types at the crate root
pub use models::{ComparisonReport, Match, RenderedComparison, Segment, Side};
