//! Output formatting for rendered comparisons (console, JSON, HTML viewer).

use crate::models::{CandidateDocument, ComparisonReport, RenderedComparison, Segment};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a rendered comparison as JSON.
pub fn write_json<W: Write>(
    rendered: &RenderedComparison,
    writer: &mut W,
) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(rendered)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a rendered comparison as JSON to a file.
pub fn write_json_file(rendered: &RenderedComparison, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(rendered, &mut file)
}

/// Pick a highlight color for a match id. The palette index is the id hash,
/// so a match keeps its color across both panes.
pub fn match_color(match_id: u64) -> &'static str {
    const PALETTE: [&str; 8] = [
        "#fef08a", "#bbf7d0", "#bfdbfe", "#fecaca", "#e9d5ff", "#fed7aa", "#a5f3fc", "#d9f99d",
    ];
    PALETTE[(match_id % PALETTE.len() as u64) as usize]
}

/// Print a summary of the comparison payload to stdout.
pub fn print_summary(report: &ComparisonReport) {
    println!("\n=== Comparison Summary ===");
    println!(
        "Subject: {} ({} bytes)",
        display_name(&report.current_document.file_name),
        report.current_document.file_size
    );
    println!(
        "Most similar: {} ({} bytes){}",
        display_name(&report.most_similar_document.file_name),
        report.most_similar_document.file_size,
        if report.most_similar_document.author.is_empty() {
            String::new()
        } else {
            format!(" by {}", report.most_similar_document.author)
        }
    );
    println!();
    println!("Overall similarity: {:.1}%", report.overall_similarity);
    println!("Detailed matches: {}", report.detailed_matches.len());
    println!("Subject sentences: {}", report.subject_sentence_count());
    println!("Candidate documents: {}", report.matching_documents.len());

    let mut high = 0usize;
    let mut medium = 0usize;
    let mut low = 0usize;
    for candidate in &report.matching_documents {
        match candidate.effective_status() {
            crate::models::DuplicateStatus::High => high += 1,
            crate::models::DuplicateStatus::Medium => medium += 1,
            crate::models::DuplicateStatus::Low => low += 1,
        }
    }
    println!("  high: {}  medium: {}  low: {}", high, medium, low);
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

/// Print segments in a human-readable format, tagged runs bracketed with
/// their match id.
pub fn print_segments(segments: &[Segment], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &segments[..n.min(segments.len())],
        None => segments,
    };

    for segment in to_print {
        match &segment.highlight {
            Some(tag) => println!(
                "[match {} {:.0}%] {}",
                tag.match_id,
                tag.similarity,
                truncate_text(&segment.text, 100)
            ),
            None => println!("[plain] {}", truncate_text(&segment.text, 100)),
        }
    }

    if let Some(n) = limit {
        if segments.len() > n {
            println!("... and {} more segments", segments.len() - n);
        }
    }
}

/// Format a candidate row for the console table.
pub fn format_candidate(candidate: &CandidateDocument) -> String {
    format!(
        "{:>6}  {:<30}  {:>6.1}%  {:<6}  {}  {}",
        candidate.id,
        truncate_text(&candidate.file_name, 30),
        candidate.duplicate_rate,
        candidate.effective_status().as_str(),
        candidate.uploaded_at.format("%Y-%m-%d"),
        display_name(&candidate.author),
    )
}

/// Truncate text to a maximum length, adding ellipsis if needed.
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

// ============================================================================
// HTML viewer generation
// ============================================================================

/// Generate a self-contained dual-pane HTML viewer for a rendered
/// comparison.
///
/// The page embeds the rendered JSON and builds both panes in vanilla JS:
/// marks colored by match-id hash, synchronized scrolling with a
/// feedback-suppression flag, and click-to-jump from a highlighted run to
/// its companion in the other pane.
pub fn generate_viewer_html(rendered: &RenderedComparison) -> String {
    let data_json = serde_json::to_string(rendered).unwrap_or_else(|_| "{}".to_string());

    // Escape any </script> tags in the JSON to prevent breaking the HTML
    let escaped_json = data_json.replace("</script>", "<\\/script>");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dupview - {subject} vs {counterpart}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; }}
        header {{ padding: 12px 20px; background: #1e293b; color: #f1f5f9; }}
        header .meta {{ font-size: 0.85rem; color: #94a3b8; }}
        .panes {{ display: flex; gap: 12px; padding: 12px; }}
        .pane {{ flex: 1; height: 70vh; overflow-y: auto; background: #fff;
                 border: 1px solid #e2e8f0; border-radius: 6px; padding: 16px;
                 line-height: 1.7; white-space: pre-wrap; }}
        .pane h2 {{ font-size: 1rem; margin-top: 0; }}
        mark {{ border-radius: 3px; padding: 1px 2px; cursor: pointer; }}
        table {{ margin: 0 12px 20px; border-collapse: collapse; font-size: 0.9rem; }}
        th, td {{ padding: 6px 12px; border-bottom: 1px solid #e2e8f0; text-align: left; }}
        .status-high {{ color: #dc2626; }}
        .status-medium {{ color: #ca8a04; }}
        .status-low {{ color: #16a34a; }}
    </style>
</head>
<body>
    <header>
        <strong>Overall similarity: {overall:.1}%</strong>
        <div class="meta">Generated {generated}</div>
    </header>
    <div class="panes">
        <div class="pane" id="subject-pane"><h2>{subject}</h2><div id="subject-text"></div></div>
        <div class="pane" id="counterpart-pane"><h2>{counterpart}</h2><div id="counterpart-text"></div></div>
    </div>
    <table id="candidates">
        <thead><tr><th>File</th><th>Rate</th><th>Status</th><th>Uploaded</th><th>Author</th></tr></thead>
        <tbody></tbody>
    </table>
    <script id="dupview-data" type="application/json">{data}</script>
    <script>
        const data = JSON.parse(document.getElementById('dupview-data').textContent);
        const palette = ['#fef08a','#bbf7d0','#bfdbfe','#fecaca','#e9d5ff','#fed7aa','#a5f3fc','#d9f99d'];

        function buildPane(containerId, segments) {{
            const container = document.getElementById(containerId);
            for (const segment of segments) {{
                if (segment.highlight) {{
                    const mark = document.createElement('mark');
                    mark.textContent = segment.text;
                    mark.style.backgroundColor = palette[segment.highlight.matchId % palette.length];
                    mark.dataset.matchId = segment.highlight.matchId;
                    mark.title = 'match ' + segment.highlight.matchId + ' (' +
                        segment.highlight.similarity.toFixed(0) + '%)';
                    container.appendChild(mark);
                }} else {{
                    container.appendChild(document.createTextNode(segment.text));
                }}
            }}
        }}

        buildPane('subject-text', data.subject.segments);
        buildPane('counterpart-text', data.counterpart.segments);

        const tbody = document.querySelector('#candidates tbody');
        for (const c of data.candidates) {{
            const status = c.status || (c.duplicateRate >= 70 ? 'high' : c.duplicateRate >= 40 ? 'medium' : 'low');
            const row = document.createElement('tr');
            row.innerHTML = '<td>' + c.fileName + '</td><td>' + c.duplicateRate.toFixed(1) +
                '%</td><td class="status-' + status + '">' + status + '</td><td>' +
                c.uploadedAt + '</td><td>' + (c.author || '') + '</td>';
            tbody.appendChild(row);
        }}

        // Scroll-fraction sync with feedback suppression
        const subjectPane = document.getElementById('subject-pane');
        const counterpartPane = document.getElementById('counterpart-pane');
        let syncing = false;

        function syncScroll(source, target) {{
            if (syncing) {{ syncing = false; return; }}
            const sourceSpan = source.scrollHeight - source.clientHeight;
            const targetSpan = target.scrollHeight - target.clientHeight;
            if (sourceSpan <= 0 || targetSpan <= 0) return;
            syncing = true;
            target.scrollTop = (source.scrollTop / sourceSpan) * targetSpan;
        }}

        subjectPane.addEventListener('scroll', () => syncScroll(subjectPane, counterpartPane));
        counterpartPane.addEventListener('scroll', () => syncScroll(counterpartPane, subjectPane));

        // Click a highlighted run to jump the other pane to its companion
        function jumpToCompanion(event, companionPane) {{
            const matchId = event.target.dataset.matchId;
            if (matchId === undefined) return;
            const companion = companionPane.querySelector('mark[data-match-id="' + matchId + '"]');
            if (companion) {{
                syncing = true;
                companion.scrollIntoView({{ behavior: 'smooth', block: 'center' }});
            }}
        }}

        subjectPane.addEventListener('click', (e) => jumpToCompanion(e, counterpartPane));
        counterpartPane.addEventListener('click', (e) => jumpToCompanion(e, subjectPane));
    </script>
</body>
</html>
"##,
        subject = html_escape(display_name(&rendered.subject.file_name)),
        counterpart = html_escape(display_name(&rendered.counterpart.file_name)),
        overall = rendered.overall_similarity,
        generated = html_escape(&rendered.generated_at),
        data = escaped_json,
    )
}

/// Write the HTML viewer to a file.
pub fn write_viewer_html_file(
    rendered: &RenderedComparison,
    path: &Path,
) -> Result<(), OutputError> {
    let html = generate_viewer_html(rendered);
    std::fs::write(path, html)?;
    Ok(())
}

/// Minimal HTML escaping for text interpolated outside the JSON island.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RenderedPane, Segment};

    fn sample_rendered() -> RenderedComparison {
        RenderedComparison {
            generated_at: "2024-03-01T12:00:00+00:00".to_string(),
            overall_similarity: 42.0,
            subject: RenderedPane {
                file_name: "essay.txt".to_string(),
                author: String::new(),
                word_count: 8,
                sentence_count: 3,
                segments: vec![Segment {
                    text: "hello".to_string(),
                    highlight: None,
                }],
            },
            counterpart: RenderedPane {
                file_name: "source.txt".to_string(),
                author: "someone".to_string(),
                word_count: 5,
                sentence_count: 2,
                segments: Vec::new(),
            },
            candidates: Vec::new(),
        }
    }

    #[test]
    fn test_write_json_roundtrip() {
        let rendered = sample_rendered();
        let mut buf = Vec::new();
        write_json(&rendered, &mut buf).unwrap();

        let back: RenderedComparison = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back.overall_similarity, 42.0);
        assert_eq!(back.subject.segments.len(), 1);
    }

    #[test]
    fn test_match_color_stable_across_panes() {
        assert_eq!(match_color(3), match_color(3));
        // Wraps around the palette
        assert_eq!(match_color(1), match_color(9));
    }

    #[test]
    fn test_viewer_html_contains_panes_and_data() {
        let html = generate_viewer_html(&sample_rendered());
        assert!(html.contains("subject-pane"));
        assert!(html.contains("counterpart-pane"));
        assert!(html.contains("essay.txt"));
        assert!(html.contains("dupview-data"));
        assert!(html.contains("syncScroll"));
    }

    #[test]
    fn test_viewer_html_escapes_script_close() {
        let mut rendered = sample_rendered();
        rendered.subject.segments[0].text = "</script><b>".to_string();
        let html = generate_viewer_html(&rendered);
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn test_format_candidate_contains_status() {
        let candidate = CandidateDocument {
            id: 7,
            file_name: "source.txt".to_string(),
            file_size: 28,
            file_type: "txt".to_string(),
            author: "someone".to_string(),
            uploaded_at: chrono::Utc::now(),
            duplicate_rate: 85.0,
            status: None,
        };
        let line = format_candidate(&candidate);
        assert!(line.contains("source.txt"));
        assert!(line.contains("high"));
    }
}
