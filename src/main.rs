//! Dupview CLI
//!
//! Renders a detection backend's comparison payload into JSON, a
//! self-contained HTML viewer, or console summaries.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod highlight;
mod models;
mod output;
mod rank;
mod report;
mod scroll;
mod segment;

use models::{Side, SortKey, SortOrder, StatusFilter};
use output::{print_segments, print_summary, write_json_file, write_viewer_html_file};
use report::load_report;

#[derive(Parser)]
#[command(name = "dupview")]
#[command(about = "Render document duplicate-check comparison results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for rendered comparisons
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// JSON file with both panes' segment partitions
    Json,
    /// Self-contained dual-pane HTML viewer
    Viewer,
}

/// Status filter (CLI version, mirrors models::StatusFilter)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliStatusFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl From<CliStatusFilter> for StatusFilter {
    fn from(filter: CliStatusFilter) -> Self {
        match filter {
            CliStatusFilter::All => StatusFilter::All,
            CliStatusFilter::High => StatusFilter::High,
            CliStatusFilter::Medium => StatusFilter::Medium,
            CliStatusFilter::Low => StatusFilter::Low,
        }
    }
}

/// Sort key (CLI version, mirrors models::SortKey)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliSortKey {
    /// Duplicate rate (numeric)
    #[default]
    Rate,
    /// File name (lexicographic)
    Name,
    /// Upload date (chronological)
    Date,
}

impl From<CliSortKey> for SortKey {
    fn from(key: CliSortKey) -> Self {
        match key {
            CliSortKey::Rate => SortKey::DuplicateRate,
            CliSortKey::Name => SortKey::FileName,
            CliSortKey::Date => SortKey::UploadedAt,
        }
    }
}

/// Sort direction (CLI version, mirrors models::SortOrder)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliSortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<CliSortOrder> for SortOrder {
    fn from(order: CliSortOrder) -> Self {
        match order {
            CliSortOrder::Asc => SortOrder::Asc,
            CliSortOrder::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a comparison payload to JSON or an HTML viewer
    Render {
        /// Path to the comparison payload (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Output file path
        #[arg(long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Print first N subject segments to console
        #[arg(long)]
        show_segments: Option<usize>,

        /// Suppress summary output
        #[arg(long)]
        quiet: bool,
    },

    /// Print a summary of a comparison payload
    Summary {
        /// Path to the comparison payload (JSON)
        #[arg(long)]
        input: PathBuf,
    },

    /// List candidate documents, filtered and sorted
    Candidates {
        /// Path to the comparison payload (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Keep only candidates in this status tier
        #[arg(long, value_enum, default_value = "all")]
        status: CliStatusFilter,

        /// Sort key
        #[arg(long, value_enum, default_value = "rate")]
        sort_by: CliSortKey,

        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        order: CliSortOrder,
    },

    /// Benchmark highlighter performance
    Benchmark {
        /// Number of highlighting iterations
        #[arg(long, default_value = "1000")]
        iterations: usize,

        /// Text size in repeated sentences
        #[arg(long, default_value = "200")]
        size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            show_segments,
            quiet,
        } => {
            let report = load_report(&input)?;
            let rendered = report.render();

            match format {
                OutputFormat::Json => {
                    write_json_file(&rendered, &output)?;
                }
                OutputFormat::Viewer => {
                    let html_output = output.with_extension("html");
                    write_viewer_html_file(&rendered, &html_output)?;
                    if !quiet {
                        eprintln!("Viewer output: {}", html_output.display());
                    }
                }
            }

            if !quiet {
                print_summary(&report);
                eprintln!("\nOutput: {}", output.display());
            }

            if let Some(limit) = show_segments {
                println!("\n=== Subject Segments ===");
                print_segments(&rendered.subject.segments, Some(limit));
            }
        }

        Commands::Summary { input } => {
            let report = load_report(&input)?;
            print_summary(&report);
        }

        Commands::Candidates {
            input,
            status,
            sort_by,
            order,
        } => {
            let report = load_report(&input)?;
            let candidates =
                report.ranked_candidates(status.into(), sort_by.into(), order.into());

            println!(
                "{:>6}  {:<30}  {:>7}  {:<6}  {:<10}  author",
                "id", "file", "rate", "status", "uploaded"
            );
            for candidate in &candidates {
                println!("{}", output::format_candidate(candidate));
            }
            println!(
                "\n{} of {} candidates shown",
                candidates.len(),
                report.matching_documents.len()
            );
        }

        Commands::Benchmark { iterations, size } => {
            run_benchmark(iterations, size);
        }
    }

    Ok(())
}

/// Run a highlighting benchmark to measure throughput.
fn run_benchmark(iterations: usize, size: usize) {
    use models::Match;
    use std::time::Instant;

    println!("=== Highlight Benchmark ===");
    println!("Iterations: {}", iterations);
    println!("Sentences: {}", size);

    let text: String = (0..size)
        .map(|i| format!("Sentence number {} has some filler words. ", i))
        .collect();

    // Every tenth sentence is claimed by a match
    let matches: Vec<Match> = (0..size / 10)
        .map(|i| {
            let claimed = format!("Sentence number {} has some filler words.", i * 10);
            Match {
                id: i as u64,
                document_id: 1,
                original_text: claimed.clone(),
                matched_text: claimed,
                similarity: 85.0,
            }
        })
        .collect();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = highlight::highlight(&text, &matches, Side::Subject);
    }
    let elapsed = start.elapsed();
    let per_call = elapsed.as_secs_f64() / iterations as f64;

    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Per highlight: {:.3}ms", per_call * 1000.0);
    println!("  Highlights/sec: {:.0}", 1.0 / per_call);
}
