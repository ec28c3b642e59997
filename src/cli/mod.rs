//! # CLI Module
//!
//! Command-line front end: applies the batch limits, runs the pipeline and
//! prints or exports the report.
//!
//! ## Usage
//! ```bash
//! # Find duplicates among a handful of files
//! image-dedup scan a.png b.png c.jpg
//!
//! # Full report with thumbnails as JSON
//! image-dedup scan *.png --output json
//!
//! # Save a standalone HTML page as well as printing the summary
//! image-dedup scan *.jpg --report duplicates.html
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use duplicate_image_finder::core::batch::BatchLimits;
use duplicate_image_finder::core::pipeline::Pipeline;
use duplicate_image_finder::core::reporter::{export, ExportFormat, Report};
use duplicate_image_finder::error::Result;
use duplicate_image_finder::events::{Event, EventChannel, HashEvent, PipelineEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// Duplicate Image Finder - spot copies, rotated ones included
#[derive(Parser, Debug)]
#[command(name = "image-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find duplicate images among the given files
    Scan {
        /// Image files to compare
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Also write the report to this file (.html for HTML, JSON otherwise)
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// dHash grid size (8 gives 64-bit fingerprints)
        #[arg(long, default_value = "8")]
        hash_size: u32,

        /// Bounding box for thumbnails, in pixels
        #[arg(long, default_value = "200")]
        thumbnail_size: u32,

        /// Skip thumbnail rendering
        #[arg(long)]
        no_thumbnails: bool,

        /// Process one image at a time
        #[arg(long)]
        sequential: bool,

        /// Ignore the 25 file / 50MB / extension limits
        #[arg(long)]
        no_limits: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary with colors
    Pretty,
    /// Full report as JSON, thumbnails included
    Json,
    /// Standalone HTML page
    Html,
    /// Paths of redundant copies only (all but the first of each group)
    Minimal,
}

impl OutputFormat {
    fn shows_thumbnails(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Html)
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            files,
            output,
            report,
            hash_size,
            thumbnail_size,
            no_thumbnails,
            sequential,
            no_limits,
            verbose,
        } => {
            duplicate_image_finder::init_tracing(if verbose { "debug" } else { "warn" });

            let files = if no_limits {
                files
            } else {
                BatchLimits::default().validate(&files)?
            };

            let thumbnails = !no_thumbnails && (output.shows_thumbnails() || report.is_some());
            let pipeline = Pipeline::builder()
                .hash_size(hash_size)
                .thumbnail_size(thumbnail_size)
                .thumbnails(thumbnails)
                .parallel(!sequential)
                .build()?;

            run_scan(&pipeline, &files, output, report.as_deref(), verbose)
        }
    }
}

fn run_scan(
    pipeline: &Pipeline,
    files: &[PathBuf],
    output: OutputFormat,
    report_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if output == OutputFormat::Pretty {
        term.write_line(&format!(
            "{} {}",
            style("Duplicate Image Finder").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line(&format!("▶ Analyzing {} images...", files.len()))
            .ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if output == OutputFormat::Pretty {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(pb) = progress.as_ref() else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .into_owned(),
                        );
                    }
                }
                Event::Hash(HashEvent::Error { path, message }) if verbose => {
                    pb.println(format!("  {} {}: {}", style("!").yellow(), path.display(), message));
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let report = pipeline.run_with_events(files, &sender);

    drop(sender);
    event_thread.join().ok();

    if let Some(path) = report_path {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") => ExportFormat::Html,
            _ => ExportFormat::Json,
        };
        export::export_to_file(&report, path, format)?;
        term.write_line(&format!("✅ Report written to {}", path.display()))
            .ok();
    }

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report),
        OutputFormat::Json => export::export_json(&report, std::io::stdout().lock())?,
        OutputFormat::Html => export::export_html(&report, std::io::stdout().lock(), "Duplicate Report")
            .map_err(|source| {
                duplicate_image_finder::error::ReportError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?,
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, report: &Report) {
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} images, {} unique, {} unreadable",
        style(report.total_images).cyan(),
        style(report.unique_images).cyan(),
        style(report.failed_images).yellow()
    ))
    .ok();
    term.write_line("").ok();

    if report.duplicate_groups.is_empty() {
        term.write_line("No duplicates found!").ok();
    } else {
        term.write_line(&format!(
            "Found {} duplicate group(s):",
            style(report.duplicate_groups.len()).bold()
        ))
        .ok();

        for (i, group) in report.duplicate_groups.iter().enumerate() {
            term.write_line("").ok();
            term.write_line(&format!(
                "  {} ({} images, hash {})",
                style(format!("Group {}", i + 1)).bold(),
                group.count,
                style(&group.hash).dim()
            ))
            .ok();

            for image in &group.images {
                term.write_line(&format!("    - {}", display_path(&image.path)))
                    .ok();
            }
        }
    }

    if !report.failed_images_list.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Could not be read:").yellow()))
            .ok();
        for failed in &report.failed_images_list {
            term.write_line(&format!("    - {} ({})", failed.filename, failed.reason))
                .ok();
        }
    }
}

fn print_minimal_results(report: &Report) {
    for group in &report.duplicate_groups {
        for image in group.images.iter().skip(1) {
            println!("{}", image.path.display());
        }
    }
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(relative) => format!("~/{}", relative.display()),
        None => path.display().to_string(),
    }
}
