//! # CLI Module
//!
//! Command-line interface for the EXIF cleaner.
//!
//! ## Usage
//! ```bash
//! # Write metadata-free copies of every image
//! exif-clean clean ~/Photos ~/Photos-clean
//!
//! # Lower JPEG quality, JSON summary
//! exif-clean clean ~/Photos ~/Photos-clean --jpeg-quality 90 --output-format json
//!
//! # Audit what EXIF data a folder still holds
//! exif-clean report ~/Photos --sort
//!
//! # Save the audit as an HTML page
//! exif-clean report ~/Photos --format html --out audit.html
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use exif_cleaner::core::reporter::{
    export_to_file, render_html, render_json, ExportFormat, ImageReport, MetadataReporter,
};
use exif_cleaner::core::sanitizer::{PngCompression, Sanitizer, MAX_JPEG_QUALITY};
use exif_cleaner::error::{ExifCleanerError, ReportError, Result};
use exif_cleaner::events::{CleanEvent, CleanSummary, Event, EventChannel};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;

/// EXIF Cleaner - strip image metadata by re-encoding
#[derive(Parser, Debug)]
#[command(name = "exif-clean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write metadata-free copies of every image in a directory
    Clean {
        /// Directory holding the original images
        input: PathBuf,

        /// Directory receiving the cleaned copies (created if missing)
        output: PathBuf,

        /// JPEG quality, 1-100
        #[arg(long, default_value_t = MAX_JPEG_QUALITY)]
        jpeg_quality: u8,

        /// PNG compression effort
        #[arg(long, default_value = "best")]
        png_compression: Compression,

        /// Largest allocation a single decode may make, in MiB
        #[arg(long, default_value_t = 3072)]
        max_alloc_mb: u64,

        /// Summary format
        #[arg(short, long, default_value = "pretty")]
        output_format: OutputFormat,

        /// Print every written file
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the EXIF data found in each image of a directory
    Report {
        /// Directory to inspect
        directory: PathBuf,

        /// Report format
        #[arg(short, long, default_value = "pretty")]
        format: ReportFormat,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Sort entries by file name instead of directory order
        #[arg(long)]
        sort: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    /// Smallest files, slowest
    Best,
    /// Encoder default
    Default,
    /// Largest files, fastest
    Fast,
}

impl From<Compression> for PngCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Best => PngCompression::Best,
            Compression::Default => PngCompression::Default,
            Compression::Fast => PngCompression::Fast,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable listing
    Pretty,
    /// JSON array of `{name, exif}`
    Json,
    /// HTML table
    Html,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            output,
            jpeg_quality,
            png_compression,
            max_alloc_mb,
            output_format,
            verbose,
        } => {
            if !(1..=MAX_JPEG_QUALITY).contains(&jpeg_quality) {
                return Err(ExifCleanerError::Config(format!(
                    "--jpeg-quality must be between 1 and {}, got {}",
                    MAX_JPEG_QUALITY, jpeg_quality
                )));
            }

            let sanitizer = Sanitizer::builder(&input, &output)
                .jpeg_quality(jpeg_quality)
                .png_compression(png_compression.into())
                .max_alloc(max_alloc_mb.saturating_mul(1024 * 1024))
                .build()?;

            run_clean(&sanitizer, output_format, verbose)
        }
        Commands::Report {
            directory,
            format,
            out,
            sort,
        } => run_report(directory, format, out, sort),
    }
}

fn run_clean(sanitizer: &Sanitizer, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("EXIF Cleaner").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Clean(CleanEvent::Started { total_files }) => {
                    pb.set_length(total_files as u64);
                }
                Event::Clean(CleanEvent::FileWritten { destination, .. }) => {
                    if verbose {
                        pb.println(format!("  {} {}", style("✓").green(), destination.display()));
                    }
                    pb.inc(1);
                }
                Event::Clean(CleanEvent::Skipped { path, reason }) => {
                    pb.println(format!(
                        "  {} {} ({})",
                        style("✗").red(),
                        path.display(),
                        style(reason).dim()
                    ));
                    pb.inc(1);
                }
                Event::Clean(CleanEvent::Unsupported { .. }) => pb.inc(1),
                Event::Clean(CleanEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    });

    // Unsupported-type lines go to stdout, as plain text.
    let stdout = std::io::stdout();
    let result = sanitizer.clean_all_with(&mut stdout.lock(), &sender);

    drop(sender);
    event_thread.join().ok();

    let summary = result?;

    match output {
        OutputFormat::Pretty => print_pretty_summary(&term, sanitizer, &summary),
        OutputFormat::Json => print_json_summary(sanitizer, &summary)?,
    }

    Ok(())
}

fn print_pretty_summary(term: &Term, sanitizer: &Sanitizer, summary: &CleanSummary) {
    term.write_line(&format!("{} Cleaning Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images written to {}",
        style(summary.written).cyan(),
        sanitizer.output_dir().display()
    ))
    .ok();

    if summary.unsupported > 0 {
        term.write_line(&format!(
            "  {} unsupported files skipped",
            style(summary.unsupported).yellow()
        ))
        .ok();
    }

    if summary.skipped > 0 {
        term.write_line(&format!(
            "  {} images could not be decoded or written",
            style(summary.skipped).red()
        ))
        .ok();
    }
}

fn print_json_summary(sanitizer: &Sanitizer, summary: &CleanSummary) -> Result<()> {
    let output = serde_json::json!({
        "input": sanitizer.input_dir(),
        "output": sanitizer.output_dir(),
        "summary": summary,
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| ReportError::GenerationFailed(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn run_report(
    directory: PathBuf,
    format: ReportFormat,
    out: Option<PathBuf>,
    sort: bool,
) -> Result<()> {
    let reporter = MetadataReporter::new(&directory);
    let mut reports = reporter.collect()?;

    if sort {
        reports.sort_by(|a, b| a.name.cmp(&b.name));
    }

    if let Some(path) = out {
        let export_format = match format {
            ReportFormat::Json => ExportFormat::Json,
            ReportFormat::Html => ExportFormat::Html,
            ReportFormat::Pretty => ExportFormat::from_path(&path),
        };
        export_to_file(&reports, &path, export_format)?;
        Term::stderr()
            .write_line(&format!(
                "{} Report written to {}",
                style("✓").green().bold(),
                path.display()
            ))
            .ok();
        return Ok(());
    }

    let stdout = std::io::stdout();
    let to_error = |e: std::io::Error| ReportError::GenerationFailed(e.to_string());
    match format {
        ReportFormat::Pretty => print_pretty_reports(&reports),
        ReportFormat::Json => {
            render_json(&reports, stdout.lock()).map_err(to_error)?;
            println!();
        }
        ReportFormat::Html => render_html(&reports, stdout.lock()).map_err(to_error)?,
    }

    Ok(())
}

fn print_pretty_reports(reports: &[ImageReport]) {
    if reports.is_empty() {
        println!("{}", style("No images found.").dim());
        return;
    }

    for report in reports {
        println!("{}", style(&report.name).bold());
        if report.exif == exif_cleaner::core::metadata::NO_DATA {
            println!("  {}", style(&report.exif).dim());
        } else if report.exif.is_empty() {
            println!("  {}", style("(empty EXIF block)").dim());
        } else {
            for pair in report.exif.split(", ") {
                println!("  {}", pair);
            }
        }
    }
}
