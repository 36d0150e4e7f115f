//! `png512` CLI - Convert images into 512x512 PNG files.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use png512::{BatchReport, Config, Normalizer};

/// Convert any JPEG, PNG, GIF, BMP, TIFF or WebP image into a 512x512 PNG.
///
/// Each output is written next to its input as `<name>_nuevo.png`.
#[derive(Parser, Debug)]
#[command(name = "png512")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image paths.
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Number of images processed in parallel. Defaults to the number of CPU cores.
    #[arg(short, long, value_name = "INT")]
    jobs: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("png512={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(args) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<BatchReport> {
    let inputs = dedup_inputs(args.inputs);

    if inputs.is_empty() {
        println!("No files to process.");
        return Ok(BatchReport::default());
    }

    let config = Config { jobs: args.jobs };
    let normalizer = Normalizer::new(config).context("Failed to initialize normalizer")?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let report = normalizer.run_with_progress(&inputs, |_, _| pb.inc(1));
    pb.finish_and_clear();

    println!("{}", render_summary(&report));

    Ok(report)
}

/// Drop repeated paths, keeping the first occurrence of each.
fn dedup_inputs(inputs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    inputs
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn render_summary(report: &BatchReport) -> String {
    let mut summary = format!("Processed {} image(s).", report.processed);

    if !report.is_clean() {
        summary.push_str("\n\nErrors:");
        for error in &report.errors {
            summary.push('\n');
            summary.push_str(&error.to_string());
        }
    }

    summary
}
