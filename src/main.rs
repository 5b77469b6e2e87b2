//! ResizeBench CLI - Batch Image Resize Benchmark
//!
//! Resizes every image under a source directory by a scale factor, once
//! sequentially and once with bounded concurrency, and reports timings,
//! relative speedup, and a per-file outcome list.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::info;

use resizebench::{
    init, BenchmarkReport, BenchmarkRunner, Config, JpegCodec, LanczosResampler, OutputArea,
    Scheduler, TaskOutcome,
};

/// ResizeBench - Batch Image Resize Benchmark
#[derive(Parser)]
#[command(
    name = "resizebench",
    version,
    about = "Batch image resizer that benchmarks sequential vs concurrent execution",
    long_about = "ResizeBench resizes every .png/.jpg/.jpeg under a source directory by a \
                  scale factor, writing results as JPEG into a flat output directory. It runs \
                  the identical task set twice, strictly sequentially and with a bounded \
                  concurrent fan-out, and reports both timings and the relative speedup."
)]
struct Cli {
    /// Source directory, searched recursively
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output directory (cleaned before each pass)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Scale factor applied to both dimensions
    #[arg(short, long, value_name = "FACTOR")]
    scale: Option<f64>,

    /// Maximum in-flight pipelines in the concurrent pass (default: auto-detect)
    #[arg(short = 'j', long, value_name = "COUNT")]
    max_concurrency: Option<usize>,

    /// JPEG output quality (1-100)
    #[arg(short, long, value_name = "QUALITY")]
    quality: Option<u8>,

    /// Configuration file (.toml or .yaml); CLI flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'Q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", log_level);
    }
    init();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", style("Error").red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = build_settings(&cli)?;

    info!("Source: {:?}", settings.source);
    info!("Output: {:?}", settings.dest);
    info!("Scale: {}", settings.scale);

    let scheduler = Scheduler::new(
        Arc::new(JpegCodec::new(settings.quality)),
        Arc::new(LanczosResampler::new()),
        settings.max_concurrency,
    );
    let max_concurrent = scheduler.max_concurrent();
    let runner = BenchmarkRunner::new(scheduler, OutputArea::new(&settings.dest));

    let report = runner.run(&settings.source, settings.scale).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&JsonSummary::from_report(&report))?);
    } else {
        print_report(&report, max_concurrent, cli.quiet);
    }

    Ok(())
}

/// Merge the optional config file with CLI flags; flags win.
fn build_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config {
            scale: 2.0,
            source: PathBuf::new(),
            dest: PathBuf::new(),
            max_concurrency: None,
            quality: 90,
            logging: Default::default(),
        },
    };

    if let Some(input) = &cli.input {
        config.source = input.clone();
    }
    if let Some(output) = &cli.output {
        config.dest = output.clone();
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if let Some(quality) = cli.quality {
        config.quality = quality;
    }
    if let Some(max) = cli.max_concurrency {
        config.max_concurrency = Some(max);
    }

    if config.source.as_os_str().is_empty() || config.dest.as_os_str().is_empty() {
        anyhow::bail!("Input and output paths are required (via flags or a config file)");
    }

    config.validate()?;
    Ok(config)
}

/// Print the human-readable summary and per-file outcome list
fn print_report(report: &BenchmarkReport, max_concurrent: usize, quiet: bool) {
    // Both passes process the same logical set; the concurrent pass is what
    // is left on disk, so its outcomes drive the listing.
    let outcomes = &report.concurrent.outcomes;

    if !quiet {
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Completed {
                    source,
                    dest,
                    target_dims,
                } => {
                    println!(
                        "  {} {} -> {} ({})",
                        style("ok").green(),
                        source.display(),
                        dest.display(),
                        target_dims
                    );
                }
                TaskOutcome::Failed { source, error } => {
                    println!(
                        "  {} {} ({})",
                        style("failed").red(),
                        source.display(),
                        error
                    );
                }
            }
        }
        for skipped in &report.skipped {
            println!(
                "  {} {} ({})",
                style("skipped").yellow(),
                skipped.path.display(),
                skipped.reason
            );
        }
    }

    println!();
    println!("{}", style("Benchmark Summary:").bold());
    println!(
        "  {}: {} processed, {} failed, {} skipped",
        style("Files").cyan(),
        report.concurrent.completed(),
        report.concurrent.failed(),
        report.skipped.len()
    );
    println!(
        "  {}: {:.3}s",
        style("Sequential").blue(),
        report.sequential.elapsed.as_secs_f64()
    );
    println!(
        "  {}: {:.3}s ({} max in flight)",
        style("Concurrent").blue(),
        report.concurrent.elapsed.as_secs_f64(),
        max_concurrent
    );
    println!(
        "  {}: {:.1}%",
        style("Improvement").green().bold(),
        report.improvement_percent()
    );
}

/// Machine-readable summary for automation
#[derive(Serialize)]
struct JsonSummary {
    sequential_ms: u128,
    concurrent_ms: u128,
    improvement_percent: f64,
    completed: usize,
    failed: usize,
    skipped: usize,
    outcomes: Vec<JsonOutcome>,
}

#[derive(Serialize)]
struct JsonOutcome {
    source: String,
    status: &'static str,
    dest: Option<String>,
    error: Option<String>,
}

impl JsonSummary {
    fn from_report(report: &BenchmarkReport) -> Self {
        let mut outcomes = Vec::new();
        for outcome in &report.concurrent.outcomes {
            match outcome {
                TaskOutcome::Completed { source, dest, .. } => outcomes.push(JsonOutcome {
                    source: source.display().to_string(),
                    status: "completed",
                    dest: Some(dest.display().to_string()),
                    error: None,
                }),
                TaskOutcome::Failed { source, error } => outcomes.push(JsonOutcome {
                    source: source.display().to_string(),
                    status: "failed",
                    dest: None,
                    error: Some(error.clone()),
                }),
            }
        }
        for skipped in &report.skipped {
            outcomes.push(JsonOutcome {
                source: skipped.path.display().to_string(),
                status: "skipped",
                dest: None,
                error: Some(skipped.reason.to_string()),
            });
        }

        Self {
            sequential_ms: report.sequential.elapsed.as_millis(),
            concurrent_ms: report.concurrent.elapsed.as_millis(),
            improvement_percent: report.improvement_percent(),
            completed: report.concurrent.completed(),
            failed: report.concurrent.failed(),
            skipped: report.skipped.len(),
            outcomes,
        }
    }
}
