//! Tshirt Analyzer - sales breakdown for t-shirt order exports
//!
//! A CLI tool that reads a CSV of t-shirt sales, ranks sizes, colors
//! and designs by revenue, and writes a report plus a console summary.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing input, empty file, config or write failure)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod reader;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use models::{Report, ReportMetadata};
use reader::ReadOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Tshirt Analyzer v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_analysis(args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .tshirt-analyzer.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the output file, delimiter and recommendations.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the read, aggregate, report workflow.
fn run_analysis(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = args.input.clone().context("An input file is required")?;
    let output = PathBuf::from(&config.general.output);

    // Step 1: Read the sales rows
    println!("📥 Reading t-shirt sales data from {}...", input.display());
    let rows = reader::read_rows_from_path(&input, &ReadOptions::from(&config.input))
        .with_context(|| format!("Failed to load sales data from {}", input.display()))?;
    println!("\nTotal t-shirt sales records: {}", rows.len());

    // Step 2: Aggregate, logging every dropped row
    println!("\n🔬 Analyzing t-shirt performance...");
    let (results, warnings) = analysis::aggregate_collecting(&rows);
    for warning in &warnings {
        warn!("{}", warning);
    }
    if !warnings.is_empty() {
        info!("Skipped {} of {} rows", warnings.len(), rows.len());
    }

    // Step 3: Derive insights
    let insights = analysis::derive_insights(&results);
    if insights.is_empty() {
        warn!("No valid sales rows; the report will have no insights");
    }
    debug!("Insights: {:?}", insights);

    // Step 4: Write the report
    println!("\n📝 Writing t-shirt report to {}...", output.display());
    let report = Report {
        metadata: ReportMetadata {
            input_file: input.display().to_string(),
            generated_at: Utc::now(),
            rows_read: rows.len(),
            rows_skipped: warnings.len(),
        },
        results,
        insights,
        recommendations: config.report.recommendations.clone(),
    };
    report::write_report(&report, &output, config.report.format)?;

    // Step 5: Console summary
    println!(
        "\n{}",
        report::render_summary(&report.results, config.report.summary_count)
    );
    println!("\n✅ T-shirt analysis complete!");
    println!("   Report generated: {}", output.display());

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
