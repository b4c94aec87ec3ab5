//! TierScout - AI-powered job market analyzer
//!
//! A CLI tool that queries the Gemini API for a tier-based analysis of
//! the Indian entry-level job market and renders Markdown/JSON reports
//! with CSV export.
//!
//! Exit codes:
//!   0 - Success (including a valid report with no results)
//!   1 - Runtime error (connection, config, or a failed analysis)

mod cli;
mod config;
mod llm;
mod models;
mod orchestrator;
mod report;
mod state;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use llm::{GeminiClient, GeminiConfig};
use models::{Filters, ReportDocument, ReportMetadata};
use orchestrator::Temperatures;
use state::AppState;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
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

    // Initialize logging
    init_logging(&args);

    info!("TierScout v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the analysis
    match run_analysis(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .tierscout.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".tierscout.toml");

    if path.exists() {
        eprintln!("⚠️  .tierscout.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .tierscout.toml")?;

    println!("✅ Created .tierscout.toml with default settings.");
    println!("   Edit it to customize model, temperatures, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis workflow. Returns exit code (0 or 1).
async fn run_analysis(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Load the persisted state
    let state_path = PathBuf::from(&config.general.state_file);
    let mut app_state = AppState::load(&state_path);

    // Handle --clear: drop saved filters and report, exit
    if args.clear {
        AppState::clear(&state_path)?;
        println!("🧹 Cleared saved filters and report.");
        return Ok(0);
    }

    // Handle --export-csv: re-export the last report, no model call
    if let Some(ref csv_path) = args.export_csv {
        return handle_export_csv(&app_state, csv_path);
    }

    // Resolve filters: CLI flags, then last run's filters, then defaults
    let filters = args.resolve_filters(app_state.filters.as_ref());
    let tiers = orchestrator::derive_tier_set(&filters.location);

    // Handle --dry-run: show what would be requested, exit
    if args.dry_run {
        return handle_dry_run(&filters, &tiers);
    }

    println!("🤖 Initializing model client...");
    println!("   Model: {}", config.model.name);
    println!("   Tiers: {}", tiers.join(", "));
    println!("   Timeout: {}s", config.model.timeout_seconds);

    let client = GeminiClient::new(GeminiConfig {
        api_url: config.model.api_url.clone(),
        api_key: args.api_key.clone().unwrap_or_default(),
        model_name: config.model.name.clone(),
        timeout_seconds: config.model.timeout_seconds,
    });

    let temperatures = Temperatures {
        extraction: config.model.temperature,
        synthesis: config.model.synthesis_temperature,
    };

    // The search is recorded before the outcome is known, like any
    // analyze action: a failed run still counts as having searched.
    app_state.filters = Some(filters.clone());
    app_state.has_searched = true;
    app_state.market_report = None;

    println!("\n🔬 Analyzing live job market...");
    let spinner = make_spinner(args.quiet);

    let result = orchestrator::generate_market_report(&client, &filters, temperatures).await;
    spinner.finish_and_clear();

    let market_report = match result {
        Ok(market_report) => market_report,
        Err(e) => {
            if let Err(save_err) = app_state.save(&state_path) {
                warn!("Failed to persist state: {}", save_err);
            }
            return Err(e.into());
        }
    };

    app_state.market_report = Some(market_report.clone());
    app_state.save(&state_path)?;

    // Build the report document
    println!("📝 Generating report...");

    let duration = start_time.elapsed().as_secs_f64();
    let document = ReportDocument {
        metadata: ReportMetadata {
            filters: filters.clone(),
            generated_at: Utc::now(),
            model_used: config.model.name.clone(),
            tiers_requested: tiers.len(),
            tiers_analyzed: market_report.tier_analyses.len(),
            duration_seconds: duration,
        },
        report: market_report,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&document)?,
        OutputFormat::Markdown => report::generate_markdown_report(&document, &config.report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print summary
    if document.report.has_results() {
        println!("\n📊 Analysis Summary:");
        println!(
            "   Tiers analyzed: {}/{}",
            document.metadata.tiers_analyzed, document.metadata.tiers_requested
        );
        println!("   Roles: {}", document.report.total_roles());
        println!(
            "   Role-city combinations: {}",
            document.report.role_city_combinations()
        );
        println!("   Duration: {:.1}s", duration);
    } else {
        println!(
            "\nℹ️  No significant results were found for the selected filters. \
             Try a different combination."
        );
    }

    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        args.output.display()
    );

    Ok(0)
}

/// Handle --export-csv: flatten the last saved report, no model call.
fn handle_export_csv(app_state: &AppState, csv_path: &Path) -> Result<i32> {
    let market_report = match &app_state.market_report {
        Some(market_report) if !market_report.tier_analyses.is_empty() => market_report,
        _ => {
            eprintln!("❌ No saved market report to export. Run an analysis first.");
            return Ok(1);
        }
    };

    report::csv_export::export_to_path(&market_report.tier_analyses, csv_path)?;

    println!(
        "✅ Exported {} row(s) to: {}",
        report::csv_export::row_count(&market_report.tier_analyses),
        csv_path.display()
    );
    Ok(0)
}

/// Handle --dry-run: print the derived tier set and prompts, exit.
fn handle_dry_run(filters: &Filters, tiers: &[String]) -> Result<i32> {
    println!("\n🔍 Dry run: deriving the request plan (no model calls)...\n");

    println!("   Qualification: {}", filters.qualification);
    println!("   Sector:        {}", filters.sector);
    println!("   Location:      {}", filters.location);
    println!("   Job Role:      {}", filters.job_role);

    println!("\n   Tier fetches ({} concurrent):", tiers.len());
    for tier in tiers {
        println!("     📄 {}", tier);
    }

    println!("\n   Prompt for {}:\n", tiers[0]);
    for line in llm::prompts::tier_analysis_prompt(filters, &tiers[0]).lines() {
        println!("     {}", line);
    }

    println!("\n✅ Dry run complete. No model calls were made.");
    Ok(0)
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
            info!("Loaded default config from .tierscout.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Spinner shown while the model calls are in flight.
fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("AI is gathering real-time data from multiple sources. This might take a moment...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
