//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{Filters, QUALIFICATIONS, TIER_LABELS};
use clap::Parser;
use std::path::PathBuf;

/// TierScout - LLM-powered job market analyzer for Indian city tiers
///
/// Query a generative model for a structured, tier-based analysis of the
/// current entry-level job market, filtered by qualification, sector,
/// location tier, and job role. Markdown/JSON reports with CSV export.
///
/// Examples:
///   tierscout
///   tierscout --qualification BCom --sector Finance --location "Tier 2"
///   tierscout --job-role "Bank Teller" --format json -o report.json
///   tierscout --export-csv market_tier_report.csv
///   tierscout --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Graduate qualification (BSC, BCom, BA)
    ///
    /// Defaults to the last used value, then "BSC".
    #[arg(short = 'Q', long, value_name = "QUALIFICATION")]
    pub qualification: Option<String>,

    /// Sector focus, e.g. "All Sectors", IT, Finance, Retail, Logistics
    #[arg(short, long, value_name = "SECTOR")]
    pub sector: Option<String>,

    /// Location tier: "All Tiers", "Tier 1 (Metros)", "Tier 2", "Tier 3", "Tier 4"
    ///
    /// "All Tiers" analyzes the three principal tiers.
    #[arg(short, long, value_name = "TIER")]
    pub location: Option<String>,

    /// Specific job role to analyze, or "All Roles"
    #[arg(short, long, value_name = "ROLE")]
    pub job_role: Option<String>,

    /// Gemini model to use for analysis
    #[arg(short, long, default_value = "gemini-2.5-flash", env = "TIERSCOUT_MODEL")]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, default_value = "https://generativelanguage.googleapis.com", env = "GEMINI_API_URL")]
    pub api_url: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output file path for the report
    #[arg(short, long, default_value = "market_report.md", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Temperature for structured tier extraction (0.0 - 1.0)
    ///
    /// Lower values produce more consistent/deterministic output
    #[arg(long, default_value = "0.3")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tierscout.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the persisted state file
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Export the last saved report to CSV and exit (no model call)
    #[arg(long, value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// Clear the persisted filters and report, then exit
    #[arg(long)]
    pub clear: bool,

    /// Derive the tier set and print the prompts without calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .tierscout.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for actions that never reach the model
        if self.init_config || self.clear || self.export_csv.is_some() {
            return Ok(());
        }

        // Validate the dropdown-constrained filters; sector and job role
        // are passed through to the model as opaque text
        if let Some(ref qualification) = self.qualification {
            if !QUALIFICATIONS.contains(&qualification.as_str()) {
                return Err(format!(
                    "Unknown qualification '{}'. Valid values: {}",
                    qualification,
                    QUALIFICATIONS.join(", ")
                ));
            }
        }

        if let Some(ref location) = self.location {
            let valid = location == crate::models::ALL_TIERS
                || TIER_LABELS.contains(&location.as_str());
            if !valid {
                return Err(format!(
                    "Unknown location tier '{}'. Valid values: \"All Tiers\", {}",
                    location,
                    TIER_LABELS
                        .iter()
                        .map(|t| format!("\"{}\"", t))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        // Validate temperature range
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 1.0".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // An API key is needed for anything that calls the model
        if !self.dry_run && self.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(
                "An API key is required. Set GEMINI_API_KEY or pass --api-key.".to_string(),
            );
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Resolve the effective filters: CLI flag, then the stored filters
    /// from the last run, then the built-in defaults.
    pub fn resolve_filters(&self, stored: Option<&Filters>) -> Filters {
        let base = stored.cloned().unwrap_or_default();

        Filters {
            qualification: self
                .qualification
                .clone()
                .unwrap_or(base.qualification),
            sector: self.sector.clone().unwrap_or(base.sector),
            location: self.location.clone().unwrap_or(base.location),
            job_role: self.job_role.clone().unwrap_or(base.job_role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALL_TIERS;

    fn make_args() -> Args {
        Args {
            qualification: None,
            sector: None,
            location: None,
            job_role: None,
            model: "gemini-2.5-flash".to_string(),
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: Some("test-key".to_string()),
            output: PathBuf::from("market_report.md"),
            format: OutputFormat::Markdown,
            temperature: 0.3,
            timeout: None,
            config: None,
            state_file: None,
            verbose: false,
            quiet: false,
            export_csv: None,
            clear: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_qualification() {
        let mut args = make_args();
        args.qualification = Some("PhD".to_string());
        assert!(args.validate().is_err());

        args.qualification = Some("BCom".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_tier() {
        let mut args = make_args();
        args.location = Some("Tier 9".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_every_canonical_tier() {
        for tier in TIER_LABELS.iter().chain([ALL_TIERS].iter()) {
            let mut args = make_args();
            args.location = Some(tier.to_string());
            assert!(args.validate().is_ok(), "rejected {}", tier);
        }
    }

    #[test]
    fn test_validation_requires_api_key() {
        let mut args = make_args();
        args.api_key = None;
        assert!(args.validate().is_err());

        // Dry runs never call the model, so no key is needed.
        args.dry_run = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_resolve_filters_prefers_cli_then_stored() {
        let mut args = make_args();
        args.sector = Some("Finance".to_string());

        let stored = Filters {
            qualification: "BA".to_string(),
            sector: "Retail".to_string(),
            location: "Tier 3".to_string(),
            job_role: "Telecaller".to_string(),
        };

        let filters = args.resolve_filters(Some(&stored));
        assert_eq!(filters.sector, "Finance"); // CLI wins
        assert_eq!(filters.qualification, "BA"); // stored fills the gap
        assert_eq!(filters.location, "Tier 3");
        assert_eq!(filters.job_role, "Telecaller");
    }

    #[test]
    fn test_resolve_filters_defaults_without_state() {
        let filters = make_args().resolve_filters(None);
        assert_eq!(filters, Filters::default());
    }
}
