//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tierscout.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Path to the persisted state file.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            state_file: default_state_file(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "market_report.md".to_string()
}

fn default_state_file() -> String {
    crate::state::DEFAULT_STATE_FILE.to_string()
}

/// Model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// Gemini API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Temperature for structured tier extraction. Low, to favor schema
    /// fidelity over creativity.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Temperature for the overall-narrative synthesis. Higher, since it
    /// is prose rather than structured extraction.
    #[serde(default = "default_synthesis_temperature")]
    pub synthesis_temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            temperature: default_temperature(),
            synthesis_temperature: default_synthesis_temperature(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_synthesis_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    120
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the skills breakdown in role blocks.
    #[serde(default = "default_true")]
    pub include_skills: bool,

    /// Include platform links in role blocks.
    #[serde(default = "default_true")]
    pub include_platforms: bool,

    /// Maximum roles rendered per tier in Markdown (0 = all). The CSV
    /// export always carries the full set.
    #[serde(default)]
    pub max_roles_per_tier: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_skills: true,
            include_platforms: true,
            max_roles_per_tier: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".tierscout.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Model settings - always override since they have defaults in CLI
        self.model.name = args.model.clone();
        self.model.api_url = args.api_url.clone();
        self.model.temperature = args.temperature;

        // Timeout - only override if explicitly provided via CLI
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }

        // State file - only override if explicitly provided via CLI
        if let Some(ref state_file) = args.state_file {
            self.general.state_file = state_file.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.model.temperature, 0.3);
        assert!(config.model.synthesis_temperature > config.model.temperature);
        assert_eq!(config.general.state_file, ".tierscout_state.json");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[model]
name = "gemini-2.5-pro"
temperature = 0.2

[report]
max_roles_per_tier = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.model.name, "gemini-2.5-pro");
        assert_eq!(config.model.temperature, 0.2);
        // Unset fields keep their defaults.
        assert_eq!(config.model.synthesis_temperature, 0.7);
        assert_eq!(config.report.max_roles_per_tier, 10);
        assert!(config.report.include_skills);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[report]"));
    }
}
