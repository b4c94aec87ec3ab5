//! Persisted dashboard state.
//!
//! The last filters, the last report, and whether a search has been
//! performed, stored as one JSON file. Loaded at startup, saved after
//! every analyze action, removed by `--clear`. The orchestrator does not
//! depend on any of it; this exists so filters survive between runs and
//! the last report can be re-exported without a new model call.

use crate::models::{Filters, MarketReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = ".tierscout_state.json";

/// Everything that survives between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Filters from the last analyze action.
    #[serde(default)]
    pub filters: Option<Filters>,

    /// The last successfully generated report.
    #[serde(default)]
    pub market_report: Option<MarketReport>,

    /// Whether an analyze action has ever been run.
    #[serde(default)]
    pub has_searched: bool,
}

impl AppState {
    /// Load state from `path`, falling back to the default on a missing
    /// or unreadable file. A corrupt file is logged and ignored rather
    /// than failing startup.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read state file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring corrupt state file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save state to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))
    }

    /// Remove the state file if it exists.
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove state file: {}", path.display()))?;
        }
        Ok(())
    }
}
