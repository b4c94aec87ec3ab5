//! Report Assembler: the final all-or-nothing packaging step.

use super::OrchestratorError;
use crate::models::{MarketReport, TierAnalysis};

/// Package the successful analyses and the synthesized narrative.
///
/// An empty analysis set is a terminal failure; a report whose tiers all
/// carry empty role lists is still valid and is the caller's signal to
/// render "no results" rather than an error.
pub fn assemble(
    overall_analysis: String,
    tier_analyses: Vec<TierAnalysis>,
) -> Result<MarketReport, OrchestratorError> {
    if tier_analyses.is_empty() {
        return Err(OrchestratorError::AllTiersFailed);
    }

    Ok(MarketReport {
        overall_analysis,
        tier_analyses,
    })
}
