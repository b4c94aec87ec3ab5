//! Tier-set derivation, concurrent fan-out, and narrative synthesis.
//!
//! The fan-out is a wait-for-all join: every tier fetch is launched up
//! front, every outcome is observed, and a failure in one tier never
//! cancels or corrupts the others.

use crate::llm::{prompts, GenerativeModel, LlmError};
use crate::models::{Filters, TierAnalysis, ALL_TIERS, PRINCIPAL_TIERS};
use futures::future::join_all;
use tracing::{info, warn};

use super::fetcher;

/// Derive the set of tiers to analyze from the location filter.
///
/// "All Tiers" expands to the three principal tiers only; Tier 4 is a
/// selectable explicit filter but is excluded from the aggregate view.
pub fn derive_tier_set(location: &str) -> Vec<String> {
    if location == ALL_TIERS {
        PRINCIPAL_TIERS.iter().map(|t| t.to_string()).collect()
    } else {
        vec![location.to_string()]
    }
}

/// Fetch every tier concurrently and keep the successes in input order.
///
/// Failed tiers are logged and excluded; the result carries whatever
/// subset of the fan-out succeeded, possibly empty.
pub async fn collect_tier_analyses(
    model: &dyn GenerativeModel,
    filters: &Filters,
    tiers: &[String],
    temperature: f32,
) -> Vec<TierAnalysis> {
    let fetches = tiers
        .iter()
        .map(|tier| fetcher::fetch_tier_analysis(model, filters, tier, temperature));

    let outcomes = join_all(fetches).await;

    let mut analyses = Vec::with_capacity(tiers.len());
    for (tier, outcome) in tiers.iter().zip(outcomes) {
        match outcome {
            Ok(analysis) => {
                info!("{}: {} role(s) extracted", tier, analysis.common_roles.len());
                analyses.push(analysis);
            }
            Err(e) => warn!("{}: analysis failed and was excluded: {}", tier, e),
        }
    }

    analyses
}

/// Synthesize the cross-tier narrative from the successful tiers.
///
/// Consumes only tier labels and summary texts, never role data.
pub async fn synthesize_overall(
    model: &dyn GenerativeModel,
    analyses: &[TierAnalysis],
    temperature: f32,
) -> Result<String, LlmError> {
    let prompt = prompts::overall_synthesis_prompt(analyses);
    model
        .generate_text(prompts::SYNTHESIS_SYSTEM_PROMPT, &prompt, temperature)
        .await
}
