//! Report orchestration.
//!
//! Fans one structured extraction request out per location tier, tolerates
//! partial failure across the fan-out, synthesizes a cross-tier narrative
//! from the successes, and assembles the final market report. The caller
//! gets exactly one report or one terminal error per invocation.

pub mod aggregator;
pub mod assembler;
pub mod fetcher;

pub use aggregator::derive_tier_set;

use crate::llm::{GenerativeModel, LlmError};
use crate::models::{Filters, MarketReport};
use thiserror::Error;
use tracing::info;

/// Terminal failures of one orchestration run.
///
/// Per-tier failures are not here: they are tolerated and excluded inside
/// the aggregator. These are the errors that abort the whole run, surfaced
/// as single human-readable strings.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Failed to generate market report. The AI model might be busy or returned an invalid format. Please try again.")]
    AllTiersFailed,

    #[error("Failed to synthesize the overall market analysis: {0}")]
    Synthesis(#[source] LlmError),
}

/// Sampling temperatures for the two request kinds.
///
/// Extraction runs cold to favor schema fidelity; synthesis runs warmer
/// because it is prose, not structured data.
#[derive(Debug, Clone, Copy)]
pub struct Temperatures {
    pub extraction: f32,
    pub synthesis: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            extraction: 0.3,
            synthesis: 0.7,
        }
    }
}

/// Run one complete analysis: derive the tier set, fetch every tier
/// concurrently, synthesize the overall narrative from whatever succeeded,
/// and assemble the report.
///
/// Synthesis failure is terminal: a report without an overall narrative is
/// incomplete, so it is never silently replaced with a placeholder.
pub async fn generate_market_report(
    model: &dyn GenerativeModel,
    filters: &Filters,
    temperatures: Temperatures,
) -> Result<MarketReport, OrchestratorError> {
    let tiers = aggregator::derive_tier_set(&filters.location);
    info!("Analyzing {} tier(s): {}", tiers.len(), tiers.join(", "));

    let analyses =
        aggregator::collect_tier_analyses(model, filters, &tiers, temperatures.extraction).await;

    if analyses.is_empty() {
        return Err(OrchestratorError::AllTiersFailed);
    }

    let overall_analysis =
        aggregator::synthesize_overall(model, &analyses, temperatures.synthesis)
            .await
            .map_err(OrchestratorError::Synthesis)?;

    assembler::assemble(overall_analysis, analyses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{role_value, tier_value, StubModel};
    use crate::models::ALL_TIERS;

    fn all_tiers_filters() -> Filters {
        Filters {
            qualification: "BSC".to_string(),
            sector: "IT".to_string(),
            location: ALL_TIERS.to_string(),
            job_role: "All Roles".to_string(),
        }
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successes_in_order() {
        let model = StubModel::new()
            .with_tier(
                "Tier 1 (Metros)",
                Ok(tier_value(
                    "Tier 1 (Metros)",
                    "Metros are hiring.",
                    vec![role_value("Process Associate", "Mumbai", "200+")],
                )),
            )
            .with_tier(
                "Tier 2",
                Ok(tier_value("Tier 2", "Tier 2 is steady.", vec![])),
            )
            .with_tier("Tier 3", Err("schema violation"))
            .with_text(Ok("Demand concentrates in the metros."));

        let report = generate_market_report(&model, &all_tiers_filters(), Temperatures::default())
            .await
            .unwrap();

        assert_eq!(report.tier_analyses.len(), 2);
        assert_eq!(report.tier_analyses[0].tier, "Tier 1 (Metros)");
        assert_eq!(report.tier_analyses[1].tier, "Tier 2");
        assert_eq!(report.overall_analysis, "Demand concentrates in the metros.");
        assert_eq!(
            report.tier_analyses[0].common_roles[0].role_name,
            "Process Associate"
        );
    }

    #[tokio::test]
    async fn test_synthesis_sees_only_successful_summaries() {
        let model = StubModel::new()
            .with_tier(
                "Tier 1 (Metros)",
                Ok(tier_value("Tier 1 (Metros)", "Metros are hiring.", vec![])),
            )
            .with_tier(
                "Tier 2",
                Ok(tier_value("Tier 2", "Tier 2 is steady.", vec![])),
            )
            .with_tier("Tier 3", Err("transport failure"))
            .with_text(Ok("Overall."));

        generate_market_report(&model, &all_tiers_filters(), Temperatures::default())
            .await
            .unwrap();

        let prompts = model.text_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Metros are hiring."));
        assert!(prompts[0].contains("Tier 2 is steady."));
        assert!(!prompts[0].contains("Tier 3"));
    }

    #[tokio::test]
    async fn test_all_tiers_failing_is_terminal() {
        let model = StubModel::new()
            .with_tier("Tier 1 (Metros)", Err("down"))
            .with_tier("Tier 2", Err("down"))
            .with_tier("Tier 3", Err("down"))
            .with_text(Ok("should never be requested"));

        let err = generate_market_report(&model, &all_tiers_filters(), Temperatures::default())
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::AllTiersFailed));
        // Synthesis must be skipped entirely when no tier succeeded.
        assert!(model.text_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_terminal() {
        let model = StubModel::new()
            .with_tier(
                "Tier 1 (Metros)",
                Ok(tier_value("Tier 1 (Metros)", "Fine.", vec![])),
            )
            .with_tier("Tier 2", Ok(tier_value("Tier 2", "Fine.", vec![])))
            .with_tier("Tier 3", Ok(tier_value("Tier 3", "Fine.", vec![])))
            .with_text(Err("model overloaded"));

        let err = generate_market_report(&model, &all_tiers_filters(), Temperatures::default())
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::Synthesis(_)));
    }

    #[tokio::test]
    async fn test_single_tier_location_fetches_one_tier() {
        let model = StubModel::new()
            .with_tier(
                "Tier 4",
                Ok(tier_value("Tier 4", "Small-town hiring is thin.", vec![])),
            )
            .with_text(Ok("Quiet overall."));

        let filters = Filters {
            location: "Tier 4".to_string(),
            ..Filters::default()
        };

        let report = generate_market_report(&model, &filters, Temperatures::default())
            .await
            .unwrap();

        assert_eq!(report.tier_analyses.len(), 1);
        assert_eq!(report.tier_analyses[0].tier, "Tier 4");
        assert_eq!(model.structured_prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_all_empty_role_lists_is_a_valid_report() {
        let model = StubModel::new()
            .with_tier(
                "Tier 1 (Metros)",
                Ok(tier_value("Tier 1 (Metros)", "Nothing matched.", vec![])),
            )
            .with_tier("Tier 2", Ok(tier_value("Tier 2", "Nothing matched.", vec![])))
            .with_tier("Tier 3", Ok(tier_value("Tier 3", "Nothing matched.", vec![])))
            .with_text(Ok("No significant demand for this profile."));

        let report = generate_market_report(&model, &all_tiers_filters(), Temperatures::default())
            .await
            .unwrap();

        // Valid report, renders as "no results" downstream; not an error.
        assert_eq!(report.tier_analyses.len(), 3);
        assert!(!report.has_results());
    }
}
