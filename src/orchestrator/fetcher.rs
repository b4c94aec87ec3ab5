//! Tier Fetcher: one validated tier analysis per request.
//!
//! Builds the per-tier prompt, requests a schema-constrained extraction,
//! and deserializes into [`TierAnalysis`]. Any parse or validation failure
//! is a hard failure for this tier only; no retry happens here.

use crate::llm::{prompts, schema, GenerativeModel, LlmError};
use crate::models::{Filters, TierAnalysis};
use tracing::{debug, warn};

/// Fetch and validate the analysis for a single tier.
pub async fn fetch_tier_analysis(
    model: &dyn GenerativeModel,
    filters: &Filters,
    tier: &str,
    temperature: f32,
) -> Result<TierAnalysis, LlmError> {
    let prompt = prompts::tier_analysis_prompt(filters, tier);
    let response_schema = schema::tier_analysis_schema();

    debug!("Requesting structured analysis for {}", tier);

    let value = model
        .extract_structured(
            prompts::ANALYST_SYSTEM_PROMPT,
            &prompt,
            &response_schema,
            temperature,
        )
        .await?;

    let analysis: TierAnalysis = serde_json::from_value(value)?;

    if analysis.tier.trim().is_empty() {
        return Err(LlmError::Invalid("tier label is empty".to_string()));
    }

    for role in &analysis.common_roles {
        if role.salary_range.currency != "INR" {
            warn!(
                "{}: salary for '{}' quoted in {}, expected INR",
                tier, role.role_name, role.salary_range.currency
            );
        }
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{role_value, tier_value, StubModel};
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_response_becomes_analysis() {
        let model = StubModel::new().with_tier(
            "Tier 2",
            Ok(tier_value(
                "Tier 2",
                "Steady demand.",
                vec![role_value("Telecaller", "Jaipur", "50-100")],
            )),
        );

        let filters = Filters::default();
        let analysis = fetch_tier_analysis(&model, &filters, "Tier 2", 0.3)
            .await
            .unwrap();

        assert_eq!(analysis.tier, "Tier 2");
        assert_eq!(analysis.common_roles.len(), 1);
        assert_eq!(analysis.common_roles[0].city_openings[0].city_name, "Jaipur");
    }

    #[tokio::test]
    async fn test_missing_currency_fails_the_tier() {
        // Required field absent below the top level: still a hard failure.
        let model = StubModel::new().with_tier(
            "Tier 3",
            Ok(json!({
                "tier": "Tier 3",
                "summary": "Sparse.",
                "commonRoles": [{
                    "roleName": "Data Entry Operator",
                    "roleDescription": "Keys records.",
                    "skillSet": {
                        "technicalSkills": [],
                        "softSkills": [],
                        "languageRequirements": []
                    },
                    "platforms": [],
                    "hiringCompanies": [],
                    "cityOpenings": [],
                    "salaryRange": {"min": 10000, "max": 14000}
                }]
            })),
        );

        let filters = Filters::default();
        let err = fetch_tier_analysis(&model, &filters, "Tier 3", 0.3)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_tier_label_is_rejected() {
        let model = StubModel::new().with_tier(
            "Tier 2",
            Ok(json!({"tier": "  ", "summary": "x", "commonRoles": []})),
        );

        let filters = Filters::default();
        let err = fetch_tier_analysis(&model, &filters, "Tier 2", 0.3)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_empty_role_list_is_valid() {
        let model = StubModel::new().with_tier(
            "Tier 4",
            Ok(tier_value("Tier 4", "Very little hiring.", vec![])),
        );

        let filters = Filters::default();
        let analysis = fetch_tier_analysis(&model, &filters, "Tier 4", 0.3)
            .await
            .unwrap();

        assert!(analysis.common_roles.is_empty());
    }
}
