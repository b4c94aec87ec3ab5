//! Data models for the market report.
//!
//! This module contains all the core data structures used throughout
//! the application for representing filters, tier analyses, and reports.
//!
//! Wire names are camelCase: these types deserialize directly from the
//! model's schema-constrained responses, so every required schema field
//! is a non-`Option` struct field and a missing field fails the parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical tier labels. "Tier 4" is a valid explicit filter value but is
/// not part of the aggregate expansion (see [`PRINCIPAL_TIERS`]).
pub const TIER_LABELS: [&str; 4] = ["Tier 1 (Metros)", "Tier 2", "Tier 3", "Tier 4"];

/// The tiers analyzed when the location filter is [`ALL_TIERS`]. The
/// aggregate view deliberately covers only the three principal tiers.
pub const PRINCIPAL_TIERS: [&str; 3] = ["Tier 1 (Metros)", "Tier 2", "Tier 3"];

/// Sentinel meaning "analyze the principal tiers" rather than one tier.
pub const ALL_TIERS: &str = "All Tiers";
/// Sentinel meaning no sector restriction.
pub const ALL_SECTORS: &str = "All Sectors";
/// Sentinel meaning "enumerate roles" rather than analyze one role.
pub const ALL_ROLES: &str = "All Roles";

/// Qualifications the dashboard supports.
pub const QUALIFICATIONS: [&str; 3] = ["BSC", "BCom", "BA"];

/// The filter set for one analysis run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Graduate qualification, e.g. "BSC".
    pub qualification: String,
    /// Sector focus, or the "All Sectors" sentinel.
    pub sector: String,
    /// Location tier label, or the "All Tiers" sentinel.
    pub location: String,
    /// Specific job role, or the "All Roles" sentinel.
    pub job_role: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            qualification: "BSC".to_string(),
            sector: ALL_SECTORS.to_string(),
            location: ALL_TIERS.to_string(),
            job_role: ALL_ROLES.to_string(),
        }
    }
}

/// Required skills for a role, split into three categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSet {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub language_requirements: Vec<String>,
}

/// A pre-filtered search link on a job platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLink {
    /// Platform name, e.g. "Naukri", "LinkedIn".
    pub platform_name: String,
    /// Direct URL to a pre-filtered search results page.
    pub search_link: String,
}

/// A city with an estimated count of live openings.
///
/// The estimate is free-form text ("50-100", "150+", "approx. 75") because
/// the source of the number is an approximation, not a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityOpening {
    pub city_name: String,
    pub estimated_openings: String,
}

/// Estimated monthly entry-level salary range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    /// Always "INR".
    pub currency: String,
}

/// One entry-level job role within a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonRole {
    pub role_name: String,
    pub role_description: String,
    pub skill_set: SkillSet,
    pub platforms: Vec<PlatformLink>,
    pub hiring_companies: Vec<String>,
    pub city_openings: Vec<CityOpening>,
    pub salary_range: SalaryRange,
}

/// A validated analysis of one city tier.
///
/// Produced in full by one fetch or discarded entirely; never partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAnalysis {
    /// Tier label, e.g. "Tier 1 (Metros)".
    pub tier: String,
    /// Short summary of the job landscape within this tier.
    pub summary: String,
    /// May be empty: a tier with no matching roles is still a valid analysis.
    pub common_roles: Vec<CommonRole>,
}

/// The complete market report.
///
/// `tier_analyses` is non-empty by construction: the assembler fails the
/// whole run instead of returning a report with zero tiers. A report whose
/// tiers all carry empty role lists is valid and renders as "no results".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub overall_analysis: String,
    pub tier_analyses: Vec<TierAnalysis>,
}

impl MarketReport {
    /// Whether any tier produced at least one role.
    pub fn has_results(&self) -> bool {
        self.tier_analyses.iter().any(|t| !t.common_roles.is_empty())
    }

    /// Total number of roles across all tiers.
    pub fn total_roles(&self) -> usize {
        self.tier_analyses.iter().map(|t| t.common_roles.len()).sum()
    }

    /// Total number of role-city combinations across all tiers.
    pub fn role_city_combinations(&self) -> usize {
        self.tier_analyses
            .iter()
            .flat_map(|t| &t.common_roles)
            .map(|r| r.city_openings.len())
            .sum()
    }
}

/// Metadata about one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// The filters the report was generated for.
    pub filters: Filters,
    /// Date and time of the analysis.
    pub generated_at: DateTime<Utc>,
    /// Name of the model used.
    pub model_used: String,
    /// Number of tiers in the derived tier set.
    pub tiers_requested: usize,
    /// Number of tiers that produced a valid analysis.
    pub tiers_analyzed: usize,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
}

/// A market report together with its run metadata, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub metadata: ReportMetadata,
    pub report: MarketReport,
}
