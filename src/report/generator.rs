//! Markdown report generation.
//!
//! Renders a market report document into Markdown: run metadata, the
//! synthesized overall analysis, one section per tier with role blocks,
//! and summary statistics.

use crate::config::ReportConfig;
use crate::models::{CommonRole, ReportDocument, ReportMetadata, TierAnalysis};
use crate::report::csv_export::{format_city_openings, format_salary};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(document: &ReportDocument, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# TierScout Market Report\n\n");

    output.push_str(&generate_metadata_section(&document.metadata));
    output.push_str(&generate_overall_section(&document.report.overall_analysis));

    if document.report.has_results() {
        output.push_str(&generate_summary_table(&document.report.tier_analyses));

        for tier in &document.report.tier_analyses {
            output.push_str(&generate_tier_section(tier, config));
        }
    } else {
        output.push_str(&generate_no_results_section());
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Qualification:** {}\n",
        metadata.filters.qualification
    ));
    section.push_str(&format!("- **Sector:** {}\n", metadata.filters.sector));
    section.push_str(&format!(
        "- **Location Tier(s):** {}\n",
        metadata.filters.location
    ));
    section.push_str(&format!("- **Job Role:** {}\n", metadata.filters.job_role));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Model Used:** `{}`\n", metadata.model_used));
    section.push_str(&format!(
        "- **Tiers Analyzed:** {}/{}\n",
        metadata.tiers_analyzed, metadata.tiers_requested
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the overall analysis section.
fn generate_overall_section(overall_analysis: &str) -> String {
    let mut section = String::new();

    section.push_str("## Overall Analysis\n\n");
    section.push_str(overall_analysis);
    section.push_str("\n\n");

    section
}

/// Generate the per-tier roles summary table.
fn generate_summary_table(tiers: &[TierAnalysis]) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Tier | Roles | Role-City Combinations |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for tier in tiers {
        let combinations: usize = tier
            .common_roles
            .iter()
            .map(|r| r.city_openings.len())
            .sum();
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            tier.tier,
            tier.common_roles.len(),
            combinations
        ));
    }
    section.push('\n');

    section
}

/// Generate the section for a single tier.
fn generate_tier_section(tier: &TierAnalysis, config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", tier.tier));
    section.push_str(&format!("{}\n\n", tier.summary));

    if tier.common_roles.is_empty() {
        section.push_str("*No matching roles were found in this tier.*\n\n");
        return section;
    }

    let shown = if config.max_roles_per_tier > 0 {
        config.max_roles_per_tier.min(tier.common_roles.len())
    } else {
        tier.common_roles.len()
    };

    for role in &tier.common_roles[..shown] {
        section.push_str(&generate_role_block(role, config));
    }

    if shown < tier.common_roles.len() {
        section.push_str(&format!(
            "*...and {} more role(s), see the CSV export for the full set.*\n\n",
            tier.common_roles.len() - shown
        ));
    }

    section
}

/// Generate a single role block.
fn generate_role_block(role: &CommonRole, config: &ReportConfig) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {}\n\n", role.role_name));
    block.push_str(&format!("{}\n\n", role.role_description));

    if config.include_skills {
        block.push_str(&format!(
            "- **Technical Skills:** {}\n",
            role.skill_set.technical_skills.join(", ")
        ));
        block.push_str(&format!(
            "- **Soft Skills:** {}\n",
            role.skill_set.soft_skills.join(", ")
        ));
        block.push_str(&format!(
            "- **Languages:** {}\n",
            role.skill_set.language_requirements.join(", ")
        ));
    }

    block.push_str(&format!(
        "- **Hiring Companies:** {}\n",
        role.hiring_companies.join(", ")
    ));
    block.push_str(&format!(
        "- **Top Cities:** {}\n",
        format_city_openings(&role.city_openings)
    ));
    block.push_str(&format!(
        "- **Monthly Salary ({}):** {}\n",
        role.salary_range.currency,
        format_salary(&role.salary_range)
    ));

    if config.include_platforms && !role.platforms.is_empty() {
        let links: Vec<String> = role
            .platforms
            .iter()
            .map(|p| format!("[{}]({})", p.platform_name, p.search_link))
            .collect();
        block.push_str(&format!("- **Platforms:** {}\n", links.join(" · ")));
    }

    block.push('\n');

    block
}

/// Generate the "no results" section.
fn generate_no_results_section() -> String {
    let mut section = String::new();

    section.push_str("## No Results Found\n\n");
    section.push_str(
        "The model could not find a significant number of results for the selected \
         filters. Please try a different combination.\n\n",
    );

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by tierscout*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(document: &ReportDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(Into::into)
}

/// Write a Markdown report to a file.
#[allow(dead_code)] // Convenience wrapper
pub fn write_markdown_report(
    document: &ReportDocument,
    config: &ReportConfig,
    path: &Path,
) -> Result<()> {
    let content = generate_markdown_report(document, config);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
