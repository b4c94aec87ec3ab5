//! Prompt construction for market analysis requests.
//!
//! Two request kinds: a per-tier structured extraction prompt built from
//! the filters, and a free-text synthesis prompt built from the successful
//! tiers' summaries only.

use crate::models::{Filters, TierAnalysis, ALL_ROLES};

/// System instruction for per-tier structured extraction.
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert job market analyst for India, \
tasked with providing a strategic, tier-based analysis of the current, live entry-level \
job market. Your entire response must be a single, valid JSON object that strictly \
adheres to the provided schema. Do not output any markdown.";

/// System instruction for the cross-tier narrative.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are an expert job market analyst for India. \
You write concise executive summaries in plain prose. Respond with a single paragraph \
and no markdown.";

/// Build the structured-extraction prompt for a single tier.
pub fn tier_analysis_prompt(filters: &Filters, tier: &str) -> String {
    format!(
        r#"**User Filters:**
- **Qualification:** {qualification}
- **Sector Focus:** {sector}
- **Location Tier to Analyze:** {tier}
- **Specific Job Role:** {job_role}

**Your Instructions:**
1. **Analyze One Tier:** Restrict the entire analysis to {tier}. Do not include data for any other tier, and set the `tier` field to exactly "{tier}".
2. **Maximize Job Roles:** {role_instruction} Your target is a large number of role-city combinations if the data exists.
3. **Find Quantitative Data:** For each role, you MUST find the top 3-5 cities within {tier} where the role is prevalent. For each of these cities, provide an estimated number of current, live job openings as a string like "50-100" or "150+".
4. **Detail Structured Skills:** For each role, provide a structured breakdown of skills into three categories: technicalSkills, softSkills, and languageRequirements. Be specific (e.g., 'English (Fluent, Written & Spoken)'). This is mandatory.
5. **Find Companies:** For each role, list the top 5-10 hiring companies.
6. **Estimate Salary:** Provide an estimated entry-level monthly salary range in INR for each role.
7. **Provide CORRECT Platform Links:** For each role, provide 2-4 direct search links to major Indian job platforms (e.g., Naukri.com, LinkedIn, Indeed.co.in). The URLs MUST be valid, clickable, and lead directly to a search results page that is correctly pre-filtered with the role title and location.
8. **Summarize:** Write a short summary of the job landscape within {tier}."#,
        qualification = filters.qualification,
        sector = filters.sector,
        tier = tier,
        job_role = filters.job_role,
        role_instruction = role_instruction(filters),
    )
}

fn role_instruction(filters: &Filters) -> String {
    if filters.job_role == ALL_ROLES {
        format!(
            "Identify a comprehensive list of 25-50 of the most common and distinct \
             entry-level job roles for a {} graduate in the {} sector. The goal is a \
             large, detailed dataset. Crucially, you must focus specifically on roles \
             within these domains: Business Process Outsourcing (BPO), Banking, FinTech, \
             IT (specifically BPO-related roles), and Logistics.",
            filters.qualification, filters.sector
        )
    } else {
        format!(
            "Conduct a focused analysis exclusively for the \"{}\" position suitable \
             for a {} graduate. Do not include any other roles.",
            filters.job_role, filters.qualification
        )
    }
}

/// Build the synthesis prompt from the successful tiers' summaries.
///
/// Carries only tier labels and summary text, never role data.
pub fn overall_synthesis_prompt(analyses: &[TierAnalysis]) -> String {
    let mut prompt = String::from(
        "The following are summaries of the current entry-level job market in India, \
         one per analyzed city tier:\n",
    );

    for analysis in analyses {
        prompt.push_str(&format!("\n{}: {}\n", analysis.tier, analysis.summary));
    }

    prompt.push_str(
        "\nWrite a single, brief paragraph analyzing the job market for this profile \
         across these tiers: the cross-tier trends, where demand concentrates, and how \
         the tiers differ.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommonRole;

    #[test]
    fn test_all_roles_branch_asks_for_enumeration() {
        let filters = Filters::default();
        let prompt = tier_analysis_prompt(&filters, "Tier 2");

        assert!(prompt.contains("25-50"));
        assert!(prompt.contains("Business Process Outsourcing (BPO)"));
        assert!(prompt.contains("Location Tier to Analyze:** Tier 2"));
    }

    #[test]
    fn test_specific_role_branch_restricts_to_one_role() {
        let filters = Filters {
            job_role: "Bank Teller".to_string(),
            ..Filters::default()
        };
        let prompt = tier_analysis_prompt(&filters, "Tier 1 (Metros)");

        assert!(prompt.contains("exclusively for the \"Bank Teller\" position"));
        assert!(prompt.contains("Do not include any other roles."));
        assert!(!prompt.contains("25-50"));
    }

    #[test]
    fn test_synthesis_prompt_carries_summaries_not_roles() {
        let analyses = vec![
            TierAnalysis {
                tier: "Tier 1 (Metros)".to_string(),
                summary: "Metro demand is strong.".to_string(),
                common_roles: vec![CommonRole {
                    role_name: "KYC Analyst".to_string(),
                    role_description: "Verifies customer documents.".to_string(),
                    skill_set: crate::models::SkillSet {
                        technical_skills: vec![],
                        soft_skills: vec![],
                        language_requirements: vec![],
                    },
                    platforms: vec![],
                    hiring_companies: vec![],
                    city_openings: vec![],
                    salary_range: crate::models::SalaryRange {
                        min: 1.0,
                        max: 2.0,
                        currency: "INR".to_string(),
                    },
                }],
            },
            TierAnalysis {
                tier: "Tier 2".to_string(),
                summary: "Tier 2 is growing.".to_string(),
                common_roles: vec![],
            },
        ];

        let prompt = overall_synthesis_prompt(&analyses);

        assert!(prompt.contains("Tier 1 (Metros): Metro demand is strong."));
        assert!(prompt.contains("Tier 2: Tier 2 is growing."));
        // Summaries only: role data must not leak into the synthesis request.
        assert!(!prompt.contains("KYC Analyst"));
    }
}
