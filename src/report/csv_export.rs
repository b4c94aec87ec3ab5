//! CSV export of tier analyses.
//!
//! Flattens the report into one row per role × platform; a role with no
//! platforms still exports a single row with empty platform columns, so
//! no role is ever dropped from the export.

use crate::models::{CityOpening, CommonRole, SalaryRange, TierAnalysis};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Column headers, in export order.
pub const CSV_HEADERS: [&str; 11] = [
    "Tier",
    "Role",
    "Role Description",
    "Technical Skills",
    "Soft Skills",
    "Language Requirements",
    "Hiring Companies",
    "Top Cities & Openings",
    "Salary Range (INR)",
    "Platform",
    "Live Search Link",
];

/// Write the flattened rows for `analyses` to `writer`.
pub fn write_csv<W: Write>(analyses: &[TierAnalysis], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for tier in analyses {
        for role in &tier.common_roles {
            let base = base_fields(tier, role);

            if role.platforms.is_empty() {
                let mut record = base.clone();
                record.push(String::new());
                record.push(String::new());
                wtr.write_record(&record)?;
            } else {
                for platform in &role.platforms {
                    let mut record = base.clone();
                    record.push(platform.platform_name.clone());
                    record.push(platform.search_link.clone());
                    wtr.write_record(&record)?;
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Export the flattened rows to a file.
pub fn export_to_path(analyses: &[TierAnalysis], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(analyses, file)
}

/// Number of rows the export will produce, excluding the header.
pub fn row_count(analyses: &[TierAnalysis]) -> usize {
    analyses
        .iter()
        .flat_map(|t| &t.common_roles)
        .map(|r| r.platforms.len().max(1))
        .sum()
}

fn base_fields(tier: &TierAnalysis, role: &CommonRole) -> Vec<String> {
    vec![
        tier.tier.clone(),
        role.role_name.clone(),
        role.role_description.clone(),
        join_list(&role.skill_set.technical_skills),
        join_list(&role.skill_set.soft_skills),
        join_list(&role.skill_set.language_requirements),
        join_list(&role.hiring_companies),
        format_city_openings(&role.city_openings),
        format_salary(&role.salary_range),
    ]
}

/// Join a list cell with the export's separator.
pub fn join_list(items: &[String]) -> String {
    items.join(" | ")
}

/// Format city openings as "Name (estimate)" pairs, order preserved.
pub fn format_city_openings(cities: &[CityOpening]) -> String {
    cities
        .iter()
        .map(|c| format!("{} ({})", c.city_name, c.estimated_openings))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Format a salary range as "₹min - ₹max" with comma grouping.
pub fn format_salary(range: &SalaryRange) -> String {
    format!("₹{} - ₹{}", group_digits(range.min), group_digits(range.max))
}

fn group_digits(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
