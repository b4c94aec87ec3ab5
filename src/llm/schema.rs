//! Response schema for per-tier structured extraction.
//!
//! This is the fixed external contract: the model's response must
//! deserialize exactly to this shape or the tier is discarded. Field
//! names and requirements mirror [`crate::models::TierAnalysis`].

use serde_json::{json, Value};

/// Schema for one tier's analysis, in the Gemini response-schema dialect.
pub fn tier_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tier": {
                "type": "STRING",
                "description": "The city tier being analyzed, e.g., 'Tier 1 (Metros)'."
            },
            "summary": {
                "type": "STRING",
                "description": "A short summary of the job landscape within this specific tier."
            },
            "commonRoles": {
                "type": "ARRAY",
                "description": "The most common and distinct entry-level job roles found in this tier based on the filters. If a specific job role was requested, this array contains only that role.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "roleName": { "type": "STRING" },
                        "roleDescription": {
                            "type": "STRING",
                            "description": "A concise 1-2 sentence description of the role's responsibilities."
                        },
                        "skillSet": {
                            "type": "OBJECT",
                            "description": "A structured breakdown of required skills.",
                            "properties": {
                                "technicalSkills": {
                                    "type": "ARRAY",
                                    "description": "Essential technical skills (e.g., 'MS Excel', 'Tally', 'Typing Speed 40 WPM').",
                                    "items": { "type": "STRING" }
                                },
                                "softSkills": {
                                    "type": "ARRAY",
                                    "description": "Essential soft skills (e.g., 'Active Listening', 'Problem-Solving', 'Teamwork').",
                                    "items": { "type": "STRING" }
                                },
                                "languageRequirements": {
                                    "type": "ARRAY",
                                    "description": "Required languages and proficiency (e.g., 'English - Fluent', 'Hindi - Spoken').",
                                    "items": { "type": "STRING" }
                                }
                            },
                            "required": ["technicalSkills", "softSkills", "languageRequirements"]
                        },
                        "platforms": {
                            "type": "ARRAY",
                            "description": "2-4 links to job search platforms for this specific role. The URLs must be valid and pre-filtered.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "platformName": {
                                        "type": "STRING",
                                        "description": "The name of the job platform, e.g., 'Naukri', 'LinkedIn'."
                                    },
                                    "searchLink": {
                                        "type": "STRING",
                                        "description": "A direct, pre-filtered, and valid URL to a search results page for this role on the platform."
                                    }
                                },
                                "required": ["platformName", "searchLink"]
                            }
                        },
                        "hiringCompanies": {
                            "type": "ARRAY",
                            "description": "The top 5-10 companies hiring for this role in this tier.",
                            "items": { "type": "STRING" }
                        },
                        "cityOpenings": {
                            "type": "ARRAY",
                            "description": "The top 3-5 cities within this tier for this job, including an estimate of open positions.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "cityName": { "type": "STRING" },
                                    "estimatedOpenings": {
                                        "type": "STRING",
                                        "description": "Estimated number of live job openings in that city, e.g., '50-100', '150+', 'approx. 75'."
                                    }
                                },
                                "required": ["cityName", "estimatedOpenings"]
                            }
                        },
                        "salaryRange": {
                            "type": "OBJECT",
                            "description": "Estimated monthly salary range for an entry-level position in INR.",
                            "properties": {
                                "min": { "type": "NUMBER" },
                                "max": { "type": "NUMBER" },
                                "currency": {
                                    "type": "STRING",
                                    "description": "Should always be 'INR'."
                                }
                            },
                            "required": ["min", "max", "currency"]
                        }
                    },
                    "required": [
                        "roleName",
                        "roleDescription",
                        "skillSet",
                        "platforms",
                        "hiringCompanies",
                        "cityOpenings",
                        "salaryRange"
                    ]
                }
            }
        },
        "required": ["tier", "summary", "commonRoles"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_fields_are_required() {
        let schema = tier_analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(required, vec!["tier", "summary", "commonRoles"]);
    }

    #[test]
    fn test_salary_currency_is_required() {
        let schema = tier_analysis_schema();
        let salary = &schema["properties"]["commonRoles"]["items"]["properties"]["salaryRange"];
        let required: Vec<&str> = salary["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert!(required.contains(&"currency"));
    }
}
