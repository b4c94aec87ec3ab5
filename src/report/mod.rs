//! Report output modules.
//!
//! Markdown/JSON rendering of a market report, plus the CSV export.

pub mod csv_export;
pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};
