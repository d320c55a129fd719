//! Report generation for aggregated analysis results
//!
//! Two pure renderings: a lossless structured (JSON) export and a
//! fixed-layout narrative (plain text) export. The exporter never fetches
//! data and never touches the filesystem; callers own file naming and
//! download mechanics, helped by the artifact-name functions here.

pub mod formats;
pub mod models;

pub use formats::json::{generate_json_report, json_report_file_name};
pub use formats::text::{
    generate_text_report, generate_vulnerability_report, text_report_file_name,
    vulnerability_report_file_name,
};
pub use models::{ReportSummary, StructuredReport};
