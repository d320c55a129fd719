//! Structured (JSON) report format

use crate::application::aggregation::AnalysisAggregate;
use crate::application::errors::ReportError;
use crate::application::reporting::models::StructuredReport;

/// Render the structured export: the analysis payload plus derived
/// aggregates, pretty-printed. Parsing the output reproduces an
/// `AnalysisResult` equal to the aggregated input.
pub fn generate_json_report(aggregate: &AnalysisAggregate) -> Result<String, ReportError> {
    let report = StructuredReport::from_aggregate(aggregate);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Artifact name for the structured export
pub fn json_report_file_name(contract_name: &str) -> String {
    format!("{}_analysis.json", contract_name)
}
