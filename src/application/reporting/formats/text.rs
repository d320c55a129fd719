//! Narrative (plain text) report format
//!
//! Fixed layout with a deterministic section order; rendering the same
//! validated aggregate twice yields byte-identical text.

use crate::application::aggregation::AnalysisAggregate;
use crate::domain::entities::{Vulnerability, VulnerabilityLocation};

/// Render the narrative report for a whole analysis.
///
/// Findings appear 1-based in canonical order (most severe first, stable
/// among equals); a clean contract gets an explicit statement instead of an
/// empty list.
pub fn generate_text_report(aggregate: &AnalysisAggregate) -> String {
    let result = aggregate.result();
    let mut report = String::new();

    report.push_str("SMART CONTRACT SECURITY ANALYSIS REPORT\n");
    report.push_str("==========================================\n\n");
    report.push_str(&format!("Contract: {}\n", result.contract_name));
    report.push_str(&format!("File: {}\n", result.file_name));
    report.push_str(&format!("Analysis Date: {}\n", result.analysis_timestamp));
    report.push_str(&format!(
        "Overall Risk Score: {:.1}/10\n",
        result.overall_risk_score
    ));
    report.push_str(&format!(
        "Total Vulnerabilities: {}\n\n",
        result.total_vulnerabilities
    ));

    let sorted = aggregate.sorted_vulnerabilities();
    if sorted.is_empty() {
        report.push_str("No vulnerabilities detected. Contract appears secure.\n");
        return report;
    }

    report.push_str("VULNERABILITIES FOUND:\n");
    report.push_str("=====================\n\n");
    for (index, vuln) in sorted.iter().enumerate() {
        report.push_str(&format!("{}. {}\n", index + 1, vuln.title));
        report.push_str(&format!("   Severity: {}\n", vuln.severity));
        report.push_str(&format!("   Type: {}\n", vuln.kind));
        report.push_str(&format!("   Location: {}\n", format_lines(&vuln.location)));
        report.push_str(&format!("   Description: {}\n", vuln.description));
        report.push_str(&format!("   Impact: {}\n", vuln.impact));
        report.push_str(&format!("   Recommendation: {}\n\n", vuln.recommendation));
    }

    report
}

/// Render the narrative report for a single finding, including the
/// suggested fix when one is present.
pub fn generate_vulnerability_report(vuln: &Vulnerability) -> String {
    let mut report = String::new();

    report.push_str("VULNERABILITY REPORT\n");
    report.push_str("==================\n\n");
    report.push_str(&format!("Title: {}\n", vuln.title));
    report.push_str(&format!("Severity: {}\n", vuln.severity));
    report.push_str(&format!("Type: {}\n", vuln.kind));
    report.push_str(&format!("Risk Score: {:.1}/10\n", vuln.risk_score));
    report.push_str(&format!(
        "Location: {} ({})\n\n",
        vuln.location.file,
        format_lines(&vuln.location)
    ));

    report.push_str(&format!("Description:\n{}\n\n", vuln.description));
    report.push_str(&format!("Impact:\n{}\n\n", vuln.impact));
    report.push_str(&format!("Likelihood:\n{}\n\n", vuln.likelihood));
    report.push_str(&format!("Recommendation:\n{}\n\n", vuln.recommendation));

    if let Some(loss) = &vuln.potential_loss {
        report.push_str(&format!("Potential Loss: {}\n", loss));
    }
    if let Some(cwe) = &vuln.cwe_id {
        report.push_str(&format!("CWE ID: {}\n", cwe));
    }
    report.push_str(&format!("Detection Method: {}\n", vuln.detection_method));

    if let Some(fix) = &vuln.suggested_fix {
        report.push_str("\nSUGGESTED FIX:\n");
        report.push_str(&format!("{}\n\n", fix.description));
        report.push_str(&format!("Original Code:\n{}\n\n", fix.original_code));
        report.push_str(&format!("Fixed Code:\n{}\n\n", fix.fixed_code));
        report.push_str(&format!("Explanation:\n{}\n\n", fix.explanation));
        report.push_str(&format!("Risk Reduction: {}\n", fix.risk_reduction));
    }

    report
}

/// Artifact name for the narrative export
pub fn text_report_file_name(contract_name: &str) -> String {
    format!("{}_report.txt", contract_name)
}

/// Artifact name for a single-finding export
pub fn vulnerability_report_file_name(vulnerability_id: &str) -> String {
    format!("{}_report.txt", vulnerability_id)
}

/// `Line {start}`, `-{end}` only when the range spans lines, plus the
/// enclosing function when known.
fn format_lines(location: &VulnerabilityLocation) -> String {
    let mut out = format!("Line {}", location.start_line);
    if location.end_line != location.start_line {
        out.push_str(&format!("-{}", location.end_line));
    }
    if let Some(function) = &location.function {
        out.push_str(&format!(" in function {}()", function));
    }
    out
}
