//! Entities mirroring the analysis service's wire schema
//!
//! Field names on the wire are camelCase; every type round-trips through
//! serde without loss so that structured exports reproduce the payload
//! exactly. Optional schema fields map to `Option`, not sentinel values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::severity::Severity;

/// Location of a finding in contract source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityLocation {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// Suggested remediation with before/after code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFix {
    pub description: String,
    pub original_code: String,
    pub fixed_code: String,
    pub explanation: String,
    pub risk_reduction: String,
}

/// One detected finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    /// Vulnerability category, an open string enumeration ("Reentrancy", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub location: VulnerabilityLocation,
    pub impact: String,
    pub likelihood: String,
    /// 0-10, supplied by the service independently of `severity`
    pub risk_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<String>,
    pub recommendation: String,
    pub detection_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_loss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<CodeFix>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl Vulnerability {
    /// MITRE reference URL for a well-formed `cweId` (`CWE-<digits>`)
    pub fn cwe_url(&self) -> Option<String> {
        let id = self.cwe_id.as_deref()?;
        let digits = id.strip_prefix("CWE-")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!(
            "https://cwe.mitre.org/data/definitions/{}.html",
            digits
        ))
    }
}

/// Structural facts about the analyzed contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    #[serde(default)]
    pub lines_of_code: u64,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state_variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
}

/// AI commentary attached to an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub category: String,
    pub insight: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub actionable: bool,
}

/// Top-level payload for one submitted contract
///
/// Constructed once per successful API call, immutable after aggregation
/// validates it, and replaced wholesale on the next submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub contract_name: String,
    pub file_name: String,
    /// ISO-8601 timestamp, kept verbatim as the service supplied it
    pub analysis_timestamp: String,
    /// 0-10 aggregate score
    pub overall_risk_score: f64,
    /// Validated against `vulnerabilities.len()` during aggregation
    pub total_vulnerabilities: usize,
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_info: Option<ContractInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Vec<AiInsight>>,
}

/// Sample contract descriptor from the service's catalog
///
/// `content` is omitted in catalog listings and populated by the per-item
/// fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleContract {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vulnerability_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Liveness payload from `GET /health`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub services: HashMap<String, String>,
}
