//! Read-only aggregation over a validated analysis result
//!
//! The aggregate owns an immutable snapshot of the payload; every derived
//! statistic is a deterministic, order-stable function of that snapshot.
//! Findings are never dropped, deduplicated, or mutated here.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::errors::MalformedResultError;
use crate::domain::entities::{AnalysisResult, Vulnerability};
use crate::domain::severity::{audit_required, deployment_ready, RiskBand, Severity};

/// Finding counts per severity level, zero for absent levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeverityBreakdown {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Info => self.info += 1,
        }
    }

    /// Count for one severity level
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    /// Sum across all levels
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// Occurrence count for one vulnerability type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
}

/// Validated analysis result plus its derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisAggregate {
    result: AnalysisResult,
}

impl AnalysisAggregate {
    /// Validate a raw result and freeze it for aggregation.
    ///
    /// Rejects an `overallRiskScore` outside [0, 10]. A
    /// `totalVulnerabilities` that disagrees with the actual list length is
    /// recoverable: the count is recomputed from the list and the mismatch
    /// logged.
    pub fn new(mut result: AnalysisResult) -> Result<Self, MalformedResultError> {
        if !(0.0..=10.0).contains(&result.overall_risk_score) {
            return Err(MalformedResultError::new(format!(
                "overallRiskScore {} is outside [0, 10]",
                result.overall_risk_score
            )));
        }

        let actual = result.vulnerabilities.len();
        if result.total_vulnerabilities != actual {
            warn!(
                reported = result.total_vulnerabilities,
                actual, "totalVulnerabilities disagrees with list length, recomputing"
            );
            result.total_vulnerabilities = actual;
        }

        Ok(Self { result })
    }

    /// Validate an untrusted JSON payload.
    ///
    /// Shape violations (a `vulnerabilities` that is not a sequence, a
    /// severity outside the known enumeration, missing required fields)
    /// fail with [`MalformedResultError`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, MalformedResultError> {
        let result: AnalysisResult = serde_json::from_value(value)
            .map_err(|e| MalformedResultError::new(e.to_string()))?;
        Self::new(result)
    }

    /// The validated payload
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    /// Consume the aggregate, returning the validated payload
    pub fn into_result(self) -> AnalysisResult {
        self.result
    }

    /// Finding counts per severity level
    pub fn counts_by_severity(&self) -> SeverityBreakdown {
        let mut breakdown = SeverityBreakdown::default();
        for vuln in &self.result.vulnerabilities {
            breakdown.record(vuln.severity);
        }
        breakdown
    }

    /// Occurrence counts per vulnerability type, keys in first-seen order
    pub fn counts_by_type(&self) -> Vec<TypeCount> {
        let mut counts: Vec<TypeCount> = Vec::new();
        for vuln in &self.result.vulnerabilities {
            match counts.iter_mut().find(|c| c.kind == vuln.kind) {
                Some(entry) => entry.count += 1,
                None => counts.push(TypeCount {
                    kind: vuln.kind.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// Findings sorted ascending by severity rank, input order preserved
    /// among equals. This is the canonical display and report order.
    pub fn sorted_vulnerabilities(&self) -> Vec<&Vulnerability> {
        let mut sorted: Vec<&Vulnerability> = self.result.vulnerabilities.iter().collect();
        sorted.sort_by_key(|v| v.severity.rank());
        sorted
    }

    /// Risk band for the aggregate score
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.result.overall_risk_score)
    }

    /// Whether the contract is fit to deploy (score <= 4)
    pub fn deployment_ready(&self) -> bool {
        deployment_ready(self.result.overall_risk_score)
    }

    /// Whether a manual audit is called for (score >= 6)
    pub fn audit_required(&self) -> bool {
        audit_required(self.result.overall_risk_score)
    }

    /// Best-effort parse of the ISO-8601 analysis timestamp, for display
    pub fn analysis_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.result.analysis_timestamp).ok()
    }
}
