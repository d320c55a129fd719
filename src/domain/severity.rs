//! Severity taxonomy and risk score interpretation
//!
//! Per-finding severity is a closed five-level enumeration, totally ordered
//! with CRITICAL highest. The aggregate `overallRiskScore` (0-10) is
//! interpreted through a separate five-band classifier; the two must not be
//! conflated: severity labels individual findings, risk bands label the
//! contract as a whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a single finding
///
/// Declaration order doubles as sort order: `Critical` compares lowest, so
/// an ascending sort puts the most severe findings first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    /// Numeric rank used as a sort key (CRITICAL=0 .. INFO=4, lower sorts first)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    /// Relative weight (CRITICAL=5 .. INFO=1)
    pub fn weight(self) -> u8 {
        5 - self.rank()
    }

    /// Wire/display form (`"CRITICAL"` .. `"INFO"`)
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl std::str::FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            "INFO" => Ok(Severity::Info),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Risk band derived from the aggregate `overallRiskScore`
///
/// Bands are lower-bound inclusive: a score of exactly 8.0 is CRITICAL,
/// exactly 6.0 is HIGH, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskBand {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl RiskBand {
    /// Classify a 0-10 risk score into its band
    pub fn from_score(score: f64) -> RiskBand {
        if score >= 8.0 {
            RiskBand::Critical
        } else if score >= 6.0 {
            RiskBand::High
        } else if score >= 4.0 {
            RiskBand::Medium
        } else if score >= 2.0 {
            RiskBand::Low
        } else {
            RiskBand::Minimal
        }
    }

    /// Wire/display form (`"CRITICAL"` .. `"MINIMAL"`)
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Critical => "CRITICAL",
            RiskBand::High => "HIGH",
            RiskBand::Medium => "MEDIUM",
            RiskBand::Low => "LOW",
            RiskBand::Minimal => "MINIMAL",
        }
    }

    /// Short advisory text for the band
    pub fn description(self) -> &'static str {
        match self {
            RiskBand::Critical => "Immediate action required",
            RiskBand::High => "Should be addressed soon",
            RiskBand::Medium => "Monitor and plan fixes",
            RiskBand::Low => "Low priority issues",
            RiskBand::Minimal => "Good security posture",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a contract with the given overall risk score is fit to deploy
pub fn deployment_ready(score: f64) -> bool {
    score <= 4.0
}

/// Whether a contract with the given overall risk score needs a manual audit
pub fn audit_required(score: f64) -> bool {
    score >= 6.0
}
