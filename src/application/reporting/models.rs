//! Report data models

use serde::{Deserialize, Serialize};

use crate::application::aggregation::{AnalysisAggregate, SeverityBreakdown, TypeCount};
use crate::domain::entities::AnalysisResult;
use crate::domain::severity::RiskBand;

/// Derived statistics attached to a structured export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub counts_by_severity: SeverityBreakdown,
    pub counts_by_type: Vec<TypeCount>,
    pub risk_band: RiskBand,
    pub deployment_ready: bool,
    pub audit_required: bool,
}

/// Lossless structured export: the analysis payload plus its aggregates
///
/// The payload fields stay at the top level exactly as received, so parsing
/// the export reproduces the original `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReport {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub summary: ReportSummary,
}

impl StructuredReport {
    /// Build the export model from a validated aggregate
    pub fn from_aggregate(aggregate: &AnalysisAggregate) -> Self {
        Self {
            analysis: aggregate.result().clone(),
            summary: ReportSummary {
                counts_by_severity: aggregate.counts_by_severity(),
                counts_by_type: aggregate.counts_by_type(),
                risk_band: aggregate.risk_band(),
                deployment_ready: aggregate.deployment_ready(),
                audit_required: aggregate.audit_required(),
            },
        }
    }
}
