//! Domain Layer - Core models for contract analysis results
//!
//! This module contains the severity/risk taxonomy and the entities that
//! mirror the analysis service's wire schema.

pub mod entities;
pub mod severity;

pub use entities::{
    AiInsight, AnalysisResult, CodeFix, ContractInfo, HealthStatus, SampleContract,
    Vulnerability, VulnerabilityLocation,
};
pub use severity::{audit_required, deployment_ready, RiskBand, Severity};
