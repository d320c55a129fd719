//! Trait seam for the analysis service client

use async_trait::async_trait;

use crate::application::errors::ApiClientError;
use crate::domain::entities::{AnalysisResult, HealthStatus, SampleContract};

/// Typed operations against the remote analysis service
///
/// Every operation is a single logical attempt: no internal retries, and
/// cancellation is cooperative (drop the future to abandon the exchange).
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Upload a contract source file and return the parsed analysis result
    async fn submit_for_analysis(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<AnalysisResult, ApiClientError>;

    /// Fetch the sample catalog (content omitted per entry)
    async fn list_sample_contracts(&self) -> Result<Vec<SampleContract>, ApiClientError>;

    /// Fetch one sample with its content populated
    async fn fetch_sample_contract(&self, name: &str) -> Result<SampleContract, ApiClientError>;

    /// One-shot liveness probe
    async fn health_check(&self) -> Result<HealthStatus, ApiClientError>;
}
