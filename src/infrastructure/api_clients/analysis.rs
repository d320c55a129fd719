//! HTTP client for the remote contract-analysis service
//!
//! One logical attempt per call: the client enforces a fixed timeout and
//! never retries; callers compose retry/backoff externally if they want it.
//! Transport and protocol failures map onto the closed
//! [`ApiClientError`] taxonomy, with the underlying cause preserved.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::traits::AnalysisApi;
use crate::application::errors::{ApiClientError, MalformedResultError};
use crate::domain::entities::{AnalysisResult, HealthStatus, SampleContract};

/// Maximum accepted contract size (50 MiB)
pub const MAX_CONTRACT_BYTES: u64 = 52_428_800;

/// Source file extensions the service accepts
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".sol", ".vy"];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct SampleCatalog {
    #[serde(default)]
    samples: Vec<SampleContract>,
}

/// Client for the analysis service's REST API
pub struct AnalysisApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AnalysisApiClient {
    /// Create a client with the default 120 s time budget
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit time budget
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pre-flight checks applied before any network traffic: recognized
    /// extension and size under the cap.
    pub fn validate_contract_file(file_name: &str, size: u64) -> Result<(), ApiClientError> {
        let lower = file_name.to_ascii_lowercase();
        if !SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ApiClientError::validation(
                "Invalid file type. Please upload a .sol or .vy file.",
            ));
        }
        if size > MAX_CONTRACT_BYTES {
            return Err(ApiClientError::PayloadTooLarge {
                size: Some(size),
                limit: MAX_CONTRACT_BYTES,
            });
        }
        Ok(())
    }

    /// Probe availability: true iff the health endpoint answers 2xx
    pub async fn is_available(&self) -> bool {
        self.health_check().await.is_ok()
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiClientError {
        if err.is_timeout() {
            ApiClientError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ApiClientError::Unavailable { source: err }
        } else {
            ApiClientError::Transport(err)
        }
    }

    /// Map a non-2xx response onto the error taxonomy, consuming the body
    /// for the optional `{"detail": ...}` message.
    async fn error_from_response(&self, response: Response) -> ApiClientError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let detail = Self::error_detail(response).await;

        match status {
            StatusCode::PAYLOAD_TOO_LARGE => ApiClientError::PayloadTooLarge {
                size: None,
                limit: MAX_CONTRACT_BYTES,
            },
            StatusCode::TOO_MANY_REQUESTS => ApiClientError::RateLimited { retry_after },
            s if s.is_server_error() => ApiClientError::Service {
                status: s.as_u16(),
                message: detail,
            },
            _ => ApiClientError::Validation {
                reason: detail
                    .unwrap_or_else(|| "Invalid request. Please check your file format.".to_string()),
            },
        }
    }

    async fn error_detail(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        let value: serde_json::Value = serde_json::from_str(&body).ok()?;
        value.get("detail")?.as_str().map(str::to_owned)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiClientError> {
        serde_json::from_str(body)
            .map_err(|e| MalformedResultError::new(e.to_string()).into())
    }

    async fn get(&self, path: &str) -> Result<Response, ApiClientError> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }
}

#[async_trait]
impl AnalysisApi for AnalysisApiClient {
    async fn submit_for_analysis(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<AnalysisResult, ApiClientError> {
        Self::validate_contract_file(file_name, contents.len() as u64)?;

        debug!(file = file_name, bytes = contents.len(), "submitting contract for analysis");

        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Self::decode(&body)
    }

    async fn list_sample_contracts(&self) -> Result<Vec<SampleContract>, ApiClientError> {
        let response = self.get("/sample-contracts").await?;
        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let catalog: SampleCatalog = Self::decode(&body)?;
        Ok(catalog.samples)
    }

    async fn fetch_sample_contract(&self, name: &str) -> Result<SampleContract, ApiClientError> {
        let response = self.get(&format!("/sample-contracts/{}", name)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiClientError::NotFound {
                name: name.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Self::decode(&body)
    }

    async fn health_check(&self) -> Result<HealthStatus, ApiClientError> {
        let response = self.get("/health").await?;
        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }
        // Any 2xx counts as healthy; an unparseable body degrades to defaults
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn analysis_body() -> serde_json::Value {
        json!({
            "contractName": "Bank",
            "fileName": "bank.sol",
            "analysisTimestamp": "2024-05-01T12:00:00+00:00",
            "overallRiskScore": 7.5,
            "totalVulnerabilities": 1,
            "vulnerabilities": [{
                "id": "VULN-001",
                "title": "Reentrancy in withdraw",
                "severity": "CRITICAL",
                "type": "Reentrancy",
                "description": "External call before state update",
                "location": {"file": "bank.sol", "startLine": 42, "endLine": 48, "function": "withdraw"},
                "impact": "Full balance drain",
                "likelihood": "High",
                "riskScore": 9.5,
                "recommendation": "Apply checks-effects-interactions",
                "detectionMethod": "AI Analysis"
            }]
        })
    }

    #[tokio::test]
    async fn submit_parses_successful_analysis() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(analysis_body().to_string())
            .expect(1)
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let result = client
            .submit_for_analysis("bank.sol", b"contract Bank {}".to_vec())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.contract_name, "Bank");
        assert_eq!(result.vulnerabilities.len(), 1);
        assert_eq!(result.vulnerabilities[0].id, "VULN-001");
    }

    #[tokio::test]
    async fn unsupported_extension_fails_before_any_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .expect(0)
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("contract.txt", b"not solidity".to_vec())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, ApiClientError::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid file type. Please upload a .sol or .vy file."
        );
    }

    #[tokio::test]
    async fn oversized_file_fails_before_any_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .expect(0)
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("big.sol", vec![0u8; (MAX_CONTRACT_BYTES + 1) as usize])
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            ApiClientError::PayloadTooLarge { size, limit } => {
                assert_eq!(size, Some(MAX_CONTRACT_BYTES + 1));
                assert_eq!(limit, MAX_CONTRACT_BYTES);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn validation_accepts_both_extensions_case_insensitively() {
        assert!(AnalysisApiClient::validate_contract_file("a.sol", 10).is_ok());
        assert!(AnalysisApiClient::validate_contract_file("a.vy", 10).is_ok());
        assert!(AnalysisApiClient::validate_contract_file("A.SOL", 10).is_ok());
        assert!(AnalysisApiClient::validate_contract_file("a.py", 10).is_err());
        assert!(
            AnalysisApiClient::validate_contract_file("a.sol", MAX_CONTRACT_BYTES).is_ok()
        );
    }

    #[tokio::test]
    async fn bad_request_maps_to_validation_with_server_detail() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(json!({"detail": "Only Solidity (.sol) and Vyper (.vy) files are supported"}).to_string())
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();

        match err {
            ApiClientError::Validation { reason } => {
                assert_eq!(
                    reason,
                    "Only Solidity (.sol) and Vyper (.vy) files are supported"
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_413_maps_to_payload_too_large() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(413)
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiClientError::PayloadTooLarge { size: None, .. }
        ));
    }

    #[tokio::test]
    async fn http_429_maps_to_rate_limited_with_retry_after() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();
        match err {
            ApiClientError::RateLimited { retry_after } => assert_eq!(retry_after, Some(30)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_503_maps_to_service_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(json!({"detail": "model backend down"}).to_string())
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();
        match err {
            ApiClientError::Service { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.as_deref(), Some("model backend down"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn schema_violation_maps_to_malformed_result() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"contractName": "Bank", "vulnerabilities": "nope"}).to_string())
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiClientError::MalformedResult(_)));
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_unavailable() {
        // Port 1 is reserved and nothing listens there
        let client = AnalysisApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .submit_for_analysis("bank.sol", b"contract {}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiClientError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn sample_catalog_lists_in_order() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sample-contracts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"samples": [
                    {"name": "vulnerable_bank.sol", "description": "Banking contract", "vulnerabilityTypes": ["Reentrancy"]},
                    {"name": "access_control_flaw.sol", "description": "Missing checks", "vulnerabilityTypes": ["Access Control"]}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let samples = client.list_sample_contracts().await.unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "vulnerable_bank.sol");
        assert_eq!(samples[1].name, "access_control_flaw.sol");
        assert!(samples[0].content.is_none());
    }

    #[tokio::test]
    async fn unknown_sample_maps_to_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sample-contracts/ghost.sol")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json!({"detail": "Sample contract not found"}).to_string())
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let err = client.fetch_sample_contract("ghost.sol").await.unwrap_err();
        match err {
            ApiClientError::NotFound { name } => assert_eq!(name, "ghost.sol"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn sample_fetch_populates_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sample-contracts/vulnerable_bank.sol")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "vulnerable_bank.sol",
                    "description": "Banking contract",
                    "vulnerabilityTypes": ["Reentrancy"],
                    "content": "pragma solidity ^0.8.0;"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let sample = client
            .fetch_sample_contract("vulnerable_bank.sol")
            .await
            .unwrap();
        assert_eq!(sample.content.as_deref(), Some("pragma solidity ^0.8.0;"));
    }

    #[tokio::test]
    async fn health_check_accepts_any_2xx() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "healthy", "timestamp": "2024-05-01T12:00:00+00:00"}).to_string())
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        let health = client.health_check().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert!(client.is_available().await);
    }

    #[tokio::test]
    async fn health_check_failure_marks_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(500)
            .create_async()
            .await;

        let client = AnalysisApiClient::new(server.url()).unwrap();
        assert!(matches!(
            client.health_check().await.unwrap_err(),
            ApiClientError::Service { status: 500, .. }
        ));
        assert!(!client.is_available().await);
    }

    #[test]
    fn base_url_is_normalized() {
        let client = AnalysisApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
