//! Error taxonomy for the client, aggregator, and exporter
//!
//! Every failure path yields exactly one typed error; nothing is swallowed
//! or retried internally. Callers match exhaustively on the variants to
//! decide whether to present, log, or retry.

use thiserror::Error;

/// Analysis response (or payload handed to the aggregator) violates the
/// data model: wrong shape, unknown severity, out-of-range score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed analysis result: {reason}")]
pub struct MalformedResultError {
    pub reason: String,
}

impl MalformedResultError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure surfaced by the analysis API client
///
/// Transport/protocol status codes map onto the domain variants; anything
/// the mapping does not recognize lands in `Transport` with the underlying
/// cause preserved.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Bad input, detected client-side before any network call or reported
    /// by the server with a detail message. Never retried automatically.
    #[error("{reason}")]
    Validation { reason: String },

    /// Submission exceeds the service's size cap (HTTP 413 or the
    /// client-side check; `size` is known only for the latter)
    #[error("File too large. Maximum size is 50MB.")]
    PayloadTooLarge { size: Option<u64>, limit: u64 },

    /// HTTP 429
    #[error("Too many requests. Please wait a moment before trying again.")]
    RateLimited { retry_after: Option<u64> },

    /// Server-side failure (5xx)
    #[error("Server error (status {status}). Please try again later.")]
    Service {
        status: u16,
        message: Option<String>,
    },

    /// Connection refused or host unreachable
    #[error("Cannot connect to analysis server. Please ensure the backend is running.")]
    Unavailable {
        #[source]
        source: reqwest::Error,
    },

    /// Exceeded the client's fixed time budget
    #[error("Analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Unknown sample contract name (HTTP 404 on the per-item fetch)
    #[error("Sample contract not found: {name}")]
    NotFound { name: String },

    /// Response body violates the data model
    #[error(transparent)]
    MalformedResult(#[from] MalformedResultError),

    /// Any other transport failure, cause preserved
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ApiClientError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Failure while rendering a structured report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
