//! API client implementations for the remote analysis service

pub mod analysis;
pub mod traits;

pub use analysis::{AnalysisApiClient, MAX_CONTRACT_BYTES, SUPPORTED_EXTENSIONS};
pub use traits::AnalysisApi;
