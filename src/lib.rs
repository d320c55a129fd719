//! scaudit - Client, aggregation, and reporting toolkit for AI-assisted
//! smart contract security analysis
//!
//! The detection engine itself is a remote collaborator reached over HTTP;
//! this crate turns its raw analysis payloads into aggregated risk metrics,
//! a deterministically ordered vulnerability list, and exportable reports.
//!
//! # Modules
//!
//! - [`domain`] — Severity/risk taxonomy and wire-schema entities
//! - [`application`] — Aggregation, report generation, and error types
//! - [`infrastructure`] — The typed HTTP client for the analysis service
//! - [`config`] — Strongly-typed configuration with file and environment support
//! - [`logging`] — Structured logging with tracing
//! - [`cli`] — Command-line consumer of the library
//!
//! # Architecture
//!
//! ```text
//! scaudit/
//! ├── domain/           # Severity ranks, risk bands, entities
//! ├── application/      # Aggregation + JSON/text report exporters
//! ├── infrastructure/   # reqwest client with typed error mapping
//! ├── config/           # Configuration management
//! └── cli/              # analyze / samples / health subcommands
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use scaudit::application::aggregation::AnalysisAggregate;
//! use scaudit::application::reporting::generate_text_report;
//! use scaudit::infrastructure::api_clients::{AnalysisApi, AnalysisApiClient};
//!
//! let client = AnalysisApiClient::new("http://localhost:8000")?;
//! let result = client.submit_for_analysis("bank.sol", contents).await?;
//! let aggregate = AnalysisAggregate::new(result)?;
//! println!("{}", generate_text_report(&aggregate));
//! ```
//!
//! Environment variables use the `SCAUDIT__` prefix with double underscore
//! separators:
//!
//! ```bash
//! SCAUDIT__API__BASE_URL=http://localhost:8000
//! SCAUDIT__API__TIMEOUT_SECONDS=120
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
