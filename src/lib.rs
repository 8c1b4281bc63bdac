//! Blue carbon restoration verification engine
//!
//! Scores the credibility of carbon-sequestration claims made by coastal
//! ecosystem restoration projects (mangroves, seagrass, salt marsh, coastal
//! wetland).
//! Raw project telemetry is turned into a feature vector, sent to a set of
//! remote carbon models, fused into one estimate and checked against
//! independent evidence before a verified/not-verified decision is recorded.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): the verification pipeline
//! - **Infrastructure Layer** (`infrastructure`): SQLite, HTTP, config, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use bluecarbon::cli::AppContext;
//! use bluecarbon::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = AppContext::open(ConfigLoader::load()?).await?;
//!     let result = ctx.orchestrator()?.verify("mangrove-01").await;
//!     println!("verified: {}", result.verified);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::models::{
    Config, EcosystemType, FeatureVector, ModelPrediction, ProjectTelemetry, VerificationRecord,
    VerificationResult,
};
pub use domain::ports::{ComplianceClient, InferenceClient, ResultStore, TelemetryStore};
pub use domain::{DomainError, RemoteError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::VerificationOrchestrator;
