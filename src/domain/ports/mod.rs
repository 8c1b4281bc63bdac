//! Port trait definitions (Hexagonal Architecture)
//!
//! Every external collaborator of the verification engine is reached through
//! one of these traits:
//! - TelemetryStore: read-only project telemetry
//! - InferenceClient: one remote carbon model
//! - ComplianceClient: regulatory compliance assessment
//! - ResultStore: append-only verification records

pub mod compliance_client;
pub mod inference_client;
pub mod result_store;
pub mod telemetry_store;

pub use compliance_client::{ComplianceClient, ComplianceRequest};
pub use inference_client::{InferenceClient, InferenceRequest};
pub use result_store::ResultStore;
pub use telemetry_store::TelemetryStore;
