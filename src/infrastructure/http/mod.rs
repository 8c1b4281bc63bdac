//! HTTP adapters for the inference and compliance services
//!
//! All adapters share [`JsonHttpClient`], a pooled reqwest client with
//! exponential-backoff retries on transient failures.

pub mod client;
pub mod compliance_client;
pub mod inference_client;
pub mod retry;

pub use client::JsonHttpClient;
pub use compliance_client::HttpComplianceClient;
pub use inference_client::HttpInferenceClient;
pub use retry::RetryPolicy;
