pub mod config;
pub mod features;
pub mod prediction;
pub mod telemetry;
pub mod verification;

pub use config::{
    ComplianceConfig, Config, DatabaseConfig, InferenceConfig, LoggingConfig,
    ModelEndpointConfig, RetryConfig, VerificationConfig,
};
pub use features::FeatureVector;
pub use prediction::ModelPrediction;
pub use telemetry::{
    EcosystemType, EnvironmentalReading, GeoLocation, GrowthObservation, PlantingEvent,
    ProjectTelemetry, ReadingKind, SatelliteObservation,
};
pub use verification::{
    CheckScores, VerificationRecord, VerificationResult, AUTOMATED_VERIFIER,
    SYSTEM_ERROR_RECOMMENDATION, SYSTEM_ERROR_RISK,
};
