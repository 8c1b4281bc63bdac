use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::RemoteError;
use crate::domain::models::{EcosystemType, FeatureVector, ModelPrediction};

/// Body sent to an inference service
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub model_id: String,
    pub features: FeatureVector,
    pub ecosystem_type: EcosystemType,
}

/// Port for one external model service
///
/// Implementations report failures as [`RemoteError`]; turning a failure into
/// the zero-confidence default is the caller's job (see
/// [`ModelPrediction::from_outcome`]).
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Identifier of the model this client serves
    fn model_id(&self) -> &str;

    /// Request a prediction for the given features
    async fn predict(&self, request: &InferenceRequest) -> Result<ModelPrediction, RemoteError>;
}
