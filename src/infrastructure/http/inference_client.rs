use async_trait::async_trait;
use tracing::{debug, instrument};

use super::client::JsonHttpClient;
use crate::domain::errors::RemoteError;
use crate::domain::models::{ModelEndpointConfig, ModelPrediction};
use crate::domain::ports::{InferenceClient, InferenceRequest};

/// Inference service reached over HTTP
pub struct HttpInferenceClient {
    model_id: String,
    endpoint: String,
    transport: JsonHttpClient,
}

impl HttpInferenceClient {
    pub fn new(model: &ModelEndpointConfig, transport: JsonHttpClient) -> Self {
        Self {
            model_id: model.id.clone(),
            endpoint: model.endpoint.clone(),
            transport,
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    #[instrument(skip(self, request), fields(model_id = %self.model_id))]
    async fn predict(&self, request: &InferenceRequest) -> Result<ModelPrediction, RemoteError> {
        let body = self.transport.post_json(&self.endpoint, request).await?;
        let prediction = ModelPrediction::from_response(&body)?;
        debug!(
            confidence = prediction.confidence,
            carbon_sequestration = prediction.carbon_sequestration,
            "model responded"
        );
        Ok(prediction)
    }
}
