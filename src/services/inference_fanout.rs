use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn, Instrument};

use crate::domain::errors::RemoteError;
use crate::domain::models::{EcosystemType, FeatureVector, ModelPrediction};
use crate::domain::ports::{InferenceClient, InferenceRequest};

/// Context forwarded to every model alongside the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceContext {
    pub ecosystem: EcosystemType,
}

/// Queries every configured model concurrently.
///
/// Each call runs in its own task, bounded by its own timeout. Failures of
/// any kind, a panicking client included, become the zero-confidence
/// default, so the returned vector always has one entry per client, in
/// client order. Dropping the returned future aborts the outstanding calls.
#[derive(Clone)]
pub struct InferenceFanout {
    clients: Vec<Arc<dyn InferenceClient>>,
    timeout: Duration,
}

impl InferenceFanout {
    pub fn new(clients: Vec<Arc<dyn InferenceClient>>, timeout: Duration) -> Self {
        Self { clients, timeout }
    }

    pub fn model_count(&self) -> usize {
        self.clients.len()
    }

    /// Fan out to all models and wait for every call (or its timeout).
    pub async fn predict_all(
        &self,
        features: &FeatureVector,
        context: InferenceContext,
    ) -> Vec<ModelPrediction> {
        let mut calls = JoinSet::new();
        for (index, client) in self.clients.iter().enumerate() {
            let client = Arc::clone(client);
            let features = *features;
            let timeout = self.timeout;
            calls.spawn(
                async move { (index, call_model(client.as_ref(), features, context, timeout).await) }
                    .in_current_span(),
            );
        }

        let mut predictions = vec![ModelPrediction::zeroed(); self.clients.len()];
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok((index, prediction)) => predictions[index] = prediction,
                Err(err) => warn!(
                    error = %err,
                    "model task did not complete, using zero-confidence default"
                ),
            }
        }
        predictions
    }
}

/// One model call with the timeout applied. Never fails.
async fn call_model(
    client: &dyn InferenceClient,
    features: FeatureVector,
    context: InferenceContext,
    timeout: Duration,
) -> ModelPrediction {
    let request = InferenceRequest {
        model_id: client.model_id().to_string(),
        features,
        ecosystem_type: context.ecosystem,
    };

    let outcome = match tokio::time::timeout(timeout, client.predict(&request)).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout),
    };

    match &outcome {
        Ok(prediction) => debug!(
            model = %request.model_id,
            confidence = prediction.confidence,
            carbon_sequestration = prediction.carbon_sequestration,
            "model prediction received"
        ),
        Err(err) => warn!(
            model = %request.model_id,
            error = %err,
            "model call failed, using zero-confidence default"
        ),
    }

    ModelPrediction::from_outcome(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedModel {
        id: &'static str,
        delay: Duration,
        result: Result<ModelPrediction, RemoteError>,
    }

    #[async_trait]
    impl InferenceClient for FixedModel {
        fn model_id(&self) -> &str {
            self.id
        }

        async fn predict(&self, request: &InferenceRequest) -> Result<ModelPrediction, RemoteError> {
            assert_eq!(request.model_id, self.id);
            tokio::time::sleep(self.delay).await;
            self.result.clone()
        }
    }

    fn model(
        id: &'static str,
        delay: Duration,
        result: Result<ModelPrediction, RemoteError>,
    ) -> Arc<dyn InferenceClient> {
        Arc::new(FixedModel { id, delay, result })
    }

    fn features() -> FeatureVector {
        serde_json::from_value(serde_json::json!({
            "ecosystem_type": 1.0, "planting_density": 0.0, "species_diversity": 0.0,
            "average_height": 0.0, "average_diameter": 0.0, "growth_rate": 0.0,
            "survival_rate": 0.0, "water_quality": 0.5, "soil_quality": 0.5,
            "air_quality": 0.5, "vegetation_index": 0.5, "area_change": 0.0,
            "deforestation_risk": 0.1, "project_age": 0.0, "data_frequency": 0.0,
            "seasonal_variation": 0.0
        }))
        .unwrap()
    }

    fn prediction(confidence: f64) -> ModelPrediction {
        ModelPrediction::clamped(5.0, 100.0, 0.2, 0.8, confidence)
    }

    const CONTEXT: InferenceContext = InferenceContext {
        ecosystem: EcosystemType::Mangrove,
    };

    #[tokio::test]
    async fn test_results_follow_client_order() {
        let fanout = InferenceFanout::new(
            vec![
                model("slow", Duration::from_millis(50), Ok(prediction(0.9))),
                model("fast", Duration::ZERO, Ok(prediction(0.3))),
            ],
            Duration::from_secs(5),
        );

        let predictions = fanout.predict_all(&features(), CONTEXT).await;
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].confidence, 0.9);
        assert_eq!(predictions[1].confidence, 0.3);
    }

    #[tokio::test]
    async fn test_timeout_yields_zeroed_prediction() {
        let fanout = InferenceFanout::new(
            vec![
                model("stuck", Duration::from_secs(30), Ok(prediction(0.9))),
                model("ok", Duration::ZERO, Ok(prediction(0.6))),
            ],
            Duration::from_millis(20),
        );

        let predictions = fanout.predict_all(&features(), CONTEXT).await;
        assert_eq!(predictions[0], ModelPrediction::zeroed());
        assert_eq!(predictions[1].confidence, 0.6);
    }

    #[tokio::test]
    async fn test_failure_yields_zeroed_prediction() {
        let fanout = InferenceFanout::new(
            vec![model(
                "broken",
                Duration::ZERO,
                Err(RemoteError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
            )],
            Duration::from_secs(1),
        );

        let predictions = fanout.predict_all(&features(), CONTEXT).await;
        assert_eq!(predictions, vec![ModelPrediction::zeroed()]);
    }

    struct PanickingModel;

    #[async_trait]
    impl InferenceClient for PanickingModel {
        fn model_id(&self) -> &str {
            "panicking"
        }

        async fn predict(&self, _request: &InferenceRequest) -> Result<ModelPrediction, RemoteError> {
            panic!("model adapter bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_model_yields_zeroed_prediction() {
        let fanout = InferenceFanout::new(
            vec![
                Arc::new(PanickingModel) as Arc<dyn InferenceClient>,
                model("ok", Duration::ZERO, Ok(prediction(0.6))),
            ],
            Duration::from_secs(1),
        );

        let predictions = fanout.predict_all(&features(), CONTEXT).await;
        assert_eq!(predictions[0], ModelPrediction::zeroed());
        assert_eq!(predictions[1].confidence, 0.6);
    }

    #[tokio::test]
    async fn test_models_are_called_concurrently() {
        let fanout = InferenceFanout::new(
            vec![
                model("a", Duration::from_millis(200), Ok(prediction(0.8))),
                model("b", Duration::from_millis(200), Ok(prediction(0.6))),
                model("c", Duration::from_millis(200), Ok(prediction(0.4))),
            ],
            Duration::from_secs(5),
        );

        let started = std::time::Instant::now();
        let predictions = fanout.predict_all(&features(), CONTEXT).await;
        let elapsed = started.elapsed();

        assert_eq!(predictions.len(), 3);
        assert!(elapsed < Duration::from_millis(400), "fan-out took {elapsed:?}");
    }
}
