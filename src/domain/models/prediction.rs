use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::RemoteError;

/// Neutral health score substituted when a model omits the field.
pub const NEUTRAL_HEALTH_SCORE: f64 = 0.5;

/// Output of one carbon model, or the fused output of several.
///
/// Field domains are enforced on construction through [`ModelPrediction::clamped`]:
/// sequestration and biomass are non-negative, health and confidence are in
/// [0, 1], growth rate may be negative. A confidence of 0 means the
/// prediction carries no information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    /// tCO2 per hectare per year
    pub carbon_sequestration: f64,
    pub biomass: f64,
    pub growth_rate: f64,
    pub health_score: f64,
    pub confidence: f64,
}

impl Default for ModelPrediction {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ModelPrediction {
    /// The "no information" prediction used whenever a model call fails.
    pub const fn zeroed() -> Self {
        Self {
            carbon_sequestration: 0.0,
            biomass: 0.0,
            growth_rate: 0.0,
            health_score: 0.0,
            confidence: 0.0,
        }
    }

    /// Build a prediction, clamping each field into its domain and replacing
    /// non-finite values with the neutral default for that field.
    pub fn clamped(
        carbon_sequestration: f64,
        biomass: f64,
        growth_rate: f64,
        health_score: f64,
        confidence: f64,
    ) -> Self {
        Self {
            carbon_sequestration: finite_or(carbon_sequestration, 0.0).max(0.0),
            biomass: finite_or(biomass, 0.0).max(0.0),
            growth_rate: finite_or(growth_rate, 0.0),
            health_score: finite_or(health_score, NEUTRAL_HEALTH_SCORE).clamp(0.0, 1.0),
            confidence: finite_or(confidence, 0.0).clamp(0.0, 1.0),
        }
    }

    /// Parse an inference service response body.
    ///
    /// The body must be a JSON object. Fields that are missing or not numeric
    /// fall back to their neutral default; everything is clamped.
    pub fn from_response(body: &Value) -> Result<Self, RemoteError> {
        let object = body.as_object().ok_or_else(|| {
            RemoteError::MalformedResponse(format!("expected a JSON object, got {body}"))
        })?;

        let field = |name: &str, default: f64| {
            object.get(name).and_then(Value::as_f64).unwrap_or(default)
        };

        Ok(Self::clamped(
            field("carbon_sequestration", 0.0),
            field("biomass", 0.0),
            field("growth_rate", 0.0),
            field("health_score", NEUTRAL_HEALTH_SCORE),
            field("confidence", 0.0),
        ))
    }

    /// Default-on-failure policy for a single model call.
    pub fn from_outcome(outcome: Result<Self, RemoteError>) -> Self {
        outcome.unwrap_or_else(|_| Self::zeroed())
    }

    pub fn carries_information(&self) -> bool {
        self.confidence > 0.0
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}
