use crate::domain::models::{FeatureVector, ModelPrediction};

pub const LOW_CONFIDENCE_RISK: &str = "Low model confidence in carbon predictions";
pub const DEFORESTATION_RISK: &str =
    "Elevated deforestation risk detected from satellite vegetation trend";
pub const LOW_SURVIVAL_RISK: &str = "Low plant survival rate";
pub const POOR_WATER_QUALITY_RISK: &str = "Poor water quality conditions";
pub const LOW_SEQUESTRATION_RISK: &str = "Carbon sequestration below regional benchmark";

const MIN_CONFIDENCE: f64 = 0.7;
const MAX_DEFORESTATION_RISK: f64 = 0.3;
const MIN_SURVIVAL_RATE: f64 = 0.8;
const MIN_WATER_QUALITY: f64 = 0.6;
const MIN_SEQUESTRATION: f64 = 2.0;

/// Rule-based risk factors for a verified estimate.
///
/// Every rule is evaluated independently and fired rules are reported in a
/// fixed priority order. No rule suppresses another.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessor;

impl RiskAssessor {
    pub const fn new() -> Self {
        Self
    }

    pub fn assess(&self, features: &FeatureVector, fused: &ModelPrediction) -> Vec<String> {
        let rules = [
            (fused.confidence < MIN_CONFIDENCE, LOW_CONFIDENCE_RISK),
            (features.deforestation_risk > MAX_DEFORESTATION_RISK, DEFORESTATION_RISK),
            (features.survival_rate < MIN_SURVIVAL_RATE, LOW_SURVIVAL_RISK),
            (features.water_quality < MIN_WATER_QUALITY, POOR_WATER_QUALITY_RISK),
            (fused.carbon_sequestration < MIN_SEQUESTRATION, LOW_SEQUESTRATION_RISK),
        ];

        rules
            .into_iter()
            .filter(|(fired, _)| *fired)
            .map(|(_, risk)| risk.to_string())
            .collect()
    }
}
