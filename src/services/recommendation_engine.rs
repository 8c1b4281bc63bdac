use crate::domain::models::{CheckScores, FeatureVector, ModelPrediction};

pub const MONITORING_RECOMMENDATION: &str =
    "Increase monitoring coverage across planting, growth, environmental and satellite data";
pub const HEALTH_RECOMMENDATION: &str = "Implement targeted ecosystem health interventions";
pub const DIVERSITY_RECOMMENDATION: &str = "Increase species diversity in future plantings";
pub const WATER_RECOMMENDATION: &str = "Improve water quality management around the project site";
pub const SEQUESTRATION_RECOMMENDATION: &str =
    "Optimize planting density and species selection to raise sequestration";

const MIN_DATA_QUALITY: f64 = 0.7;
const MIN_HEALTH_SCORE: f64 = 0.6;
const MIN_SPECIES_DIVERSITY: f64 = 3.0;
const MIN_WATER_QUALITY: f64 = 0.6;
const MIN_SEQUESTRATION: f64 = 3.0;

/// Rule-based follow-up actions, reported in fixed order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub const fn new() -> Self {
        Self
    }

    pub fn recommend(
        &self,
        features: &FeatureVector,
        fused: &ModelPrediction,
        checks: &CheckScores,
    ) -> Vec<String> {
        let rules = [
            (checks.data_quality < MIN_DATA_QUALITY, MONITORING_RECOMMENDATION),
            (fused.health_score < MIN_HEALTH_SCORE, HEALTH_RECOMMENDATION),
            (features.species_diversity < MIN_SPECIES_DIVERSITY, DIVERSITY_RECOMMENDATION),
            (features.water_quality < MIN_WATER_QUALITY, WATER_RECOMMENDATION),
            (fused.carbon_sequestration < MIN_SEQUESTRATION, SEQUESTRATION_RECOMMENDATION),
        ];

        rules
            .into_iter()
            .filter(|(fired, _)| *fired)
            .map(|(_, recommendation)| recommendation.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(species_diversity: f64, water_quality: f64) -> FeatureVector {
        FeatureVector {
            ecosystem_type: 2.0,
            planting_density: 50.0,
            species_diversity,
            average_height: 0.4,
            average_diameter: 0.5,
            growth_rate: 0.1,
            survival_rate: 0.9,
            water_quality,
            soil_quality: 0.6,
            air_quality: 0.6,
            vegetation_index: 0.6,
            area_change: 0.0,
            deforestation_risk: 0.1,
            project_age: 1.0,
            data_frequency: 0.2,
            seasonal_variation: 0.0,
        }
    }

    fn checks(data_quality: f64) -> CheckScores {
        CheckScores {
            data_quality,
            growth_consistency: 1.0,
            environmental_health: 1.0,
            satellite_consistency: 1.0,
            carbon_calculation: 1.0,
            compliance_check: 1.0,
        }
    }

    #[test]
    fn test_no_recommendations_when_all_good() {
        let fused = ModelPrediction::clamped(5.0, 100.0, 0.2, 0.8, 0.9);
        let recs = RecommendationEngine::new().recommend(&features(4.0, 0.8), &fused, &checks(1.0));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_recommendations_in_fixed_order() {
        let fused = ModelPrediction::clamped(2.5, 50.0, 0.0, 0.4, 0.9);
        let recs = RecommendationEngine::new().recommend(&features(1.0, 0.5), &fused, &checks(0.5));
        assert_eq!(
            recs,
            vec![
                MONITORING_RECOMMENDATION,
                HEALTH_RECOMMENDATION,
                DIVERSITY_RECOMMENDATION,
                WATER_RECOMMENDATION,
                SEQUESTRATION_RECOMMENDATION,
            ]
        );
    }

    #[test]
    fn test_single_rule() {
        let fused = ModelPrediction::clamped(5.0, 100.0, 0.2, 0.8, 0.9);
        let recs = RecommendationEngine::new().recommend(&features(2.0, 0.8), &fused, &checks(0.75));
        assert_eq!(recs, vec![DIVERSITY_RECOMMENDATION]);
    }
}
