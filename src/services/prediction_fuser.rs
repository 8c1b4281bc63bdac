use crate::domain::models::ModelPrediction;

/// Combines independent model predictions into one estimate.
///
/// Each numeric field is the confidence-weighted mean of the inputs, with
/// weight = confidence / sum of confidences. The fused confidence is the plain
/// mean of the input confidences. When every input has zero confidence the
/// weights are undefined and the unweighted mean is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionFuser;

impl PredictionFuser {
    pub const fn new() -> Self {
        Self
    }

    pub fn fuse(&self, predictions: &[ModelPrediction]) -> ModelPrediction {
        if predictions.is_empty() {
            return ModelPrediction::zeroed();
        }

        let count = predictions.len() as f64;
        let total_confidence: f64 = predictions.iter().map(|p| p.confidence).sum();
        let weights: Vec<f64> = if total_confidence > 0.0 {
            predictions
                .iter()
                .map(|p| p.confidence / total_confidence)
                .collect()
        } else {
            vec![1.0 / count; predictions.len()]
        };

        let weighted = |field: fn(&ModelPrediction) -> f64| -> f64 {
            predictions
                .iter()
                .zip(&weights)
                .map(|(p, w)| field(p) * w)
                .sum()
        };

        ModelPrediction::clamped(
            weighted(|p| p.carbon_sequestration),
            weighted(|p| p.biomass),
            weighted(|p| p.growth_rate),
            weighted(|p| p.health_score),
            total_confidence / count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(carbon: f64, confidence: f64) -> ModelPrediction {
        ModelPrediction::clamped(carbon, carbon * 20.0, carbon / 10.0, 0.7, confidence)
    }

    #[test]
    fn test_weighted_fusion() {
        let fused = PredictionFuser::new().fuse(&[prediction(5.0, 0.8), prediction(7.0, 0.6)]);

        assert!((fused.confidence - 0.7).abs() < 1e-9);
        // (5 * 0.8 + 7 * 0.6) / 1.4
        assert!((fused.carbon_sequestration - 41.0 / 7.0).abs() < 1e-9);
        assert!((fused.carbon_sequestration - 5.857).abs() < 1e-3);
        assert!((fused.health_score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_zero_confidence_falls_back_to_unweighted_mean() {
        let fused = PredictionFuser::new().fuse(&[prediction(4.0, 0.0), prediction(8.0, 0.0)]);

        assert_eq!(fused.confidence, 0.0);
        assert!((fused.carbon_sequestration - 6.0).abs() < 1e-9);
        assert!((fused.biomass - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_confidence_model_contributes_nothing() {
        let fused = PredictionFuser::new().fuse(&[prediction(4.0, 0.9), ModelPrediction::zeroed()]);

        assert!((fused.carbon_sequestration - 4.0).abs() < 1e-9);
        assert!((fused.confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(PredictionFuser::new().fuse(&[]), ModelPrediction::zeroed());
    }

    #[test]
    fn test_single_prediction_is_identity() {
        let p = prediction(3.3, 0.65);
        assert_eq!(PredictionFuser::new().fuse(&[p]), p);
    }
}
