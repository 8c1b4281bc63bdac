//! Independent verification checks and the overall compliance score.
//!
//! Five of the six checks are pure functions of the telemetry, the derived
//! features and the fused prediction. The sixth asks the external compliance
//! service and fails soft to [`DEFAULT_COMPLIANCE_SCORE`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::errors::RemoteError;
use crate::domain::models::{
    CheckScores, FeatureVector, GrowthObservation, ModelPrediction, ProjectTelemetry,
};
use crate::domain::ports::{ComplianceClient, ComplianceRequest};

/// Compliance score used when the regulator cannot be reached.
pub const DEFAULT_COMPLIANCE_SCORE: f64 = 0.5;

/// Score for checks that lack enough data to say anything.
const NEUTRAL_CHECK_SCORE: f64 = 0.5;

/// Credit per non-empty telemetry category.
const DATA_QUALITY_CREDIT: f64 = 0.25;

/// Plausible sequestration band, tCO2/ha/yr.
pub const BENCHMARK_MIN_SEQUESTRATION: f64 = 1.0;
pub const BENCHMARK_MAX_SEQUESTRATION: f64 = 10.0;

/// Distance outside the band at which the carbon check reaches zero.
const BENCHMARK_DECAY_SPAN: f64 = 10.0;

/// Default-on-failure policy for the compliance call.
pub fn compliance_score_or_default(outcome: Result<f64, RemoteError>) -> f64 {
    match outcome {
        Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
        Ok(score) => {
            warn!(score, "compliance service returned a non-finite score, using default");
            DEFAULT_COMPLIANCE_SCORE
        }
        Err(err) => {
            warn!(error = %err, "compliance check failed, using default score");
            DEFAULT_COMPLIANCE_SCORE
        }
    }
}

/// Runs the verification checks for one project.
#[derive(Clone)]
pub struct VerificationChecker {
    compliance: Arc<dyn ComplianceClient>,
    methodology: String,
    timeout: Duration,
}

impl VerificationChecker {
    pub fn new(
        compliance: Arc<dyn ComplianceClient>,
        methodology: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            compliance,
            methodology: methodology.into(),
            timeout,
        }
    }

    /// Ask the compliance service about a project. Never fails.
    pub async fn fetch_compliance(&self, telemetry: &ProjectTelemetry) -> f64 {
        let request = ComplianceRequest {
            project_id: telemetry.project_id.clone(),
            ecosystem: telemetry.ecosystem,
            area: telemetry.area_hectares,
            methodology: self.methodology.clone(),
        };

        let outcome = match tokio::time::timeout(self.timeout, self.compliance.assess(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout),
        };
        let score = compliance_score_or_default(outcome);
        debug!(project_id = %telemetry.project_id, score, "compliance score resolved");
        score
    }

    /// Run all six checks, including the remote compliance call.
    pub async fn check(
        &self,
        telemetry: &ProjectTelemetry,
        features: &FeatureVector,
        fused: &ModelPrediction,
    ) -> CheckScores {
        let compliance = self.fetch_compliance(telemetry).await;
        Self::score(telemetry, features, fused, compliance)
    }

    /// Pure part of [`Self::check`], given an already resolved compliance score.
    pub fn score(
        telemetry: &ProjectTelemetry,
        features: &FeatureVector,
        fused: &ModelPrediction,
        compliance_score: f64,
    ) -> CheckScores {
        CheckScores {
            data_quality: data_quality(telemetry),
            growth_consistency: growth_consistency(&telemetry.growth_observations),
            environmental_health: environmental_health(features),
            satellite_consistency: satellite_consistency(telemetry, features),
            carbon_calculation: carbon_calculation(fused.carbon_sequestration),
            compliance_check: compliance_score.clamp(0.0, 1.0),
        }
    }
}

pub fn data_quality(telemetry: &ProjectTelemetry) -> f64 {
    (telemetry.populated_categories() as f64 * DATA_QUALITY_CREDIT).min(1.0)
}

/// Fraction of consecutive observation pairs where neither height nor
/// diameter shrank.
pub fn growth_consistency(observations: &[GrowthObservation]) -> f64 {
    if observations.len() < 2 {
        return NEUTRAL_CHECK_SCORE;
    }
    let mut ordered: Vec<&GrowthObservation> = observations.iter().collect();
    ordered.sort_by_key(|o| o.timestamp);

    let pairs = ordered.len() - 1;
    let consistent = ordered
        .windows(2)
        .filter(|w| w[1].height >= w[0].height && w[1].diameter >= w[0].diameter)
        .count();
    consistent as f64 / pairs as f64
}

pub fn environmental_health(features: &FeatureVector) -> f64 {
    ((features.water_quality + features.soil_quality + features.air_quality) / 3.0).clamp(0.0, 1.0)
}

/// 0.5 centred score from the sign and size of the area change: growth maps
/// into [0.5, 1.0], loss into [0, 0.5).
pub fn satellite_consistency(telemetry: &ProjectTelemetry, features: &FeatureVector) -> f64 {
    let area_readings = telemetry
        .satellite_observations
        .iter()
        .filter(|o| o.area_hectares.is_some_and(f64::is_finite))
        .count();
    if area_readings < 2 {
        return NEUTRAL_CHECK_SCORE;
    }
    0.5 + 0.5 * features.area_change.clamp(-1.0, 1.0)
}

/// 1.0 inside the benchmark band, decaying linearly with distance outside it.
pub fn carbon_calculation(sequestration: f64) -> f64 {
    let deviation = if sequestration < BENCHMARK_MIN_SEQUESTRATION {
        BENCHMARK_MIN_SEQUESTRATION - sequestration
    } else if sequestration > BENCHMARK_MAX_SEQUESTRATION {
        sequestration - BENCHMARK_MAX_SEQUESTRATION
    } else {
        0.0
    };
    (1.0 - deviation / BENCHMARK_DECAY_SPAN).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        EcosystemType, EnvironmentalReading, GeoLocation, PlantingEvent, ReadingKind,
        SatelliteObservation,
    };
    use crate::services::FeatureExtractor;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap()
    }

    fn project() -> ProjectTelemetry {
        ProjectTelemetry::new(
            "proj-check",
            EcosystemType::SaltMarsh,
            2.0,
            GeoLocation {
                latitude: 51.5,
                longitude: 1.0,
            },
        )
    }

    fn growth(days: i64, height: f64, diameter: f64) -> GrowthObservation {
        GrowthObservation {
            timestamp: t0() + ChronoDuration::days(days),
            height,
            diameter,
            health_score: 0.8,
        }
    }

    struct StaticCompliance(Result<f64, RemoteError>);

    #[async_trait]
    impl ComplianceClient for StaticCompliance {
        async fn assess(&self, request: &ComplianceRequest) -> Result<f64, RemoteError> {
            assert_eq!(request.methodology, "VM0033");
            self.0.clone()
        }
    }

    fn checker(outcome: Result<f64, RemoteError>) -> VerificationChecker {
        VerificationChecker::new(
            Arc::new(StaticCompliance(outcome)),
            "VM0033",
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_data_quality_steps() {
        let mut p = project();
        assert_eq!(data_quality(&p), 0.0);

        p.planting_events.push(PlantingEvent {
            timestamp: t0(),
            species: "spartina".to_string(),
            count: None,
        });
        assert_eq!(data_quality(&p), 0.25);

        p.growth_observations.push(growth(0, 1.0, 1.0));
        assert_eq!(data_quality(&p), 0.5);

        p.environmental_readings
            .push(EnvironmentalReading::new(t0(), ReadingKind::Water));
        assert_eq!(data_quality(&p), 0.75);

        p.satellite_observations.push(SatelliteObservation {
            timestamp: t0(),
            vegetation_index: Some(0.5),
            area_hectares: None,
        });
        assert_eq!(data_quality(&p), 1.0);
    }

    #[test]
    fn test_growth_consistency_neutral_for_short_series() {
        assert_eq!(growth_consistency(&[]), 0.5);
        assert_eq!(growth_consistency(&[growth(0, 1.0, 1.0)]), 0.5);
    }

    #[test]
    fn test_growth_consistency_counts_pairs() {
        let observations = [growth(0, 1.0, 1.0), growth(10, 2.0, 2.0), growth(20, 1.0, 3.0)];
        assert_eq!(growth_consistency(&observations), 0.5);

        let steady = [growth(0, 1.0, 1.0), growth(10, 1.0, 1.0), growth(20, 1.5, 1.2)];
        assert_eq!(growth_consistency(&steady), 1.0);
    }

    #[test]
    fn test_carbon_calculation_band() {
        assert_eq!(carbon_calculation(5.0), 1.0);
        assert_eq!(carbon_calculation(1.0), 1.0);
        assert_eq!(carbon_calculation(10.0), 1.0);

        let above = carbon_calculation(12.0);
        assert!(above > 0.0 && above < 1.0);
        assert!((above - 0.8).abs() < 1e-9);

        assert_eq!(carbon_calculation(20.0), 0.0);
        assert_eq!(carbon_calculation(35.0), 0.0);
        assert!((carbon_calculation(0.0) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_satellite_consistency() {
        let extractor = FeatureExtractor::new();
        let mut p = project();
        let features = extractor.extract(&p, t0());
        assert_eq!(satellite_consistency(&p, &features), 0.5);

        p.satellite_observations = vec![
            SatelliteObservation {
                timestamp: t0(),
                vegetation_index: None,
                area_hectares: Some(10.0),
            },
            SatelliteObservation {
                timestamp: t0() + ChronoDuration::days(90),
                vegetation_index: None,
                area_hectares: Some(12.0),
            },
        ];
        let grew = satellite_consistency(&p, &extractor.extract(&p, t0()));
        assert!((grew - 0.6).abs() < 1e-9);

        p.satellite_observations[1].area_hectares = Some(5.0);
        let shrank = satellite_consistency(&p, &extractor.extract(&p, t0()));
        assert!((shrank - 0.25).abs() < 1e-9);
        assert!(shrank < 0.5);
    }

    #[test]
    fn test_compliance_default_policy() {
        assert_eq!(compliance_score_or_default(Ok(0.8)), 0.8);
        assert_eq!(compliance_score_or_default(Ok(1.4)), 1.0);
        assert_eq!(compliance_score_or_default(Ok(f64::NAN)), DEFAULT_COMPLIANCE_SCORE);
        assert_eq!(
            compliance_score_or_default(Err(RemoteError::Timeout)),
            DEFAULT_COMPLIANCE_SCORE
        );
    }

    #[tokio::test]
    async fn test_check_uses_compliance_service() {
        let p = project();
        let features = FeatureExtractor::new().extract(&p, t0());
        let fused = ModelPrediction::clamped(5.0, 100.0, 0.1, 0.8, 0.9);

        let scores = checker(Ok(0.9)).check(&p, &features, &fused).await;
        assert_eq!(scores.compliance_check, 0.9);
        assert_eq!(scores.carbon_calculation, 1.0);
        assert_eq!(scores.data_quality, 0.0);
        assert_eq!(scores.environmental_health, 0.5);

        let failed = checker(Err(RemoteError::Network("refused".to_string())))
            .check(&p, &features, &fused)
            .await;
        assert_eq!(failed.compliance_check, DEFAULT_COMPLIANCE_SCORE);
    }
}
