//! Verification outcome types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::prediction::ModelPrediction;

/// Identity tag written on every automatically produced record.
pub const AUTOMATED_VERIFIER: &str = "automated system";

/// Risk factor reported when the pipeline itself fails.
pub const SYSTEM_ERROR_RISK: &str = "Verification system error";

/// Recommendation reported when the pipeline itself fails.
pub const SYSTEM_ERROR_RECOMMENDATION: &str = "Manual verification required";

/// Scores of the six independent verification checks, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckScores {
    pub data_quality: f64,
    pub growth_consistency: f64,
    pub environmental_health: f64,
    pub satellite_consistency: f64,
    pub carbon_calculation: f64,
    pub compliance_check: f64,
}

impl CheckScores {
    pub const fn as_array(&self) -> [f64; 6] {
        [
            self.data_quality,
            self.growth_consistency,
            self.environmental_health,
            self.satellite_consistency,
            self.carbon_calculation,
            self.compliance_check,
        ]
    }

    /// Overall compliance score: the unweighted mean of all six checks.
    pub fn compliance_score(&self) -> f64 {
        let scores = self.as_array();
        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(0.0, 1.0)
    }
}

/// The terminal artifact of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub project_id: String,
    pub verified: bool,
    pub confidence: f64,
    pub prediction: ModelPrediction,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub compliance_score: f64,
    /// Absent on the system-error result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_scores: Option<CheckScores>,
    pub completed_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Fixed result returned when the pipeline fails for any unrecovered reason.
    pub fn system_error(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            verified: false,
            confidence: 0.0,
            prediction: ModelPrediction::zeroed(),
            risk_factors: vec![SYSTEM_ERROR_RISK.to_string()],
            recommendations: vec![SYSTEM_ERROR_RECOMMENDATION.to_string()],
            compliance_score: 0.0,
            check_scores: None,
            completed_at: Utc::now(),
        }
    }

    pub fn is_system_error(&self) -> bool {
        self.check_scores.is_none()
            && self.risk_factors.len() == 1
            && self.risk_factors[0] == SYSTEM_ERROR_RISK
    }
}

/// Append-only persisted form of a [`VerificationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub project_id: String,
    pub verified: bool,
    pub confidence: f64,
    pub carbon_sequestration: f64,
    pub biomass: f64,
    pub growth_rate: f64,
    pub health_score: f64,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub compliance_score: f64,
    pub verified_at: DateTime<Utc>,
    pub verifier: String,
}

impl From<&VerificationResult> for VerificationRecord {
    fn from(result: &VerificationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: result.project_id.clone(),
            verified: result.verified,
            confidence: result.confidence,
            carbon_sequestration: result.prediction.carbon_sequestration,
            biomass: result.prediction.biomass,
            growth_rate: result.prediction.growth_rate,
            health_score: result.prediction.health_score,
            risk_factors: result.risk_factors.clone(),
            recommendations: result.recommendations.clone(),
            compliance_score: result.compliance_score,
            verified_at: result.completed_at,
            verifier: AUTOMATED_VERIFIER.to_string(),
        }
    }
}
