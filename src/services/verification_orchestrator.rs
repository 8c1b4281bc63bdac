//! End-to-end verification pipeline.
//!
//! FETCH → EXTRACT → INFER → FUSE → CHECK → ASSESS → PERSIST → DONE
//!
//! The pipeline is linear. Component-level failures (model calls, the
//! compliance call, malformed telemetry fields) are absorbed inside the
//! components. Anything that still escapes ends the run with the fixed
//! system-error result, which is never persisted.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{VerificationConfig, VerificationRecord, VerificationResult};
use crate::domain::ports::{ResultStore, TelemetryStore};

use super::feature_extractor::FeatureExtractor;
use super::inference_fanout::{InferenceContext, InferenceFanout};
use super::prediction_fuser::PredictionFuser;
use super::recommendation_engine::RecommendationEngine;
use super::risk_assessor::RiskAssessor;
use super::verification_checker::VerificationChecker;

/// Pipeline stage, used for structured logging of transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStage {
    Fetch,
    Extract,
    Infer,
    Fuse,
    Check,
    Assess,
    Persist,
    Done,
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Infer => "infer",
            Self::Fuse => "fuse",
            Self::Check => "check",
            Self::Assess => "assess",
            Self::Persist => "persist",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Stateless verification service, built from explicit collaborators.
pub struct VerificationOrchestrator {
    telemetry_store: Arc<dyn TelemetryStore>,
    result_store: Arc<dyn ResultStore>,
    inference: InferenceFanout,
    checker: VerificationChecker,
    thresholds: VerificationConfig,
    extractor: FeatureExtractor,
    fuser: PredictionFuser,
    risk_assessor: RiskAssessor,
    recommender: RecommendationEngine,
}

impl VerificationOrchestrator {
    pub fn new(
        telemetry_store: Arc<dyn TelemetryStore>,
        result_store: Arc<dyn ResultStore>,
        inference: InferenceFanout,
        checker: VerificationChecker,
        thresholds: VerificationConfig,
    ) -> Self {
        Self {
            telemetry_store,
            result_store,
            inference,
            checker,
            thresholds,
            extractor: FeatureExtractor::new(),
            fuser: PredictionFuser::new(),
            risk_assessor: RiskAssessor::new(),
            recommender: RecommendationEngine::new(),
        }
    }

    /// Verify one project. Never fails: unrecovered errors produce the
    /// system-error result.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn verify(&self, project_id: &str) -> VerificationResult {
        match AssertUnwindSafe(self.run(project_id)).catch_unwind().await {
            Ok(Ok(result)) => {
                info!(
                    verified = result.verified,
                    confidence = result.confidence,
                    compliance_score = result.compliance_score,
                    "verification completed"
                );
                result
            }
            Ok(Err(err)) => {
                error!(error = %err, "verification failed, returning system error result");
                VerificationResult::system_error(project_id)
            }
            Err(_) => {
                error!("verification panicked, returning system error result");
                VerificationResult::system_error(project_id)
            }
        }
    }

    /// Like [`Self::verify`], but abandons the run when `token` is cancelled.
    ///
    /// Returns `None` on cancellation. In-flight remote calls are dropped with
    /// the pipeline future and nothing is persisted.
    pub async fn verify_cancellable(
        &self,
        project_id: &str,
        token: &CancellationToken,
    ) -> Option<VerificationResult> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                warn!(project_id = %project_id, "verification cancelled");
                None
            }
            result = self.verify(project_id) => Some(result),
        }
    }

    async fn run(&self, project_id: &str) -> DomainResult<VerificationResult> {
        let mut stage = VerificationStage::Fetch;
        debug!(%stage, "entering stage");
        let mut telemetry = self
            .telemetry_store
            .fetch(project_id)
            .await?
            .ok_or_else(|| DomainError::ProjectNotFound(project_id.to_string()))?;
        telemetry.sort_chronologically();

        stage = VerificationStage::Extract;
        debug!(%stage, "entering stage");
        let now = Utc::now();
        let features = self.extractor.extract(&telemetry, now);

        stage = VerificationStage::Infer;
        debug!(%stage, models = self.inference.model_count(), "entering stage");
        let context = InferenceContext {
            ecosystem: telemetry.ecosystem,
        };
        // Compliance does not depend on the fused prediction, so it runs
        // alongside the model calls.
        let (predictions, compliance_score) = tokio::join!(
            self.inference.predict_all(&features, context),
            self.checker.fetch_compliance(&telemetry),
        );

        stage = VerificationStage::Fuse;
        debug!(
            %stage,
            informative = predictions.iter().filter(|p| p.carries_information()).count(),
            "entering stage"
        );
        let fused = self.fuser.fuse(&predictions);

        stage = VerificationStage::Check;
        debug!(%stage, "entering stage");
        let checks = VerificationChecker::score(&telemetry, &features, &fused, compliance_score);
        let overall = checks.compliance_score();

        stage = VerificationStage::Assess;
        debug!(%stage, compliance_score = overall, "entering stage");
        let risk_factors = self.risk_assessor.assess(&features, &fused);
        let recommendations = self.recommender.recommend(&features, &fused, &checks);

        let result = VerificationResult {
            project_id: telemetry.project_id.clone(),
            verified: self.thresholds.is_verified(overall, fused.confidence),
            confidence: fused.confidence,
            prediction: fused,
            risk_factors,
            recommendations,
            compliance_score: overall,
            check_scores: Some(checks),
            completed_at: Utc::now(),
        };

        stage = VerificationStage::Persist;
        debug!(%stage, "entering stage");
        self.result_store
            .append(&VerificationRecord::from(&result))
            .await?;

        stage = VerificationStage::Done;
        debug!(%stage, "entering stage");
        Ok(result)
    }
}
