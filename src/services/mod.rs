pub mod feature_extractor;
pub mod inference_fanout;
pub mod prediction_fuser;
pub mod recommendation_engine;
pub mod risk_assessor;
pub mod verification_checker;
pub mod verification_orchestrator;

pub use feature_extractor::FeatureExtractor;
pub use inference_fanout::{InferenceContext, InferenceFanout};
pub use prediction_fuser::PredictionFuser;
pub use recommendation_engine::RecommendationEngine;
pub use risk_assessor::RiskAssessor;
pub use verification_checker::{VerificationChecker, DEFAULT_COMPLIANCE_SCORE};
pub use verification_orchestrator::{VerificationOrchestrator, VerificationStage};
