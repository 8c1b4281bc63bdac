use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::RemoteError;
use crate::domain::models::EcosystemType;

/// Body sent to the regulatory compliance service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    pub project_id: String,
    pub ecosystem: EcosystemType,
    pub area: f64,
    pub methodology: String,
}

/// Port for the third-party compliance assessment
#[async_trait]
pub trait ComplianceClient: Send + Sync {
    /// Compliance score for the project, in [0, 1]
    async fn assess(&self, request: &ComplianceRequest) -> Result<f64, RemoteError>;
}
