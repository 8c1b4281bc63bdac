use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use super::client::JsonHttpClient;
use crate::domain::errors::RemoteError;
use crate::domain::ports::{ComplianceClient, ComplianceRequest};

/// Regulatory compliance service reached over HTTP
pub struct HttpComplianceClient {
    endpoint: String,
    transport: JsonHttpClient,
}

impl HttpComplianceClient {
    pub fn new(endpoint: impl Into<String>, transport: JsonHttpClient) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }
}

#[async_trait]
impl ComplianceClient for HttpComplianceClient {
    #[instrument(skip(self, request), fields(project_id = %request.project_id))]
    async fn assess(&self, request: &ComplianceRequest) -> Result<f64, RemoteError> {
        let body = self.transport.post_json(&self.endpoint, request).await?;
        body.get("complianceScore")
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                RemoteError::MalformedResponse(format!("missing numeric complianceScore in {body}"))
            })
    }
}
