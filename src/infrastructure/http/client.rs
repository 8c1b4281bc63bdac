use anyhow::{Context, Result};
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::domain::errors::RemoteError;

/// JSON-over-HTTP transport shared by the service adapters
///
/// Owns a pooled reqwest client and the retry policy. Callers are expected
/// to bound the whole call, retries included, with their own timeout.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    http_client: ReqwestClient,
    retry_policy: RetryPolicy,
}

impl JsonHttpClient {
    /// Build a client whose individual requests time out after `request_timeout`
    pub fn new(request_timeout: Duration, retry_policy: RetryPolicy) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(request_timeout)
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            retry_policy,
        })
    }

    /// POST `body` to `url` and return the parsed JSON response, retrying
    /// transient failures.
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<Value, RemoteError>
    where
        B: Serialize + Sync,
    {
        self.retry_policy
            .execute(|| self.send_once(url, body))
            .await
    }

    async fn send_once<B>(&self, url: &str, body: &B) -> Result<Value, RemoteError>
    where
        B: Serialize + Sync,
    {
        let response = self.http_client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RemoteError::MalformedResponse(e.to_string()))
    }
}
