//! Wiring of configuration into concrete adapters and services.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::domain::ports::{InferenceClient, ResultStore, TelemetryStore};
use crate::infrastructure::database::{DatabaseConnection, SqliteResultStore, SqliteTelemetryStore};
use crate::infrastructure::http::{
    HttpComplianceClient, HttpInferenceClient, JsonHttpClient, RetryPolicy,
};
use crate::services::{InferenceFanout, VerificationChecker, VerificationOrchestrator};

/// Everything a command needs: the loaded configuration and an open,
/// migrated database.
pub struct AppContext {
    pub config: Config,
    db: DatabaseConnection,
}

impl AppContext {
    pub async fn open(config: Config) -> Result<Self> {
        let db = DatabaseConnection::open(&config.database.path, config.database.max_connections)
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;
        db.migrate().await?;
        Ok(Self { config, db })
    }

    pub fn telemetry_store(&self) -> SqliteTelemetryStore {
        SqliteTelemetryStore::new(self.db.pool().clone())
    }

    pub fn result_store(&self) -> SqliteResultStore {
        SqliteResultStore::new(self.db.pool().clone())
    }

    /// Build the verification service from the configured endpoints
    pub fn orchestrator(&self) -> Result<VerificationOrchestrator> {
        build_orchestrator(
            &self.config,
            Arc::new(self.telemetry_store()),
            Arc::new(self.result_store()),
        )
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

/// Assemble a [`VerificationOrchestrator`] over the given stores, with HTTP
/// clients for every configured model and the compliance service.
pub fn build_orchestrator(
    config: &Config,
    telemetry_store: Arc<dyn TelemetryStore>,
    result_store: Arc<dyn ResultStore>,
) -> Result<VerificationOrchestrator> {
    let retry = RetryPolicy::from(&config.retry);

    let inference_timeout = Duration::from_millis(config.inference.timeout_ms);
    let inference_transport = JsonHttpClient::new(inference_timeout, retry.clone())
        .context("Failed to build inference HTTP client")?;
    let models: Vec<Arc<dyn InferenceClient>> = config
        .inference
        .models
        .iter()
        .map(|model| {
            Arc::new(HttpInferenceClient::new(model, inference_transport.clone()))
                as Arc<dyn InferenceClient>
        })
        .collect();

    let compliance_timeout = Duration::from_millis(config.compliance.timeout_ms);
    let compliance_transport = JsonHttpClient::new(compliance_timeout, retry)
        .context("Failed to build compliance HTTP client")?;
    let compliance = HttpComplianceClient::new(&config.compliance.endpoint, compliance_transport);

    Ok(VerificationOrchestrator::new(
        telemetry_store,
        result_store,
        InferenceFanout::new(models, inference_timeout),
        VerificationChecker::new(
            Arc::new(compliance),
            &config.compliance.methodology,
            compliance_timeout,
        ),
        config.verification,
    ))
}
