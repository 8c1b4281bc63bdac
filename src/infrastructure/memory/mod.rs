//! In-memory stores for tests and dry runs

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ProjectTelemetry, VerificationRecord};
use crate::domain::ports::{ResultStore, TelemetryStore};

fn poisoned<E>(_: E) -> DomainError {
    DomainError::Storage("in-memory store lock poisoned".to_string())
}

/// Telemetry keyed by project id
#[derive(Default)]
pub struct InMemoryTelemetryStore {
    projects: RwLock<HashMap<String, ProjectTelemetry>>,
}

impl InMemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a project, replacing any previous version
    pub fn insert(&self, telemetry: ProjectTelemetry) -> DomainResult<()> {
        telemetry.validate()?;
        self.projects
            .write()
            .map_err(poisoned)?
            .insert(telemetry.project_id.clone(), telemetry);
        Ok(())
    }
}

#[async_trait]
impl TelemetryStore for InMemoryTelemetryStore {
    async fn fetch(&self, project_id: &str) -> DomainResult<Option<ProjectTelemetry>> {
        let projects = self.projects.read().map_err(poisoned)?;
        Ok(projects.get(project_id).cloned().map(|mut telemetry| {
            telemetry.sort_chronologically();
            telemetry
        }))
    }
}

/// Append-only list of verification records
#[derive(Default)]
pub struct InMemoryResultStore {
    records: RwLock<Vec<VerificationRecord>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn append(&self, record: &VerificationRecord) -> DomainResult<()> {
        self.records.write().map_err(poisoned)?.push(record.clone());
        Ok(())
    }

    async fn history(&self, project_id: &str) -> DomainResult<Vec<VerificationRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        // Later appends are newer; reverse insertion order breaks timestamp ties.
        let mut history: Vec<VerificationRecord> = records
            .iter()
            .rev()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.verified_at.cmp(&a.verified_at));
        Ok(history)
    }
}
