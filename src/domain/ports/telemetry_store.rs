use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ProjectTelemetry;

/// Read-only port for project telemetry
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Fetch a project with all of its data entries, each sequence ordered by
    /// timestamp
    ///
    /// # Returns
    /// * `Ok(Some(telemetry))` if the project exists
    /// * `Ok(None)` if no project has this identifier
    /// * `Err(DomainError)` if the store could not be read
    async fn fetch(&self, project_id: &str) -> DomainResult<Option<ProjectTelemetry>>;
}
