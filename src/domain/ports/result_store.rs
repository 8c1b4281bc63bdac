use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::VerificationRecord;

/// Append-only port for verification records
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Append one record. Records are never updated or removed.
    async fn append(&self, record: &VerificationRecord) -> DomainResult<()>;

    /// All records for a project, newest first
    async fn history(&self, project_id: &str) -> DomainResult<Vec<VerificationRecord>>;
}
