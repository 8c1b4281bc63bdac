use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::utils::parse_datetime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::VerificationRecord;
use crate::domain::ports::ResultStore;

/// `SQLite` implementation of [`ResultStore`]
///
/// Rows are only ever inserted. Risk factors and recommendations are stored
/// as JSON arrays.
pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn append(&self, record: &VerificationRecord) -> DomainResult<()> {
        let risk_factors = serde_json::to_string(&record.risk_factors)?;
        let recommendations = serde_json::to_string(&record.recommendations)?;

        sqlx::query(
            r"
            INSERT INTO verifications (
                id, project_id, verified, confidence, carbon_sequestration,
                biomass, growth_rate, health_score, risk_factors, recommendations,
                compliance_score, verified_at, verifier
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(record.id.to_string())
        .bind(&record.project_id)
        .bind(record.verified)
        .bind(record.confidence)
        .bind(record.carbon_sequestration)
        .bind(record.biomass)
        .bind(record.growth_rate)
        .bind(record.health_score)
        .bind(&risk_factors)
        .bind(&recommendations)
        .bind(record.compliance_score)
        .bind(record.verified_at.to_rfc3339())
        .bind(&record.verifier)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn history(&self, project_id: &str) -> DomainResult<Vec<VerificationRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, project_id, verified, confidence, carbon_sequestration,
                   biomass, growth_rate, health_score, risk_factors, recommendations,
                   compliance_score, verified_at, verifier
            FROM verifications
            WHERE project_id = ?
            ORDER BY verified_at DESC, rowid DESC
            ",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                let id: String = r.get("id");
                Ok(VerificationRecord {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| DomainError::Storage(format!("invalid record id '{id}': {e}")))?,
                    project_id: r.get("project_id"),
                    verified: r.get("verified"),
                    confidence: r.get("confidence"),
                    carbon_sequestration: r.get("carbon_sequestration"),
                    biomass: r.get("biomass"),
                    growth_rate: r.get("growth_rate"),
                    health_score: r.get("health_score"),
                    risk_factors: serde_json::from_str(r.get::<String, _>("risk_factors").as_str())?,
                    recommendations: serde_json::from_str(
                        r.get::<String, _>("recommendations").as_str(),
                    )?,
                    compliance_score: r.get("compliance_score"),
                    verified_at: parse_datetime(r.get::<String, _>("verified_at").as_str())?,
                    verifier: r.get("verifier"),
                })
            })
            .collect()
    }
}
