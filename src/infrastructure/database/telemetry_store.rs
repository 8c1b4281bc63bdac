use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use tracing::{debug, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{EcosystemType, GeoLocation, ProjectTelemetry};
use crate::domain::ports::TelemetryStore;

const PLANTING: &str = "planting";
const GROWTH: &str = "growth";
const ENVIRONMENTAL: &str = "environmental";
const SATELLITE: &str = "satellite";

/// `SQLite` implementation of [`TelemetryStore`]
///
/// Telemetry entries live in one `data_entries` table, partitioned by kind,
/// with each entry stored as a JSON payload.
pub struct SqliteTelemetryStore {
    pool: SqlitePool,
}

impl SqliteTelemetryStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write a project and all of its telemetry in one transaction.
    ///
    /// Re-importing a project replaces its previous telemetry. Verification
    /// history is left untouched.
    #[instrument(skip(self, telemetry), fields(project_id = %telemetry.project_id))]
    pub async fn import(&self, telemetry: &ProjectTelemetry) -> DomainResult<usize> {
        telemetry.validate()?;

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO projects (id, ecosystem, area_hectares, latitude, longitude, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                ecosystem = excluded.ecosystem,
                area_hectares = excluded.area_hectares,
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&telemetry.project_id)
        .bind(telemetry.ecosystem.as_str())
        .bind(telemetry.area_hectares)
        .bind(telemetry.location.latitude)
        .bind(telemetry.location.longitude)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM data_entries WHERE project_id = ?")
            .bind(&telemetry.project_id)
            .execute(&mut *tx)
            .await?;

        let mut entries = Vec::new();
        for event in &telemetry.planting_events {
            entries.push(entry(PLANTING, event.timestamp, event)?);
        }
        for observation in &telemetry.growth_observations {
            entries.push(entry(GROWTH, observation.timestamp, observation)?);
        }
        for reading in &telemetry.environmental_readings {
            entries.push(entry(ENVIRONMENTAL, reading.timestamp, reading)?);
        }
        for observation in &telemetry.satellite_observations {
            entries.push(entry(SATELLITE, observation.timestamp, observation)?);
        }

        for (kind, recorded_at, payload) in &entries {
            sqlx::query(
                "INSERT INTO data_entries (project_id, kind, recorded_at, payload) VALUES (?, ?, ?, ?)",
            )
            .bind(&telemetry.project_id)
            .bind(kind)
            .bind(recorded_at)
            .bind(payload)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(entries = entries.len(), "telemetry imported");
        Ok(entries.len())
    }

    /// Ids of every stored project, sorted
    pub async fn project_ids(&self) -> DomainResult<Vec<String>> {
        let ids = sqlx::query_scalar("SELECT id FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

fn entry<T: Serialize>(
    kind: &'static str,
    timestamp: DateTime<Utc>,
    value: &T,
) -> DomainResult<(&'static str, String, String)> {
    Ok((kind, timestamp.to_rfc3339(), serde_json::to_string(value)?))
}

/// Decode one payload, skipping it with a warning when it does not parse.
fn decode<T: DeserializeOwned>(project_id: &str, kind: &str, payload: &str) -> Option<T> {
    match serde_json::from_str(payload) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(project_id, kind, error = %err, "skipping malformed telemetry entry");
            None
        }
    }
}

#[async_trait]
impl TelemetryStore for SqliteTelemetryStore {
    async fn fetch(&self, project_id: &str) -> DomainResult<Option<ProjectTelemetry>> {
        let row = sqlx::query(
            "SELECT id, ecosystem, area_hectares, latitude, longitude FROM projects WHERE id = ?",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ecosystem = row
            .get::<String, _>("ecosystem")
            .parse::<EcosystemType>()
            .unwrap_or_default();
        let mut telemetry = ProjectTelemetry::new(
            row.get::<String, _>("id"),
            ecosystem,
            row.get("area_hectares"),
            GeoLocation {
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
            },
        );

        let entries = sqlx::query(
            r"
            SELECT kind, payload
            FROM data_entries
            WHERE project_id = ?
            ORDER BY recorded_at ASC, id ASC
            ",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        for entry in entries {
            let kind: String = entry.get("kind");
            let payload: String = entry.get("payload");
            match kind.as_str() {
                PLANTING => telemetry
                    .planting_events
                    .extend(decode(project_id, &kind, &payload)),
                GROWTH => telemetry
                    .growth_observations
                    .extend(decode(project_id, &kind, &payload)),
                ENVIRONMENTAL => telemetry
                    .environmental_readings
                    .extend(decode(project_id, &kind, &payload)),
                SATELLITE => telemetry
                    .satellite_observations
                    .extend(decode(project_id, &kind, &payload)),
                other => warn!(project_id, kind = other, "skipping entry of unknown kind"),
            }
        }

        Ok(Some(telemetry))
    }
}
