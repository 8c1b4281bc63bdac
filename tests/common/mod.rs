//! Common test utilities for integration tests
//!
//! Shared fixtures and fake collaborators used across the integration test
//! files.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use tempfile::TempDir;

use bluecarbon::domain::models::{
    EcosystemType, EnvironmentalReading, GeoLocation, GrowthObservation, ModelPrediction,
    PlantingEvent, ProjectTelemetry, ReadingKind, SatelliteObservation,
};
use bluecarbon::domain::ports::{
    ComplianceClient, ComplianceRequest, InferenceClient, InferenceRequest,
};
use bluecarbon::infrastructure::database::DatabaseConnection;
use bluecarbon::RemoteError;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Migrated on-disk database inside a temporary directory
pub async fn temp_database() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = DatabaseConnection::open(dir.path().join("test.db"), 4)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");
    (dir, db)
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap()
}

/// A project whose evidence scores 1.0 on every locally computed check:
/// all four telemetry categories, monotonic growth, ideal environmental
/// readings and a doubling of mapped area.
pub fn exemplary_project(project_id: &str) -> ProjectTelemetry {
    let mut project = ProjectTelemetry::new(
        project_id,
        EcosystemType::Mangrove,
        10.0,
        GeoLocation {
            latitude: -2.5,
            longitude: 140.7,
        },
    );

    for (i, species) in ["Rhizophora apiculata", "Avicennia marina", "Bruguiera gymnorhiza"]
        .into_iter()
        .enumerate()
    {
        project.planting_events.push(PlantingEvent {
            timestamp: t0() + ChronoDuration::days(i as i64),
            species: species.to_string(),
            count: Some(500),
        });
    }

    for (day, height, diameter) in [(30, 0.3, 0.5), (120, 0.6, 0.9), (240, 1.1, 1.4)] {
        project.growth_observations.push(GrowthObservation {
            timestamp: t0() + ChronoDuration::days(day),
            height,
            diameter,
            health_score: 0.9,
        });
    }

    let mut water = EnvironmentalReading::new(t0() + ChronoDuration::days(10), ReadingKind::Water);
    water.ph = Some(8.0);
    water.dissolved_oxygen = Some(9.0);
    let mut soil = EnvironmentalReading::new(t0() + ChronoDuration::days(11), ReadingKind::Soil);
    soil.ph = Some(7.0);
    soil.organic_matter = Some(12.0);
    let mut air = EnvironmentalReading::new(t0() + ChronoDuration::days(12), ReadingKind::Air);
    air.co2 = Some(400.0);
    air.temperature = Some(27.0);
    project.environmental_readings = vec![water, soil, air];

    for (day, ndvi, area) in [(0, 0.40, 10.0), (180, 0.55, 15.0), (360, 0.70, 20.0)] {
        project.satellite_observations.push(SatelliteObservation {
            timestamp: t0() + ChronoDuration::days(day),
            vegetation_index: Some(ndvi),
            area_hectares: Some(area),
        });
    }

    project
}

/// Inference client returning a fixed outcome after an optional delay
pub struct FixedModel {
    pub id: String,
    pub delay: Duration,
    pub outcome: Result<ModelPrediction, RemoteError>,
}

pub fn fixed_model(
    id: &str,
    delay: Duration,
    outcome: Result<ModelPrediction, RemoteError>,
) -> Arc<dyn InferenceClient> {
    Arc::new(FixedModel {
        id: id.to_string(),
        delay,
        outcome,
    })
}

#[async_trait]
impl InferenceClient for FixedModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn predict(&self, request: &InferenceRequest) -> Result<ModelPrediction, RemoteError> {
        assert_eq!(request.model_id, self.id);
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

/// Compliance client returning a fixed outcome
pub struct FixedCompliance(pub Result<f64, RemoteError>);

#[async_trait]
impl ComplianceClient for FixedCompliance {
    async fn assess(&self, _request: &ComplianceRequest) -> Result<f64, RemoteError> {
        self.0.clone()
    }
}

/// Compliance service that answers after a fixed delay
pub struct DelayedCompliance {
    pub delay: Duration,
    pub score: f64,
}

#[async_trait]
impl ComplianceClient for DelayedCompliance {
    async fn assess(&self, _request: &ComplianceRequest) -> Result<f64, RemoteError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.score)
    }
}
