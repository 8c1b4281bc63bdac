//! Project telemetry as ingested from the field and from satellite passes.
//!
//! Records are immutable once ingested. Every sequence on [`ProjectTelemetry`]
//! is kept sorted by timestamp so downstream consumers can rely on
//! chronological order without re-sorting.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Blue carbon ecosystem category of a restoration project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EcosystemType {
    Mangrove,
    Seagrass,
    SaltMarsh,
    CoastalWetland,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EcosystemType {
    /// Fixed integer encoding fed to the models. Unknown maps to 0.
    pub const fn encode(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Mangrove => 1,
            Self::Seagrass => 2,
            Self::SaltMarsh => 3,
            Self::CoastalWetland => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mangrove => "mangrove",
            Self::Seagrass => "seagrass",
            Self::SaltMarsh => "salt_marsh",
            Self::CoastalWetland => "coastal_wetland",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EcosystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcosystemType {
    type Err = std::convert::Infallible;

    /// Unrecognised categories parse to [`EcosystemType::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "mangrove" => Self::Mangrove,
            "seagrass" => Self::Seagrass,
            "salt_marsh" => Self::SaltMarsh,
            "coastal_wetland" => Self::CoastalWetland,
            _ => Self::Unknown,
        })
    }
}

/// WGS84 coordinates of the project site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A single planting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingEvent {
    pub timestamp: DateTime<Utc>,
    /// Species identifier, e.g. `rhizophora_mucronata`
    pub species: String,
    /// Number of seedlings planted, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Field measurement of plant growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthObservation {
    pub timestamp: DateTime<Utc>,
    /// Height in metres
    pub height: f64,
    /// Stem diameter in centimetres
    pub diameter: f64,
    /// Observer-assessed plant health in [0, 1]
    pub health_score: f64,
}

/// Which environmental medium a reading samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Water,
    Soil,
    Air,
}

/// Environmental sensor reading. Which fields are populated depends on
/// [`ReadingKind`]; absent fields are scored with a neutral default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub timestamp: DateTime<Utc>,
    pub kind: ReadingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    /// Dissolved oxygen, mg/L
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolved_oxygen: Option<f64>,
    /// Soil organic matter, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organic_matter: Option<f64>,
    /// Atmospheric CO2, ppm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    /// Degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Practical salinity units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salinity: Option<f64>,
}

impl EnvironmentalReading {
    /// Bare reading of the given kind with no measurements attached.
    pub const fn new(timestamp: DateTime<Utc>, kind: ReadingKind) -> Self {
        Self {
            timestamp,
            kind,
            ph: None,
            dissolved_oxygen: None,
            organic_matter: None,
            co2: None,
            temperature: None,
            salinity: None,
        }
    }
}

/// Remote-sensing observation of the project footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteObservation {
    pub timestamp: DateTime<Utc>,
    /// NDVI, nominally in [-1, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetation_index: Option<f64>,
    /// Vegetated area measured from imagery, hectares
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_hectares: Option<f64>,
}

/// Everything known about a project at verification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTelemetry {
    pub project_id: String,
    #[serde(default)]
    pub ecosystem: EcosystemType,
    pub area_hectares: f64,
    pub location: GeoLocation,
    #[serde(default)]
    pub planting_events: Vec<PlantingEvent>,
    #[serde(default)]
    pub growth_observations: Vec<GrowthObservation>,
    #[serde(default)]
    pub environmental_readings: Vec<EnvironmentalReading>,
    #[serde(default)]
    pub satellite_observations: Vec<SatelliteObservation>,
}

impl ProjectTelemetry {
    /// Create a project with no data entries yet.
    pub fn new(
        project_id: impl Into<String>,
        ecosystem: EcosystemType,
        area_hectares: f64,
        location: GeoLocation,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            ecosystem,
            area_hectares,
            location,
            planting_events: Vec::new(),
            growth_observations: Vec::new(),
            environmental_readings: Vec::new(),
            satellite_observations: Vec::new(),
        }
    }

    /// Check the project header invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(DomainError::ValidationFailed(
                "project id cannot be empty".to_string(),
            ));
        }
        if !self.area_hectares.is_finite() || self.area_hectares <= 0.0 {
            return Err(DomainError::ValidationFailed(format!(
                "project {} area must be positive, got {}",
                self.project_id, self.area_hectares
            )));
        }
        if !self.location.is_valid() {
            return Err(DomainError::ValidationFailed(format!(
                "project {} location out of range: ({}, {})",
                self.project_id, self.location.latitude, self.location.longitude
            )));
        }
        Ok(())
    }

    /// Sort every sequence chronologically. Stable, so same-timestamp records
    /// keep their ingestion order.
    pub fn sort_chronologically(&mut self) {
        self.planting_events.sort_by_key(|e| e.timestamp);
        self.growth_observations.sort_by_key(|o| o.timestamp);
        self.environmental_readings.sort_by_key(|r| r.timestamp);
        self.satellite_observations.sort_by_key(|o| o.timestamp);
    }

    /// Number of telemetry categories that hold at least one record.
    pub fn populated_categories(&self) -> usize {
        [
            !self.planting_events.is_empty(),
            !self.growth_observations.is_empty(),
            !self.environmental_readings.is_empty(),
            !self.satellite_observations.is_empty(),
        ]
        .into_iter()
        .filter(|populated| *populated)
        .count()
    }
}
