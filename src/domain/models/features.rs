use serde::{Deserialize, Serialize};

/// Named numeric features derived from a project's telemetry.
///
/// Recomputed for every verification run and never stored on its own.
/// Serializes as a flat JSON object keyed by the snake_case feature names,
/// which is the shape the inference services expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub ecosystem_type: f64,
    pub planting_density: f64,
    pub species_diversity: f64,
    pub average_height: f64,
    pub average_diameter: f64,
    pub growth_rate: f64,
    pub survival_rate: f64,
    pub water_quality: f64,
    pub soil_quality: f64,
    pub air_quality: f64,
    pub vegetation_index: f64,
    pub area_change: f64,
    pub deforestation_risk: f64,
    pub project_age: f64,
    pub data_frequency: f64,
    pub seasonal_variation: f64,
}

impl FeatureVector {
    /// Feature names in wire order.
    pub const NAMES: [&'static str; 16] = [
        "ecosystem_type",
        "planting_density",
        "species_diversity",
        "average_height",
        "average_diameter",
        "growth_rate",
        "survival_rate",
        "water_quality",
        "soil_quality",
        "air_quality",
        "vegetation_index",
        "area_change",
        "deforestation_risk",
        "project_age",
        "data_frequency",
        "seasonal_variation",
    ];

    /// Values in the same order as [`Self::NAMES`].
    pub const fn values(&self) -> [f64; 16] {
        [
            self.ecosystem_type,
            self.planting_density,
            self.species_diversity,
            self.average_height,
            self.average_diameter,
            self.growth_rate,
            self.survival_rate,
            self.water_quality,
            self.soil_quality,
            self.air_quality,
            self.vegetation_index,
            self.area_change,
            self.deforestation_risk,
            self.project_age,
            self.data_frequency,
            self.seasonal_variation,
        ]
    }
}
