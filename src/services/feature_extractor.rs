use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Utc};

use crate::domain::models::{
    EnvironmentalReading, FeatureVector, GrowthObservation, ProjectTelemetry, ReadingKind,
};

/// Score used for a quality feature (or a missing component of one) when
/// there is nothing to measure.
pub const NEUTRAL_QUALITY: f64 = 0.5;

/// Vegetation index used when no satellite observation carries NDVI.
pub const NEUTRAL_VEGETATION_INDEX: f64 = 0.5;

/// Deforestation risk used when fewer than three NDVI readings exist.
pub const DEFAULT_DEFORESTATION_RISK: f64 = 0.1;

/// Multiplier applied to the mean NDVI decline when scoring deforestation risk.
const DEFORESTATION_SCALE: f64 = 10.0;

const DEFORESTATION_WINDOW: usize = 3;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;

// Water: brackish/marine optimum around pH 8, DO saturates at 8 mg/L.
const WATER_PH_OPTIMUM: f64 = 8.0;
const WATER_PH_TOLERANCE: f64 = 2.0;
const WATER_DO_SATURATION: f64 = 8.0;

// Soil: neutral pH optimum, organic matter saturates at 10 %.
const SOIL_PH_OPTIMUM: f64 = 7.0;
const SOIL_PH_TOLERANCE: f64 = 3.0;
const SOIL_ORGANIC_MATTER_SATURATION: f64 = 10.0;

// Air: score falls linearly from 400 ppm to zero at 1000 ppm CO2.
const AIR_CO2_BASELINE: f64 = 400.0;
const AIR_CO2_RANGE: f64 = 600.0;
const AIR_CO2_WEIGHT: f64 = 0.7;
const AIR_TEMPERATURE_OPTIMUM: f64 = 27.0;
const AIR_TEMPERATURE_TOLERANCE: f64 = 15.0;

/// Derives the model feature vector from raw telemetry.
///
/// Pure and deterministic: the evaluation instant is passed in, so the same
/// telemetry and `as_of` always yield the same vector. Empty sequences never
/// fail; each feature falls back to 0 or its documented neutral value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub const fn new() -> Self {
        Self
    }

    pub fn extract(&self, telemetry: &ProjectTelemetry, as_of: DateTime<Utc>) -> FeatureVector {
        let mut growth: Vec<&GrowthObservation> = telemetry.growth_observations.iter().collect();
        growth.sort_by_key(|o| o.timestamp);

        FeatureVector {
            ecosystem_type: f64::from(telemetry.ecosystem.encode()),
            planting_density: planting_density(telemetry),
            species_diversity: species_diversity(telemetry),
            average_height: mean(growth.iter().map(|o| o.height)).unwrap_or(0.0),
            average_diameter: mean(growth.iter().map(|o| o.diameter)).unwrap_or(0.0),
            growth_rate: growth_rate(&growth),
            survival_rate: survival_rate(telemetry),
            water_quality: water_quality(&telemetry.environmental_readings),
            soil_quality: soil_quality(&telemetry.environmental_readings),
            air_quality: air_quality(&telemetry.environmental_readings),
            vegetation_index: vegetation_index(telemetry),
            area_change: area_change(telemetry),
            deforestation_risk: deforestation_risk(telemetry),
            project_age: project_age(telemetry, as_of),
            data_frequency: data_frequency(telemetry),
            seasonal_variation: seasonal_variation(&growth),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn years_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / (SECONDS_PER_DAY * DAYS_PER_YEAR)
}

fn planting_density(telemetry: &ProjectTelemetry) -> f64 {
    if telemetry.area_hectares > 0.0 {
        telemetry.planting_events.len() as f64 / telemetry.area_hectares
    } else {
        0.0
    }
}

fn species_diversity(telemetry: &ProjectTelemetry) -> f64 {
    telemetry
        .planting_events
        .iter()
        .map(|e| e.species.trim())
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .len() as f64
}

/// Height gained per year between the first and last observation.
fn growth_rate(growth: &[&GrowthObservation]) -> f64 {
    let (Some(first), Some(last)) = (growth.first(), growth.last()) else {
        return 0.0;
    };
    if growth.len() < 2 {
        return 0.0;
    }
    let years = years_between(first.timestamp, last.timestamp);
    if years <= 0.0 {
        return 0.0;
    }
    (last.height - first.height) / years
}

fn survival_rate(telemetry: &ProjectTelemetry) -> f64 {
    if telemetry.planting_events.is_empty() {
        return 0.0;
    }
    let healthy = telemetry
        .growth_observations
        .iter()
        .filter(|o| o.health_score > 0.5)
        .count();
    (healthy as f64 / telemetry.planting_events.len() as f64).clamp(0.0, 1.0)
}

/// Linear score around an optimum, 1.0 at the optimum and 0 at `tolerance` away.
fn proximity_score(value: f64, optimum: f64, tolerance: f64) -> f64 {
    (1.0 - (value - optimum).abs() / tolerance).clamp(0.0, 1.0)
}

fn component(value: Option<f64>, score: impl Fn(f64) -> f64) -> f64 {
    value.filter(|v| v.is_finite()).map_or(NEUTRAL_QUALITY, score)
}

fn quality_of(
    readings: &[EnvironmentalReading],
    kind: ReadingKind,
    score: impl Fn(&EnvironmentalReading) -> f64,
) -> f64 {
    mean(readings.iter().filter(|r| r.kind == kind).map(score))
        .map_or(NEUTRAL_QUALITY, |q| q.clamp(0.0, 1.0))
}

fn water_quality(readings: &[EnvironmentalReading]) -> f64 {
    quality_of(readings, ReadingKind::Water, |r| {
        let ph = component(r.ph, |ph| proximity_score(ph, WATER_PH_OPTIMUM, WATER_PH_TOLERANCE));
        let oxygen = component(r.dissolved_oxygen, |d| (d / WATER_DO_SATURATION).clamp(0.0, 1.0));
        0.5 * ph + 0.5 * oxygen
    })
}

fn soil_quality(readings: &[EnvironmentalReading]) -> f64 {
    quality_of(readings, ReadingKind::Soil, |r| {
        let ph = component(r.ph, |ph| proximity_score(ph, SOIL_PH_OPTIMUM, SOIL_PH_TOLERANCE));
        let organic = component(r.organic_matter, |om| {
            (om / SOIL_ORGANIC_MATTER_SATURATION).clamp(0.0, 1.0)
        });
        0.5 * ph + 0.5 * organic
    })
}

fn air_quality(readings: &[EnvironmentalReading]) -> f64 {
    quality_of(readings, ReadingKind::Air, |r| {
        let co2 = component(r.co2, |c| {
            (1.0 - (c - AIR_CO2_BASELINE) / AIR_CO2_RANGE).clamp(0.0, 1.0)
        });
        let temperature = component(r.temperature, |t| {
            proximity_score(t, AIR_TEMPERATURE_OPTIMUM, AIR_TEMPERATURE_TOLERANCE)
        });
        AIR_CO2_WEIGHT * co2 + (1.0 - AIR_CO2_WEIGHT) * temperature
    })
}

/// NDVI readings in chronological order.
fn ndvi_series(telemetry: &ProjectTelemetry) -> Vec<f64> {
    let mut readings: Vec<_> = telemetry
        .satellite_observations
        .iter()
        .filter_map(|o| {
            o.vegetation_index
                .filter(|v| v.is_finite())
                .map(|v| (o.timestamp, v))
        })
        .collect();
    readings.sort_by_key(|(ts, _)| *ts);
    readings.into_iter().map(|(_, v)| v).collect()
}

fn vegetation_index(telemetry: &ProjectTelemetry) -> f64 {
    mean(ndvi_series(telemetry).into_iter()).unwrap_or(NEUTRAL_VEGETATION_INDEX)
}

/// Fractional change between the first and last measured area.
fn area_change(telemetry: &ProjectTelemetry) -> f64 {
    let mut areas: Vec<_> = telemetry
        .satellite_observations
        .iter()
        .filter_map(|o| {
            o.area_hectares
                .filter(|a| a.is_finite())
                .map(|a| (o.timestamp, a))
        })
        .collect();
    if areas.len() < 2 {
        return 0.0;
    }
    areas.sort_by_key(|(ts, _)| *ts);
    let first = areas[0].1;
    let last = areas[areas.len() - 1].1;
    if first <= 0.0 {
        return 0.0;
    }
    (last - first) / first
}

fn deforestation_risk(telemetry: &ProjectTelemetry) -> f64 {
    let series = ndvi_series(telemetry);
    if series.len() < DEFORESTATION_WINDOW {
        return DEFAULT_DEFORESTATION_RISK;
    }
    let recent = &series[series.len() - DEFORESTATION_WINDOW..];
    let average_delta = mean(recent.windows(2).map(|w| w[1] - w[0])).unwrap_or(0.0);
    (-average_delta * DEFORESTATION_SCALE).clamp(0.0, 1.0)
}

fn project_age(telemetry: &ProjectTelemetry, as_of: DateTime<Utc>) -> f64 {
    telemetry
        .planting_events
        .iter()
        .map(|e| e.timestamp)
        .min()
        .map_or(0.0, |earliest| years_between(earliest, as_of).max(0.0))
}

/// Growth and environmental records per day across the span they cover.
fn data_frequency(telemetry: &ProjectTelemetry) -> f64 {
    let timestamps: Vec<DateTime<Utc>> = telemetry
        .growth_observations
        .iter()
        .map(|o| o.timestamp)
        .chain(telemetry.environmental_readings.iter().map(|r| r.timestamp))
        .collect();
    if timestamps.len() < 2 {
        return 0.0;
    }
    let (Some(earliest), Some(latest)) = (timestamps.iter().min(), timestamps.iter().max()) else {
        return 0.0;
    };
    let days = (*latest - *earliest).num_seconds() as f64 / SECONDS_PER_DAY;
    if days <= 0.0 {
        return 0.0;
    }
    timestamps.len() as f64 / days
}

/// Population standard deviation of the per-month mean height, taken over the
/// calendar months that have observations.
fn seasonal_variation(growth: &[&GrowthObservation]) -> f64 {
    let mut by_month: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for observation in growth {
        let entry = by_month.entry(observation.timestamp.month()).or_insert((0.0, 0));
        entry.0 += observation.height;
        entry.1 += 1;
    }
    if by_month.len() < 2 {
        return 0.0;
    }
    let monthly: Vec<f64> = by_month.values().map(|(sum, n)| sum / *n as f64).collect();
    let center = monthly.iter().sum::<f64>() / monthly.len() as f64;
    let variance =
        monthly.iter().map(|m| (m - center).powi(2)).sum::<f64>() / monthly.len() as f64;
    variance.sqrt()
}
