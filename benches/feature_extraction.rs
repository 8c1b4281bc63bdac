use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bluecarbon::domain::models::{
    EcosystemType, EnvironmentalReading, GeoLocation, GrowthObservation, PlantingEvent,
    ProjectTelemetry, ReadingKind, SatelliteObservation,
};
use bluecarbon::services::{FeatureExtractor, PredictionFuser};
use bluecarbon::ModelPrediction;

fn project(entries: usize) -> ProjectTelemetry {
    let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    let mut project = ProjectTelemetry::new(
        "bench",
        EcosystemType::Mangrove,
        25.0,
        GeoLocation {
            latitude: -2.5,
            longitude: 140.7,
        },
    );

    for i in 0..entries {
        let at = start + Duration::days(i as i64 * 7);
        let step = i as f64;
        project.planting_events.push(PlantingEvent {
            timestamp: at,
            species: format!("species-{}", i % 5),
            count: Some(100),
        });
        project.growth_observations.push(GrowthObservation {
            timestamp: at,
            height: 0.5 + step * 0.01,
            diameter: 1.0 + step * 0.02,
            health_score: 0.8,
        });
        project.environmental_readings.push(EnvironmentalReading {
            ph: Some(7.8),
            dissolved_oxygen: Some(6.5),
            salinity: Some(30.0),
            ..EnvironmentalReading::new(at, ReadingKind::Water)
        });
        project.satellite_observations.push(SatelliteObservation {
            timestamp: at,
            vegetation_index: Some(0.5 + (step * 0.3).sin() * 0.1),
            area_hectares: Some(20.0 + step * 0.05),
        });
    }
    project
}

fn bench_extract(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    let as_of = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("feature_extraction");
    for entries in [10, 100, 1000] {
        let telemetry = project(entries);
        group.bench_with_input(BenchmarkId::from_parameter(entries), &telemetry, |b, t| {
            b.iter(|| extractor.extract(black_box(t), as_of));
        });
    }
    group.finish();
}

fn bench_fuse(c: &mut Criterion) {
    let fuser = PredictionFuser::new();
    let predictions: Vec<ModelPrediction> = (0..8)
        .map(|i| ModelPrediction::clamped(4.0 + f64::from(i), 100.0, 0.2, 0.7, 0.1 * f64::from(i)))
        .collect();

    c.bench_function("prediction_fusion_8_models", |b| {
        b.iter(|| fuser.fuse(black_box(&predictions)));
    });
}

criterion_group!(benches, bench_extract, bench_fuse);
criterion_main!(benches);
