//! Performance benchmarks for EVODRIVE

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evodrive::brain::Brain;
use evodrive::config::{CarConfig, TrackConfig};
use evodrive::genome::Chromosome;
use evodrive::sensor::SensorArray;
use evodrive::track::Track;
use evodrive::{Config, Race};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_race_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("race_tick");

    for population in [30, 100, 500].iter() {
        let mut config = Config::default();
        config.evolution.population_size = *population;
        config.stopping.stop_when_all_dead = false;
        config.stopping.max_score = None;

        let mut race = Race::new_with_seed(config, 42).unwrap();

        group.bench_with_input(
            BenchmarkId::new("population", population),
            population,
            |b, _| {
                b.iter(|| {
                    race.tick();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_brain_forward(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let brain = Brain::new(Chromosome::random(&mut rng), 1000.0);
    let readings = [Some(120.0), Some(480.5), None];

    c.bench_function("brain_decide", |b| {
        b.iter(|| brain.decide_fixed(black_box(&readings)));
    });

    c.bench_function("brain_evaluate", |b| {
        b.iter(|| brain.evaluate(black_box(&[0.12, 0.48, 0.0])));
    });
}

fn benchmark_sensor_sweep(c: &mut Criterion) {
    let track = Track::new(&TrackConfig::default());
    let mut array = SensorArray::new(&CarConfig::default());
    let spawn = track.spawn_point();

    c.bench_function("sensor_sweep", |b| {
        b.iter(|| {
            array.update(black_box(spawn), black_box(90.0), track.segments());
        });
    });
}

criterion_group!(
    benches,
    benchmark_race_tick,
    benchmark_brain_forward,
    benchmark_sensor_sweep
);
criterion_main!(benches);
