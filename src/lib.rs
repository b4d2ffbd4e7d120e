//! # EVODRIVE
//!
//! Genetic-algorithm driving simulator with neural steering controllers.
//!
//! A population of cars drives a rectangular-ring track under three-ray
//! distance perception. Each car is steered by a fixed 3-3-1 tanh network
//! whose 12 weights form its chromosome; survival time is fitness, and a
//! roulette/blend/adaptive-mutation genetic engine breeds each new
//! generation.
//!
//! ## Quick Start
//!
//! ```rust
//! use evodrive::{Config, Race};
//!
//! let mut config = Config::default();
//! config.evolution.population_size = 10;
//!
//! let mut race = Race::new_with_seed(config, 42).unwrap();
//! race.run(5).unwrap();
//!
//! assert_eq!(race.generation(), 5);
//! println!("Best score: {}", race.stats.best_score_overall());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use evodrive::Config;
//!
//! let mut config = Config::default();
//! config.car.speed = 8.0;
//! config.evolution.base_mutation_rate = 0.05;
//! assert!(config.validate().is_ok());
//! ```

pub mod brain;
pub mod car;
pub mod config;
pub mod evolution;
pub mod genome;
pub mod geometry;
pub mod race;
pub mod sensor;
pub mod stats;
pub mod track;

// Re-export main types
pub use brain::{Brain, Steering};
pub use car::Car;
pub use config::Config;
pub use evolution::GeneticEngine;
pub use genome::Chromosome;
pub use race::{ControlMode, Race};
pub use track::Track;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(generations: u32, population: usize) -> Result<BenchmarkResult, race::RaceError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.evolution.population_size = population;

    let mut race = Race::new_with_seed(config, 42)?;

    let start = Instant::now();
    race.run(generations)?;
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        generations,
        population,
        best_score: race.stats.best_score_overall(),
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u32,
    pub population: usize,
    pub best_score: u32,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Population: {}", self.population)?;
        writeln!(f, "Best score: {}", self.best_score)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}
