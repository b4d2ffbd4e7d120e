//! Configuration for the driving simulation.
//!
//! Supports YAML configuration files with sensible defaults. Every component
//! takes the relevant section by reference at construction; there is no
//! ambient global state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub track: TrackConfig,
    pub car: CarConfig,
    pub neural: NeuralConfig,
    pub evolution: EvolutionConfig,
    pub stopping: StoppingConfig,
    pub logging: LoggingConfig,
}

/// Track geometry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Width of the playfield in world units
    pub width: f32,
    /// Height of the playfield in world units
    pub height: f32,
    /// Margin between the playfield edge and the outer boundary, as a
    /// fraction of each dimension
    pub border_padding: f32,
    /// Lane width between outer and inner boundary, as a fraction of each
    /// dimension
    pub lane_width: f32,
}

/// Car kinematics and sensor mounting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarConfig {
    /// Distance traveled per tick
    pub speed: f32,
    /// Heading change per tick when turning, in degrees
    pub turn_speed: f32,
    /// Heading at spawn, in degrees (0 = right, 90 = up)
    pub initial_heading: f32,
    /// Body length, used to place the sensor mounts
    pub body_length: f32,
    /// Body width, used to place the sensor mounts
    pub body_width: f32,
    /// Maximum sensor ray length
    pub max_ray_length: f32,
}

/// Neural controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralConfig {
    /// Divisor applied to sensor readings before the forward pass
    pub normalization_factor: f32,
}

/// Genetic algorithm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of cars per generation
    pub population_size: usize,
    /// Blend weight taken from the first parent during crossover
    pub crossover_rate: f32,
    /// Mutation probability at generation 0
    pub base_mutation_rate: f32,
    /// Mutation probability added per generation
    pub mutation_rate_increment: f32,
    /// Ceiling for the adaptive mutation probability
    pub max_mutation_rate: f32,
}

/// Generation stopping criteria. Each criterion is independent; a generation
/// ends as soon as any enabled one fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoppingConfig {
    /// End the generation when every car is dead
    pub stop_when_all_dead: bool,
    /// End the generation when the best score reaches this value
    pub max_score: Option<u32>,
    /// End the generation after this many ticks
    pub tick_limit: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats summary lines
    pub stats_interval: u32,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            track: TrackConfig::default(),
            car: CarConfig::default(),
            neural: NeuralConfig::default(),
            evolution: EvolutionConfig::default(),
            stopping: StoppingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            border_padding: 0.1,
            lane_width: 0.2,
        }
    }
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            turn_speed: 3.0,
            initial_heading: 90.0,
            body_length: 30.0,
            body_width: 30.0,
            max_ray_length: 1000.0,
        }
    }
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            normalization_factor: 1000.0,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            crossover_rate: 0.8,
            base_mutation_rate: 0.02,
            mutation_rate_increment: 0.001,
            max_mutation_rate: 0.1,
        }
    }
}

impl Default for StoppingConfig {
    fn default() -> Self {
        Self {
            stop_when_all_dead: true,
            max_score: Some(100),
            tick_limit: Some(1000),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 1,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.evolution.population_size < 2 {
            return Err("population_size must be at least 2".to_string());
        }
        if self.car.speed <= 0.0 {
            return Err("car speed must be > 0".to_string());
        }
        if self.car.max_ray_length <= 0.0 {
            return Err("max_ray_length must be > 0".to_string());
        }
        if self.neural.normalization_factor <= 0.0 {
            return Err("normalization_factor must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.crossover_rate) {
            return Err("crossover_rate must be in [0, 1]".to_string());
        }
        if self.evolution.max_mutation_rate < self.evolution.base_mutation_rate {
            return Err("max_mutation_rate must be >= base_mutation_rate".to_string());
        }
        if self.track.border_padding <= 0.0
            || self.track.border_padding + self.track.lane_width >= 0.5
        {
            return Err("track paddings must leave room for the inner boundary".to_string());
        }
        if !self.stopping.stop_when_all_dead
            && self.stopping.max_score.is_none()
            && self.stopping.tick_limit.is_none()
        {
            return Err("at least one stopping criterion must be enabled".to_string());
        }
        Ok(())
    }
}
