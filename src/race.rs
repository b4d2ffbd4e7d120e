//! Race orchestration: the frame-driven loop tying cars, track, and the
//! genetic engine together.
//!
//! One logical tick advances every car once. Cars never touch each other, so
//! the sweep runs on all cores; the engine then gets sequential access to the
//! finished generation at each boundary.

use crate::brain::Steering;
use crate::car::Car;
use crate::config::{Config, StoppingConfig};
use crate::evolution::{EvolutionError, GeneticEngine, ScoredChromosome};
use crate::genome::Chromosome;
use crate::stats::{GenerationRecord, StatsHistory};
use crate::track::Track;
use rand::Rng;
use rayon::prelude::*;

/// Where steering decisions come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Each car's own controller drives.
    #[default]
    Neural,
    /// An external signal drives every car (keyboard-style override).
    Manual,
}

/// One reason a generation may end. A race checks all of its criteria each
/// tick and stops on the first that fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCriterion {
    AllDead,
    MaxScore(u32),
    TickLimit(u64),
}

impl StopCriterion {
    /// Build the criteria list enabled by the config.
    pub fn from_config(config: &StoppingConfig) -> Vec<StopCriterion> {
        let mut criteria = Vec::new();
        if config.stop_when_all_dead {
            criteria.push(StopCriterion::AllDead);
        }
        if let Some(score) = config.max_score {
            criteria.push(StopCriterion::MaxScore(score));
        }
        if let Some(ticks) = config.tick_limit {
            criteria.push(StopCriterion::TickLimit(ticks));
        }
        criteria
    }
}

/// The running simulation.
pub struct Race {
    pub cars: Vec<Car>,
    pub track: Track,
    pub stats: StatsHistory,
    config: Config,
    engine: GeneticEngine,
    criteria: Vec<StopCriterion>,
    control_mode: ControlMode,
    manual_steering: Option<Steering>,
    tick_in_generation: u64,
}

impl Race {
    /// Create a race with a random seed.
    pub fn new(config: Config) -> Result<Self, RaceError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a race with a specific seed for reproducibility.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, RaceError> {
        config.validate().map_err(RaceError::InvalidConfig)?;

        let track = Track::new(&config.track);
        let mut engine = GeneticEngine::new(&config.evolution, seed)?;
        let chromosomes = engine.initial_population(config.evolution.population_size)?;
        let criteria = StopCriterion::from_config(&config.stopping);

        let mut race = Self {
            cars: Vec::new(),
            track,
            stats: StatsHistory::new(),
            config,
            engine,
            criteria,
            control_mode: ControlMode::Neural,
            manual_steering: None,
            tick_in_generation: 0,
        };
        race.restart_cars(chromosomes);
        Ok(race)
    }

    /// Replace the car set with fresh cars for the given chromosomes. This is
    /// the re-entry point after every evolution step.
    pub fn restart_cars(&mut self, chromosomes: Vec<Chromosome>) {
        let spawn = self.track.spawn_point();
        let boundary = self.track.segments();
        self.cars = chromosomes
            .into_iter()
            .map(|chromosome| Car::new(chromosome, spawn, &self.config, boundary))
            .collect();
        self.tick_in_generation = 0;
    }

    /// Advance every car by one tick. Car updates are independent of each
    /// other and read only the static boundary, so the sweep is parallel.
    pub fn tick(&mut self) {
        let boundary = self.track.segments();
        let steering = match self.control_mode {
            ControlMode::Neural => None,
            ControlMode::Manual => Some(self.manual_steering.unwrap_or(Steering::Straight)),
        };

        self.cars
            .par_iter_mut()
            .for_each(|car| car.tick(boundary, steering));

        self.tick_in_generation += 1;
    }

    /// True once any enabled stopping criterion fires.
    pub fn generation_complete(&self) -> bool {
        self.criteria.iter().any(|criterion| match criterion {
            StopCriterion::AllDead => self.all_cars_dead(),
            StopCriterion::MaxScore(score) => self.best_score() >= *score,
            StopCriterion::TickLimit(ticks) => self.tick_in_generation >= *ticks,
        })
    }

    /// Close out the generation: record stats, evolve, respawn. The freshly
    /// pushed record is available via `stats.latest()`.
    pub fn end_generation(&mut self) -> Result<(), RaceError> {
        let scored = self.scored_population();
        let record = GenerationRecord {
            generation: self.engine.generation() + 1,
            best_score: self.best_score(),
            alive_at_end: self.alive_count(),
            ticks: self.tick_in_generation,
            population: scored.clone(),
        };

        let next = self.engine.evolve(&scored)?;

        log::info!(
            "Generation: {} - Best car score: {}",
            record.generation,
            record.best_score
        );
        self.stats.push(record);
        self.restart_cars(next);

        Ok(())
    }

    /// Run whole generations: tick until a stopping criterion fires, then
    /// evolve and respawn, `generations` times over.
    pub fn run(&mut self, generations: u32) -> Result<(), RaceError> {
        for _ in 0..generations {
            while !self.generation_complete() {
                self.tick();
            }
            self.end_generation()?;
        }
        Ok(())
    }

    /// Fitness/chromosome pairs for the current car set.
    pub fn scored_population(&self) -> Vec<ScoredChromosome> {
        self.cars
            .iter()
            .map(|car| ScoredChromosome {
                fitness: car.score() as f32,
                chromosome: car.chromosome().clone(),
            })
            .collect()
    }

    pub fn all_cars_dead(&self) -> bool {
        self.cars.iter().all(|car| !car.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.cars.iter().filter(|car| car.is_alive()).count()
    }

    pub fn best_score(&self) -> u32 {
        self.cars.iter().map(Car::score).max().unwrap_or(0)
    }

    /// Generations evolved so far.
    pub fn generation(&self) -> u32 {
        self.engine.generation()
    }

    /// Ticks elapsed in the current generation.
    pub fn tick_in_generation(&self) -> u64 {
        self.tick_in_generation
    }

    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.control_mode = mode;
    }

    /// Steering applied to every car while in manual mode; with no signal
    /// set, manual cars hold straight.
    pub fn set_manual_steering(&mut self, steering: Option<Steering>) {
        self.manual_steering = steering;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Errors from race construction and generation turnover.
#[derive(Debug)]
pub enum RaceError {
    InvalidConfig(String),
    Evolution(EvolutionError),
}

impl std::fmt::Display for RaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::Evolution(e) => write!(f, "evolution failed: {}", e),
        }
    }
}

impl std::error::Error for RaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Evolution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvolutionError> for RaceError {
    fn from(e: EvolutionError) -> Self {
        Self::Evolution(e)
    }
}
