//! The steering agent: one controller, three sensors, kinematic state.
//!
//! A car is ALIVE until a collision, then permanently DEAD; only a fresh
//! generation brings a fresh car. Every tick while alive it decides from the
//! current sensor readings, turns, moves, re-senses at the new pose, checks
//! collision, and earns one fitness point for surviving.

use crate::brain::{Brain, Steering};
use crate::config::Config;
use crate::genome::Chromosome;
use crate::geometry::{Segment, Vec2};
use crate::sensor::SensorArray;

/// One autonomous car.
#[derive(Clone, Debug)]
pub struct Car {
    brain: Brain,
    sensors: SensorArray,
    position: Vec2,
    /// Heading in degrees, kept in [0, 360).
    heading: f32,
    speed: f32,
    turn_speed: f32,
    alive: bool,
    score: u32,
}

impl Car {
    /// Spawn a car at `spawn` with the configured initial heading. Sensors
    /// are evaluated once so the first tick has readings to decide from.
    pub fn new(chromosome: Chromosome, spawn: Vec2, config: &Config, boundary: &[Segment]) -> Self {
        let mut car = Self {
            brain: Brain::new(chromosome, config.neural.normalization_factor),
            sensors: SensorArray::new(&config.car),
            position: spawn,
            heading: config.car.initial_heading.rem_euclid(360.0),
            speed: config.car.speed,
            turn_speed: config.car.turn_speed,
            alive: true,
            score: 0,
        };
        car.sensors.update(car.position, car.heading, boundary);
        car
    }

    /// Advance one tick. `override_steering` substitutes an external control
    /// signal for the controller's decision (manual mode); `None` lets the
    /// controller drive.
    pub fn tick(&mut self, boundary: &[Segment], override_steering: Option<Steering>) {
        if !self.alive {
            return;
        }

        let steering = match override_steering {
            Some(steering) => steering,
            None => self.brain.decide_fixed(&self.sensors.readings()),
        };

        let turn_delta = match steering {
            Steering::Left => self.turn_speed,
            Steering::Right => -self.turn_speed,
            Steering::Straight => 0.0,
        };
        self.heading = (self.heading + turn_delta).rem_euclid(360.0);

        let rad = self.heading.to_radians();
        self.position.x += self.speed * rad.cos();
        self.position.y -= self.speed * rad.sin();

        self.sensors.update(self.position, self.heading, boundary);

        // A boundary within one tick's travel counts as a hit; the margin
        // keeps fast cars from tunneling through a wall between ticks.
        if self.collided() {
            self.alive = false;
            return;
        }

        self.score += 1;
    }

    fn collided(&self) -> bool {
        self.sensors
            .readings()
            .iter()
            .any(|reading| matches!(reading, Some(distance) if *distance <= self.speed))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Ticks survived so far; frozen once dead.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn chromosome(&self) -> &Chromosome {
        self.brain.chromosome()
    }

    #[inline]
    pub fn sensors(&self) -> &SensorArray {
        &self.sensors
    }
}
