//! Fixed-topology steering controller.
//!
//! A 3-3-1 feed-forward net with tanh activations and no biases. The weight
//! matrices are positional slices of the chromosome: genes 0-8 are the
//! input-to-hidden weights in row-major input order, genes 9-11 the
//! hidden-to-output weights. The controller is a pure function of
//! (chromosome, inputs) and keeps no state between calls.

use crate::genome::{Chromosome, GENE_COUNT};
use ndarray::{Array1, Array2};

/// Number of distance readings fed to the controller.
pub const INPUT_COUNT: usize = 3;

/// Hidden layer width.
const HIDDEN_COUNT: usize = 3;

/// Steering decision emitted each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steering {
    Left,
    Straight,
    Right,
}

/// Neural steering controller over one chromosome.
#[derive(Clone, Debug)]
pub struct Brain {
    chromosome: Chromosome,
    /// (inputs x hidden) weight matrix, genes 0-8.
    input_hidden: Array2<f32>,
    /// Hidden-to-output weights, genes 9-11.
    hidden_output: Array1<f32>,
    /// Divisor applied to raw sensor readings before the forward pass.
    normalization_factor: f32,
}

impl Brain {
    pub fn new(chromosome: Chromosome, normalization_factor: f32) -> Self {
        let genes = chromosome.genes();
        let input_hidden =
            Array2::from_shape_fn((INPUT_COUNT, HIDDEN_COUNT), |(i, j)| genes[i * HIDDEN_COUNT + j]);
        let hidden_output = Array1::from_vec(genes[INPUT_COUNT * HIDDEN_COUNT..GENE_COUNT].to_vec());

        Self {
            chromosome,
            input_hidden,
            hidden_output,
            normalization_factor,
        }
    }

    /// The chromosome this controller was built from.
    #[inline]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Raw network output for already-normalized inputs.
    ///
    /// Diagnostics entry point; `decide` is the driving contract.
    pub fn evaluate(&self, inputs: &[f32]) -> Result<f32, BrainError> {
        if inputs.len() != INPUT_COUNT {
            return Err(BrainError::InvalidInputShape {
                expected: INPUT_COUNT,
                found: inputs.len(),
            });
        }
        let mut fixed = [0.0f32; INPUT_COUNT];
        fixed.copy_from_slice(inputs);
        Ok(self.forward(&fixed))
    }

    /// Map raw sensor readings to a steering decision.
    ///
    /// Present readings are divided by the normalization factor; absent ones
    /// enter the net as 0.
    pub fn decide(&self, readings: &[Option<f32>]) -> Result<Steering, BrainError> {
        if readings.len() != INPUT_COUNT {
            return Err(BrainError::InvalidInputShape {
                expected: INPUT_COUNT,
                found: readings.len(),
            });
        }
        let mut fixed = [None; INPUT_COUNT];
        fixed.copy_from_slice(readings);
        Ok(self.decide_fixed(&fixed))
    }

    /// Fixed-arity variant of [`decide`](Self::decide) for the hot path.
    #[inline]
    pub fn decide_fixed(&self, readings: &[Option<f32>; INPUT_COUNT]) -> Steering {
        let mut inputs = [0.0f32; INPUT_COUNT];
        for (input, reading) in inputs.iter_mut().zip(readings) {
            if let Some(distance) = reading {
                *input = distance / self.normalization_factor;
            }
        }

        interpret(self.forward(&inputs))
    }

    #[inline]
    fn forward(&self, inputs: &[f32; INPUT_COUNT]) -> f32 {
        let inputs = Array1::from_vec(inputs.to_vec());
        let hidden = inputs.dot(&self.input_hidden).mapv(f32::tanh);
        hidden.dot(&self.hidden_output).tanh()
    }
}

/// Threshold rule for the raw output value. The left band is deliberately
/// narrower than the right one; the asymmetry is tuned, not accidental.
#[inline]
fn interpret(value: f32) -> Steering {
    if value < -0.33 {
        Steering::Left
    } else if value < 0.3 {
        Steering::Straight
    } else {
        Steering::Right
    }
}

/// Errors from controller invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum BrainError {
    InvalidInputShape { expected: usize, found: usize },
}

impl std::fmt::Display for BrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInputShape { expected, found } => {
                write!(f, "controller expects {} inputs, got {}", expected, found)
            }
        }
    }
}

impl std::error::Error for BrainError {}
