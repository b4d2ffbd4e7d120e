//! Genetic algorithm over controller weight vectors.
//!
//! Roulette-wheel selection, blend crossover, and adaptive mutation. The
//! engine owns a seeded RNG so full runs are reproducible; fitness values
//! come in from the caller at generation boundaries.

use crate::config::EvolutionConfig;
use crate::genome::{clamp_gene, Chromosome, GENE_COUNT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A chromosome paired with the fitness its car earned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredChromosome {
    pub fitness: f32,
    pub chromosome: Chromosome,
}

/// Evolution engine: owns the GA parameters, the generation counter, and the
/// run's random stream.
#[derive(Debug)]
pub struct GeneticEngine {
    population_size: usize,
    crossover_rate: f32,
    base_mutation_rate: f32,
    mutation_rate_increment: f32,
    max_mutation_rate: f32,
    generation: u32,
    rng: ChaCha8Rng,
}

impl GeneticEngine {
    /// Create an engine from config with a fixed seed.
    pub fn new(config: &EvolutionConfig, seed: u64) -> Result<Self, EvolutionError> {
        if config.population_size < 2 {
            return Err(EvolutionError::InvalidPopulationSize(config.population_size));
        }
        Ok(Self {
            population_size: config.population_size,
            crossover_rate: config.crossover_rate,
            base_mutation_rate: config.base_mutation_rate,
            mutation_rate_increment: config.mutation_rate_increment,
            max_mutation_rate: config.max_mutation_rate,
            generation: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Generations evolved so far; 0 before the first `evolve` call.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Draw `size` fresh chromosomes, every gene uniform in [-1, 1].
    pub fn initial_population(&mut self, size: usize) -> Result<Vec<Chromosome>, EvolutionError> {
        if size < 2 {
            return Err(EvolutionError::InvalidPopulationSize(size));
        }
        Ok((0..size).map(|_| Chromosome::random(&mut self.rng)).collect())
    }

    /// Produce the next generation from the scored current one.
    ///
    /// Selection draws `2 * population_size` parents with replacement,
    /// weighted by fitness clamped at zero; crossover blends consecutive
    /// pairs into one child each; mutation then runs per child with the
    /// adaptive rate for the new generation.
    pub fn evolve(
        &mut self,
        scored: &[ScoredChromosome],
    ) -> Result<Vec<Chromosome>, EvolutionError> {
        if scored.is_empty() || scored.len() != self.population_size {
            return Err(EvolutionError::PopulationSizeMismatch {
                expected: self.population_size,
                found: scored.len(),
            });
        }

        self.generation += 1;

        let parents = self.select_parents(scored, 2 * self.population_size);

        let mut children = Vec::with_capacity(self.population_size);
        for pair in parents.chunks_exact(2) {
            children.push(self.blend(&scored[pair[0]].chromosome, &scored[pair[1]].chromosome));
        }

        let rate = self.current_mutation_rate();
        for child in &mut children {
            self.mutate(child, rate);
        }

        Ok(children)
    }

    /// Mutation probability for the current generation: the base rate grows
    /// each generation but never past the configured ceiling.
    #[inline]
    pub fn current_mutation_rate(&self) -> f32 {
        (self.base_mutation_rate + self.generation as f32 * self.mutation_rate_increment)
            .min(self.max_mutation_rate)
    }

    /// Roulette-wheel draw of `count` population indices, with replacement.
    /// Negative fitness weighs as zero; an all-zero total falls back to a
    /// uniform draw so selection always proceeds.
    fn select_parents(&mut self, scored: &[ScoredChromosome], count: usize) -> Vec<usize> {
        let weights: Vec<f32> = scored.iter().map(|s| s.fitness.max(0.0)).collect();
        let total: f32 = weights.iter().sum();

        let mut picks = Vec::with_capacity(count);
        if total <= 0.0 {
            for _ in 0..count {
                picks.push(self.rng.gen_range(0..scored.len()));
            }
            return picks;
        }

        for _ in 0..count {
            let mut spin = self.rng.gen_range(0.0..total);
            let mut chosen = scored.len() - 1;
            for (idx, weight) in weights.iter().enumerate() {
                if spin < *weight {
                    chosen = idx;
                    break;
                }
                spin -= weight;
            }
            picks.push(chosen);
        }
        picks
    }

    /// Blend crossover: each child gene is `a * p1 + (1 - a) * p2`, clamped
    /// back into the gene range.
    fn blend(&self, parent1: &Chromosome, parent2: &Chromosome) -> Chromosome {
        let a = self.crossover_rate;
        let b = 1.0 - a;

        let mut genes = [0.0f32; GENE_COUNT];
        for (i, gene) in genes.iter_mut().enumerate() {
            *gene = clamp_gene(a * parent1.genes()[i] + b * parent2.genes()[i]);
        }
        Chromosome::from_array(genes)
    }

    /// Mutate one chromosome with probability `rate`: 1-3 random genes, each
    /// either nudged by uniform(-0.2, 0.2) (70%) or redrawn uniform(-1, 1).
    fn mutate(&mut self, chromosome: &mut Chromosome, rate: f32) {
        if self.rng.gen::<f32>() >= rate {
            return;
        }

        let mutations = self.rng.gen_range(1..=3);
        for _ in 0..mutations {
            let idx = self.rng.gen_range(0..GENE_COUNT);
            let genes = chromosome.genes_mut();
            if self.rng.gen::<f32>() < 0.7 {
                genes[idx] = clamp_gene(genes[idx] + self.rng.gen_range(-0.2..0.2));
            } else {
                genes[idx] = self.rng.gen_range(-1.0..1.0);
            }
        }
    }
}

/// Errors from genetic engine construction and evolution.
#[derive(Debug, PartialEq, Eq)]
pub enum EvolutionError {
    InvalidPopulationSize(usize),
    PopulationSizeMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPopulationSize(size) => {
                write!(f, "population size must be at least 2, got {}", size)
            }
            Self::PopulationSizeMismatch { expected, found } => {
                write!(f, "expected population of {}, got {}", expected, found)
            }
        }
    }
}

impl std::error::Error for EvolutionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvolutionConfig;

    fn engine(population_size: usize) -> GeneticEngine {
        let mut config = EvolutionConfig::default();
        config.population_size = population_size;
        GeneticEngine::new(&config, 42).unwrap()
    }

    fn scored_uniform(engine: &mut GeneticEngine, size: usize, fitness: f32) -> Vec<ScoredChromosome> {
        engine
            .initial_population(size)
            .unwrap()
            .into_iter()
            .map(|chromosome| ScoredChromosome { fitness, chromosome })
            .collect()
    }

    #[test]
    fn test_population_floor() {
        let mut config = EvolutionConfig::default();
        config.population_size = 1;
        assert_eq!(
            GeneticEngine::new(&config, 0).unwrap_err(),
            EvolutionError::InvalidPopulationSize(1)
        );

        let mut valid = engine(4);
        assert_eq!(
            valid.initial_population(1).unwrap_err(),
            EvolutionError::InvalidPopulationSize(1)
        );
    }

    #[test]
    fn test_initial_population_shape() {
        let mut engine = engine(10);
        let population = engine.initial_population(10).unwrap();
        assert_eq!(population.len(), 10);
        assert!(population.iter().all(|c| c.in_range()));
    }

    #[test]
    fn test_evolve_preserves_size_and_range() {
        let mut engine = engine(4);
        let scored = scored_uniform(&mut engine, 4, 0.0);

        let next = engine.evolve(&scored).unwrap();
        assert_eq!(next.len(), 4);
        assert!(next.iter().all(|c| c.in_range()));
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_generation_counter_strictly_increases() {
        let mut engine = engine(4);
        assert_eq!(engine.generation(), 0);

        let mut scored = scored_uniform(&mut engine, 4, 1.0);
        for expected in 1..=5 {
            let next = engine.evolve(&scored).unwrap();
            assert_eq!(engine.generation(), expected);
            scored = next
                .into_iter()
                .map(|chromosome| ScoredChromosome { fitness: 1.0, chromosome })
                .collect();
        }
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut engine = engine(4);
        let scored = scored_uniform(&mut engine, 6, 1.0);
        assert_eq!(
            engine.evolve(&scored).unwrap_err(),
            EvolutionError::PopulationSizeMismatch {
                expected: 4,
                found: 6
            }
        );
        assert_eq!(
            engine.evolve(&[]).unwrap_err(),
            EvolutionError::PopulationSizeMismatch {
                expected: 4,
                found: 0
            }
        );
        // Failed calls must not advance the counter.
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_roulette_favors_sole_scorer() {
        let mut engine = engine(5);
        let mut scored = scored_uniform(&mut engine, 5, 0.0);
        scored[2].fitness = 10.0;
        scored[4].fitness = -3.0;

        let picks = engine.select_parents(&scored, 5000);
        assert!(picks.iter().all(|&idx| idx == 2));
    }

    #[test]
    fn test_zero_fitness_falls_back_to_uniform() {
        let mut engine = engine(4);
        let scored = scored_uniform(&mut engine, 4, 0.0);

        let picks = engine.select_parents(&scored, 8000);
        let mut counts = [0usize; 4];
        for idx in picks {
            counts[idx] += 1;
        }
        // Roughly 2000 each; allow generous statistical slack.
        for count in counts {
            assert!(count > 1600 && count < 2400, "skewed draw: {:?}", counts);
        }
    }

    #[test]
    fn test_proportional_selection_distribution() {
        let mut engine = engine(2);
        let mut scored = scored_uniform(&mut engine, 2, 0.0);
        scored[0].fitness = 30.0;
        scored[1].fitness = 10.0;

        let picks = engine.select_parents(&scored, 10000);
        let first = picks.iter().filter(|&&idx| idx == 0).count();
        // Expected 7500; tolerance of a few hundred draws.
        assert!(first > 7100 && first < 7900, "first picked {} times", first);
    }

    #[test]
    fn test_blend_is_clamped_weighted_sum() {
        let engine = engine(2);
        let parent1 = Chromosome::from_genes(&[1.0; GENE_COUNT]).unwrap();
        let parent2 = Chromosome::from_genes(&[-1.0; GENE_COUNT]).unwrap();

        let child = engine.blend(&parent1, &parent2);
        // a=0.8, b=0.2: 0.8*1 + 0.2*(-1) = 0.6
        for gene in child.genes() {
            assert!((gene - 0.6).abs() < 1e-5);
        }
        assert!(child.in_range());
    }

    #[test]
    fn test_mutation_keeps_genes_in_range() {
        let mut engine = engine(2);
        let mut chromosome = Chromosome::from_genes(&[0.95; GENE_COUNT]).unwrap();
        for _ in 0..500 {
            engine.mutate(&mut chromosome, 1.0);
            assert!(chromosome.in_range());
        }
    }

    #[test]
    fn test_adaptive_rate_caps_out() {
        let mut config = EvolutionConfig::default();
        config.population_size = 4;
        config.base_mutation_rate = 0.02;
        config.mutation_rate_increment = 0.001;
        config.max_mutation_rate = 0.1;
        let mut engine = GeneticEngine::new(&config, 9).unwrap();

        assert!((engine.current_mutation_rate() - 0.02).abs() < 1e-6);

        engine.generation = 10;
        assert!((engine.current_mutation_rate() - 0.03).abs() < 1e-6);

        engine.generation = 500;
        assert!((engine.current_mutation_rate() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_offspring() {
        let mut config = EvolutionConfig::default();
        config.population_size = 6;

        let mut first = GeneticEngine::new(&config, 1234).unwrap();
        let mut second = GeneticEngine::new(&config, 1234).unwrap();

        let scored: Vec<ScoredChromosome> = first
            .initial_population(6)
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(i, chromosome)| ScoredChromosome {
                fitness: i as f32,
                chromosome,
            })
            .collect();
        let _sync = second.initial_population(6).unwrap();

        assert_eq!(first.evolve(&scored).unwrap(), second.evolve(&scored).unwrap());
    }
}
