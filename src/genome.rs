//! Chromosome representation for steering controllers.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes in a chromosome: 9 input-to-hidden weights plus 3
/// hidden-to-output weights of the fixed 3-3-1 controller.
pub const GENE_COUNT: usize = 12;

/// Inclusive range every gene must stay inside after mutation or crossover.
pub const GENE_MIN: f32 = -1.0;
pub const GENE_MAX: f32 = 1.0;

/// A full set of controller weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chromosome {
    genes: [f32; GENE_COUNT],
}

impl Chromosome {
    /// Build a chromosome from a gene slice.
    pub fn from_genes(genes: &[f32]) -> Result<Self, GenomeError> {
        if genes.len() != GENE_COUNT {
            return Err(GenomeError::InvalidLength {
                expected: GENE_COUNT,
                found: genes.len(),
            });
        }
        let mut fixed = [0.0f32; GENE_COUNT];
        fixed.copy_from_slice(genes);
        Ok(Self { genes: fixed })
    }

    /// Build from a fixed-size gene array; length is correct by type.
    #[inline]
    pub(crate) fn from_array(genes: [f32; GENE_COUNT]) -> Self {
        Self { genes }
    }

    /// Draw a fresh chromosome with every gene uniform in [-1, 1].
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut genes = [0.0f32; GENE_COUNT];
        for gene in &mut genes {
            *gene = rng.gen_range(GENE_MIN..=GENE_MAX);
        }
        Self { genes }
    }

    #[inline]
    pub fn genes(&self) -> &[f32; GENE_COUNT] {
        &self.genes
    }

    #[inline]
    pub(crate) fn genes_mut(&mut self) -> &mut [f32; GENE_COUNT] {
        &mut self.genes
    }

    /// True if every gene lies in [-1, 1].
    pub fn in_range(&self) -> bool {
        self.genes.iter().all(|&g| (GENE_MIN..=GENE_MAX).contains(&g))
    }
}

/// Clamp a gene value back into the legal range.
#[inline]
pub fn clamp_gene(value: f32) -> f32 {
    value.clamp(GENE_MIN, GENE_MAX)
}

/// Errors from chromosome construction.
#[derive(Debug, PartialEq, Eq)]
pub enum GenomeError {
    InvalidLength { expected: usize, found: usize },
}

impl std::fmt::Display for GenomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength { expected, found } => {
                write!(f, "chromosome must have {} genes, got {}", expected, found)
            }
        }
    }
}

impl std::error::Error for GenomeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_genes_roundtrip() {
        let genes: Vec<f32> = (0..GENE_COUNT).map(|i| i as f32 / 12.0).collect();
        let chromosome = Chromosome::from_genes(&genes).unwrap();
        assert_eq!(chromosome.genes().as_slice(), genes.as_slice());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = Chromosome::from_genes(&[0.0; 11]).unwrap_err();
        assert_eq!(
            err,
            GenomeError::InvalidLength {
                expected: GENE_COUNT,
                found: 11
            }
        );
        assert!(Chromosome::from_genes(&[0.0; 13]).is_err());
    }

    #[test]
    fn test_random_genes_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let chromosome = Chromosome::random(&mut rng);
            assert!(chromosome.in_range());
        }
    }

    #[test]
    fn test_clamp_gene() {
        assert_eq!(clamp_gene(1.7), 1.0);
        assert_eq!(clamp_gene(-2.3), -1.0);
        assert_eq!(clamp_gene(0.4), 0.4);
    }
}
