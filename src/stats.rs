//! Per-generation statistics for the metrics sink.
//!
//! The core records what happened each generation; formatting and persistence
//! beyond plain JSON export belong to downstream consumers.

use crate::evolution::ScoredChromosome;
use serde::{Deserialize, Serialize};

/// Snapshot taken at one generation boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index the snapshot closes out
    pub generation: u32,
    /// Best score reached this generation
    pub best_score: u32,
    /// Cars still alive when the generation ended
    pub alive_at_end: usize,
    /// Ticks the generation ran for
    pub ticks: u64,
    /// Every car's fitness and weights
    pub population: Vec<ScoredChromosome>,
}

impl GenerationRecord {
    /// Format the record as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:4} | Best:{:4} | Alive:{:3}/{:3} | Ticks:{:5}",
            self.generation,
            self.best_score,
            self.alive_at_end,
            self.population.len(),
            self.ticks,
        )
    }
}

/// Historical record of every completed generation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    pub records: Vec<GenerationRecord>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    /// Best score per generation, in order
    pub fn best_score_series(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.best_score).collect()
    }

    /// Highest score seen across the whole run
    pub fn best_score_overall(&self) -> u32 {
        self.records.iter().map(|r| r.best_score).max().unwrap_or(0)
    }

    /// Save history to a JSON file
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load_json(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Chromosome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(generation: u32, best_score: u32) -> GenerationRecord {
        let mut rng = ChaCha8Rng::seed_from_u64(generation as u64);
        let population = (0..3)
            .map(|i| ScoredChromosome {
                fitness: i as f32,
                chromosome: Chromosome::random(&mut rng),
            })
            .collect();
        GenerationRecord {
            generation,
            best_score,
            alive_at_end: 1,
            ticks: 250,
            population,
        }
    }

    #[test]
    fn test_series_and_overall_best() {
        let mut history = StatsHistory::new();
        history.push(record(1, 12));
        history.push(record(2, 40));
        history.push(record(3, 33));

        assert_eq!(history.best_score_series(), vec![12, 40, 33]);
        assert_eq!(history.best_score_overall(), 40);
        assert_eq!(history.latest().unwrap().generation, 3);
    }

    #[test]
    fn test_summary_mentions_key_fields() {
        let summary = record(7, 99).summary();
        assert!(summary.contains("7"));
        assert!(summary.contains("99"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut history = StatsHistory::new();
        history.push(record(1, 5));

        let path = std::env::temp_dir().join("evodrive_stats_test.json");
        let path = path.to_str().unwrap().to_string();
        history.save_json(&path).unwrap();

        let loaded = StatsHistory::load_json(&path).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].best_score, 5);
        assert_eq!(loaded.records[0].population.len(), 3);

        std::fs::remove_file(&path).ok();
    }
}
