use serde::{Deserialize, Serialize};

use crate::{
    crossover::Crossover,
    mutation::{CompoundMutator, MutationParams},
    selection::TournamentSelectorBuilder,
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be positive")]
    EmptyPopulation,
    #[display("elite size {elite_size} exceeds population size {population_size}")]
    EliteTooLarge {
        elite_size: usize,
        population_size: usize,
    },
    #[display("tournament size must be positive")]
    EmptyTournament,
    #[display("selection probability must be within (0, 1], got {probability}")]
    SelectionProbability { probability: f64 },
    #[display("{kind} mutation mean must be a non-negative number, got {mean}")]
    MutationMean { kind: &'static str, mean: f64 },
    #[display("invalid {kind} mutation distribution: {source}")]
    MutationDistribution {
        kind: &'static str,
        source: rand_distr::NormalError,
    },
}

/// Parameters of one search run.
///
/// The defaults are a 300-individual population evolved for 1000
/// generations with uniform crossover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Number of top individuals copied unchanged into the next generation.
    pub elite_size: usize,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Probability of accepting the best remaining tournament candidate.
    pub selection_probability: f64,
    /// Whether tournaments sample with replacement.
    pub tournament_replacement: bool,
    pub crossover: Crossover,
    pub weight_mutation: MutationParams,
    pub config_mutation: MutationParams,
    /// Number of evaluated generations, including the initial one.
    pub generations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            elite_size: 10,
            tournament_size: 5,
            selection_probability: 0.8,
            tournament_replacement: true,
            crossover: Crossover::Uniform,
            weight_mutation: MutationParams::from_mean(10.0),
            config_mutation: MutationParams::from_mean(10.0),
            generations: 1000,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteTooLarge {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        let probability = self.selection_probability;
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(ConfigError::SelectionProbability { probability });
        }
        self.mutator()?;
        Ok(())
    }

    #[must_use]
    pub fn selector(&self) -> TournamentSelectorBuilder {
        TournamentSelectorBuilder {
            size: self.tournament_size,
            probability: self.selection_probability,
            replacement: self.tournament_replacement,
        }
    }

    pub fn mutator(&self) -> Result<CompoundMutator, ConfigError> {
        CompoundMutator::new(self.weight_mutation, self.config_mutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        config.validate().unwrap();
        assert!((config.weight_mutation.std_dev - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.selector().size, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            SolverConfig {
                population_size: 0,
                elite_size: 0,
                ..SolverConfig::default()
            },
            SolverConfig {
                population_size: 5,
                elite_size: 6,
                ..SolverConfig::default()
            },
            SolverConfig {
                tournament_size: 0,
                ..SolverConfig::default()
            },
            SolverConfig {
                selection_probability: 0.0,
                ..SolverConfig::default()
            },
            SolverConfig {
                selection_probability: 1.5,
                ..SolverConfig::default()
            },
            SolverConfig {
                weight_mutation: MutationParams::from_mean(f64::NAN),
                ..SolverConfig::default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_elite_may_fill_population() {
        let config = SolverConfig {
            population_size: 4,
            elite_size: 4,
            ..SolverConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"population_size": 50, "crossover": "twopoint"}"#).unwrap();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert_eq!(config.generations, SolverConfig::default().generations);
    }
}
