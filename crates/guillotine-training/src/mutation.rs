//! Mutation operators.
//!
//! Each sub-mutator draws how many genes to touch from a normal distribution,
//! rounds and clamps that count into `[0, gene count]`, picks that many
//! distinct positions and replaces the chosen part of each gene with a fresh
//! uniform sample. The mean is the only intensity knob.

use guillotine_engine::Genotype;
use rand::{Rng, seq::index};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Changes a child genotype in place.
pub trait Mutator {
    fn mutate<R>(&self, genotype: &mut Genotype, rng: &mut R)
    where
        R: Rng + ?Sized;
}

/// Parameters of the normal distribution a mutation count is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl MutationParams {
    /// Parameters with a standard deviation of a fifth of the mean.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        Self {
            mean,
            std_dev: mean / 5.0,
        }
    }
}

/// Samples how many genes a mutator touches.
#[derive(Debug, Clone, Copy)]
pub struct MutationCount {
    distribution: Normal<f64>,
}

impl MutationCount {
    pub fn new(kind: &'static str, params: MutationParams) -> Result<Self, ConfigError> {
        let MutationParams { mean, std_dev } = params;
        if !(mean.is_finite() && mean >= 0.0) {
            return Err(ConfigError::MutationMean { kind, mean });
        }
        let distribution = Normal::new(mean, std_dev)
            .map_err(|source| ConfigError::MutationDistribution { kind, source })?;
        Ok(Self { distribution })
    }

    /// Draws a count rounded to the nearest integer and clamped to `[0, gene_count]`.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sample<R>(&self, rng: &mut R, gene_count: usize) -> usize
    where
        R: Rng + ?Sized,
    {
        let count = rng.sample(self.distribution).round();
        if count <= 0.0 {
            0
        } else if count >= gene_count as f64 {
            gene_count
        } else {
            count as usize
        }
    }

    fn positions<R>(&self, rng: &mut R, gene_count: usize) -> index::IndexVec
    where
        R: Rng + ?Sized,
    {
        let amount = self.sample(rng, gene_count);
        index::sample(rng, gene_count, amount)
    }
}

/// Replaces the weight of randomly chosen genes.
#[derive(Debug, Clone, Copy)]
pub struct WeightMutator(pub MutationCount);

impl Mutator for WeightMutator {
    fn mutate<R>(&self, genotype: &mut Genotype, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let positions = self.0.positions(rng, genotype.len());
        let genes = genotype.genes_mut();
        for i in positions {
            genes[i].weight = rng.random();
        }
    }
}

/// Replaces the pick config of randomly chosen genes.
#[derive(Debug, Clone, Copy)]
pub struct ConfigMutator(pub MutationCount);

impl Mutator for ConfigMutator {
    fn mutate<R>(&self, genotype: &mut Genotype, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let positions = self.0.positions(rng, genotype.len());
        let genes = genotype.genes_mut();
        for i in positions {
            genes[i].config = rng.random();
        }
    }
}

/// Applies a weight mutator, then a config mutator.
#[derive(Debug, Clone, Copy)]
pub struct CompoundMutator<W = WeightMutator, C = ConfigMutator> {
    pub weight: W,
    pub config: C,
}

impl CompoundMutator {
    pub fn new(weight: MutationParams, config: MutationParams) -> Result<Self, ConfigError> {
        Ok(Self {
            weight: WeightMutator(MutationCount::new("weight", weight)?),
            config: ConfigMutator(MutationCount::new("config", config)?),
        })
    }
}

impl<W, C> Mutator for CompoundMutator<W, C>
where
    W: Mutator,
    C: Mutator,
{
    fn mutate<R>(&self, genotype: &mut Genotype, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.weight.mutate(genotype, rng);
        self.config.mutate(genotype, rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn count(mean: f64, std_dev: f64) -> MutationCount {
        MutationCount::new("test", MutationParams { mean, std_dev }).unwrap()
    }

    fn changed(a: &Genotype, b: &Genotype) -> (usize, usize) {
        let weights = a
            .genes()
            .iter()
            .zip(b.genes())
            .filter(|(x, y)| x.weight != y.weight)
            .count();
        let configs = a
            .genes()
            .iter()
            .zip(b.genes())
            .filter(|(x, y)| x.config != y.config)
            .count();
        (weights, configs)
    }

    #[test]
    fn test_count_is_clamped() {
        let mut rng = Pcg32::seed_from_u64(0);
        let high = count(100.0, 1.0);
        let low = count(0.0, 5.0);
        for _ in 0..100 {
            assert_eq!(high.sample(&mut rng, 8), 8);
            assert!(low.sample(&mut rng, 8) <= 8);
        }
        assert_eq!(high.sample(&mut rng, 0), 0);
    }

    #[test]
    fn test_count_without_spread_is_the_rounded_mean() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(count(2.4, 0.0).sample(&mut rng, 10), 2);
        assert_eq!(count(2.6, 0.0).sample(&mut rng, 10), 3);
        assert_eq!(count(0.0, 0.0).sample(&mut rng, 10), 0);
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_count_mean_tracks_parameter() {
        let mut rng = Pcg32::seed_from_u64(21);
        let sampler = count(10.0, 2.0);
        let total: usize = (0..2000).map(|_| sampler.sample(&mut rng, 100)).sum();
        let mean = total as f64 / 2000.0;
        assert!((mean - 10.0).abs() < 0.5, "mean = {mean}");
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            MutationCount::new("weight", MutationParams::from_mean(-1.0)),
            Err(ConfigError::MutationMean { .. })
        ));
        assert!(matches!(
            MutationCount::new(
                "config",
                MutationParams {
                    mean: 1.0,
                    std_dev: f64::NAN,
                }
            ),
            Err(ConfigError::MutationDistribution { .. })
        ));
    }

    #[test]
    fn test_weight_mutator_touches_only_weights() {
        let mut rng = Pcg32::seed_from_u64(8);
        let original = Genotype::random(&mut rng, 64);
        let mut mutated = original.clone();
        WeightMutator(count(64.0, 0.0)).mutate(&mut mutated, &mut rng);
        let (weights, configs) = changed(&original, &mutated);
        assert_eq!(configs, 0);
        // Every weight is resampled; a few may coincide with the old value.
        assert!(weights > 60, "changed {weights} weights");
    }

    #[test]
    fn test_config_mutator_touches_only_configs() {
        let mut rng = Pcg32::seed_from_u64(9);
        let original = Genotype::random(&mut rng, 64);
        let mut mutated = original.clone();
        ConfigMutator(count(5.0, 0.0)).mutate(&mut mutated, &mut rng);
        let (weights, configs) = changed(&original, &mutated);
        assert_eq!(weights, 0);
        assert!(configs <= 5);
    }

    #[test]
    fn test_zero_mean_leaves_genotype_unchanged() {
        let mut rng = Pcg32::seed_from_u64(10);
        let original = Genotype::random(&mut rng, 16);
        let mut mutated = original.clone();
        let mutator = CompoundMutator::new(
            MutationParams::from_mean(0.0),
            MutationParams::from_mean(0.0),
        )
        .unwrap();
        mutator.mutate(&mut mutated, &mut rng);
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_compound_mutator_on_empty_genotype() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mutator = CompoundMutator::new(
            MutationParams::from_mean(10.0),
            MutationParams::from_mean(10.0),
        )
        .unwrap();
        let mut genotype = Genotype::default();
        mutator.mutate(&mut genotype, &mut rng);
        assert!(genotype.is_empty());
    }
}
