use guillotine_engine::{CutSpec, Genotype, LayoutTree};
use rand::Rng;

use crate::fitness::FitnessEvaluator;

/// A candidate arrangement: a genotype and its cached fitness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    genotype: Genotype,
    fitness: Option<u64>,
}

impl From<Genotype> for Individual {
    fn from(genotype: Genotype) -> Self {
        Self {
            genotype,
            fitness: None,
        }
    }
}

impl Individual {
    /// Creates an individual with every gene drawn uniformly from its domain.
    pub fn random<R>(rng: &mut R, gene_count: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from(Genotype::random(rng, gene_count))
    }

    #[must_use]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// The cached fitness, if this individual has been evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<u64> {
        self.fitness
    }

    /// Decodes and scores the individual unless a fitness is already cached.
    pub fn evaluate<E>(&mut self, spec: &CutSpec, evaluator: &E) -> u64
    where
        E: FitnessEvaluator + ?Sized,
    {
        *self.fitness.get_or_insert_with(|| {
            let tree = LayoutTree::decode(spec, &self.genotype);
            evaluator.fitness(spec, &tree)
        })
    }
}

/// An unevaluated generation.
#[derive(Debug, Default, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }
}

impl Population {
    /// Creates `count` random individuals with `gene_count` genes each.
    pub fn random<R>(rng: &mut R, gene_count: usize, count: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(rng, gene_count))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

/// An evaluated generation, sorted by ascending fitness (best first).
///
/// Individuals with equal fitness keep their order from the population they
/// were ranked from.
#[derive(Debug, Default, Clone)]
pub struct RankedPopulation {
    individuals: Vec<Individual>,
    fitness: Vec<u64>,
}

impl RankedPopulation {
    /// Ranks `population` given the fitness of each of its individuals.
    pub(crate) fn rank(population: Population, fitness: &[u64]) -> Self {
        assert_eq!(population.len(), fitness.len());
        let mut order = (0..fitness.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| fitness[i]);

        let mut slots = population
            .individuals
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        let mut individuals = Vec::with_capacity(order.len());
        let mut ranked_fitness = Vec::with_capacity(order.len());
        for i in order {
            if let Some(mut individual) = slots[i].take() {
                individual.fitness = Some(fitness[i]);
                individuals.push(individual);
                ranked_fitness.push(fitness[i]);
            }
        }
        Self {
            individuals,
            fitness: ranked_fitness,
        }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn individual(&self, rank: usize) -> &Individual {
        &self.individuals[rank]
    }

    /// Fitness of the individual at `rank`.
    #[must_use]
    pub fn fitness(&self, rank: usize) -> u64 {
        self.fitness[rank]
    }

    /// Fitness values in rank order.
    #[must_use]
    pub fn fitness_values(&self) -> &[u64] {
        &self.fitness
    }

    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    #[must_use]
    pub fn best_fitness(&self) -> Option<u64> {
        self.fitness.first().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

/// Fitness summary of one ranked generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: u64,
    pub worst: u64,
    pub mean: f64,
}

impl GenerationStats {
    /// Summarizes `population`; returns `None` if it is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(generation: usize, population: &RankedPopulation) -> Option<Self> {
        let best = *population.fitness.first()?;
        let worst = *population.fitness.last()?;
        let sum = population
            .fitness
            .iter()
            .map(|&f| u128::from(f))
            .sum::<u128>();
        let mean = sum as f64 / population.len() as f64;
        Some(Self {
            generation,
            best,
            worst,
            mean,
        })
    }
}

#[cfg(test)]
mod tests {
    use guillotine_engine::{Gene, PickConfig};

    use super::*;
    use crate::fitness::BoundingArea;

    fn individual(weight: u16) -> Individual {
        Individual::from(Genotype::from_fn(1, |_| Gene {
            weight,
            config: PickConfig::default(),
        }))
    }

    #[test]
    fn test_rank_sorts_ascending_and_stable() {
        let population = Population::from((0..5).map(individual).collect::<Vec<_>>());
        let ranked = RankedPopulation::rank(population, &[30, 10, 30, 20, 10]);

        assert_eq!(ranked.fitness_values(), [10, 10, 20, 30, 30]);
        let weights = ranked
            .individuals()
            .iter()
            .map(|ind| ind.genotype().genes()[0].weight)
            .collect::<Vec<_>>();
        assert_eq!(weights, vec![1, 4, 3, 0, 2]);
        for (rank, ind) in ranked.individuals().iter().enumerate() {
            assert_eq!(ind.fitness(), Some(ranked.fitness(rank)));
        }
        assert_eq!(ranked.best_fitness(), Some(10));
    }

    #[test]
    fn test_evaluate_caches_fitness() {
        let mut spec = CutSpec::new(0);
        spec.add(4, 5);
        let mut ind = individual(0);
        assert_eq!(ind.fitness(), None);
        assert_eq!(ind.evaluate(&spec, &BoundingArea), 20);
        assert_eq!(ind.fitness(), Some(20));

        let never_called = |_: &CutSpec, _: &LayoutTree| -> u64 { unreachable!() };
        assert_eq!(ind.evaluate(&spec, &never_called), 20);
    }

    #[test]
    fn test_empty_spec_fitness_is_zero() {
        let spec = CutSpec::new(100);
        let mut ind = Individual::from(Genotype::default());
        assert_eq!(ind.evaluate(&spec, &BoundingArea), 0);
    }

    #[test]
    fn test_generation_stats() {
        let population = Population::from((0..4).map(individual).collect::<Vec<_>>());
        let ranked = RankedPopulation::rank(population, &[40, 10, 30, 20]);
        let stats = GenerationStats::new(3, &ranked).unwrap();
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.best, 10);
        assert_eq!(stats.worst, 40);
        assert!((stats.mean - 25.0).abs() < f64::EPSILON);

        assert!(GenerationStats::new(0, &RankedPopulation::default()).is_none());
    }
}
