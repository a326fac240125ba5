//! Generational search loop.
//!
//! The loop alternates between two states:
//!
//! - [`Population`] → [`RankedPopulation`] via [`GeneticAlgorithm::evaluate`]
//!   (decode, score, stable sort; no randomness).
//! - [`RankedPopulation`] → [`Population`] via [`GeneticAlgorithm::next`]
//!   (elitism, then tournament selection, crossover and mutation).
//!
//! All random draws happen in `next` and in the initial population, in a
//! fixed order, so a run is reproducible from its seed regardless of how many
//! threads evaluate fitness.

use std::{num::NonZeroUsize, thread};

use guillotine_engine::CutSpec;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    config::{ConfigError, SolverConfig},
    crossover::Crossover,
    fitness::FitnessEvaluator,
    mutation::{CompoundMutator, Mutator},
    population::{GenerationStats, Individual, Population, RankedPopulation},
    selection::TournamentSelectorBuilder,
};

/// Controls how one generation turns into the next.
#[derive(Debug)]
pub struct GeneticAlgorithm<'a, E, M = CompoundMutator> {
    pub spec: &'a CutSpec,
    pub evaluator: E,
    pub mutator: M,
    pub crossover: Crossover,
    pub selector: TournamentSelectorBuilder,
    /// Number of top individuals copied unchanged (elitism).
    pub elite_size: usize,
}

impl<'a, E> GeneticAlgorithm<'a, E>
where
    E: FitnessEvaluator,
{
    /// Builds the algorithm from a validated configuration.
    pub fn from_config(
        spec: &'a CutSpec,
        config: &SolverConfig,
        evaluator: E,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            spec,
            evaluator,
            mutator: config.mutator()?,
            crossover: config.crossover,
            selector: config.selector(),
            elite_size: config.elite_size,
        })
    }
}

impl<E, M> GeneticAlgorithm<'_, E, M>
where
    E: FitnessEvaluator,
    M: Mutator,
{
    /// Creates the initial generation with one gene per demand board.
    pub fn random_population<R>(&self, size: usize, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        Population::random(rng, self.spec.len(), size)
    }

    /// Scores every individual and ranks them by ascending fitness.
    ///
    /// Individuals that already carry a fitness (elites) are not decoded
    /// again. Work is split across threads; the ranking does not depend on
    /// the split.
    pub fn evaluate(&self, mut population: Population) -> RankedPopulation {
        let len = population.len();
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = len.div_ceil(workers).max(1);
        let mut fitness = vec![0; len];
        let spec = self.spec;
        let evaluator = &self.evaluator;

        thread::scope(|s| {
            let chunks = population
                .individuals_mut()
                .chunks_mut(chunk_size)
                .zip(fitness.chunks_mut(chunk_size));
            for (individuals, scores) in chunks {
                s.spawn(move || {
                    for (ind, score) in individuals.iter_mut().zip(scores) {
                        *score = ind.evaluate(spec, evaluator);
                    }
                });
            }
        });

        RankedPopulation::rank(population, &fitness)
    }

    /// Breeds the next generation from a ranked one of the same size.
    pub fn next<R>(&self, ranked: &RankedPopulation, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let size = ranked.len();
        let mut individuals = Vec::with_capacity(size);
        individuals.extend(ranked.individuals().iter().take(self.elite_size).cloned());
        if individuals.len() == size {
            return Population::from(individuals);
        }

        let selector = self.selector.bind(ranked);
        while individuals.len() < size {
            let p1 = selector.select(rng);
            let p2 = selector.select(rng);
            trace!(p1 = ?p1.fitness(), p2 = ?p2.fitness(), "selected parents");
            let mut child = self.crossover.breed(p1.genotype(), p2.genotype(), rng);
            self.mutator.mutate(&mut child, rng);
            individuals.push(Individual::from(child));
        }
        Population::from(individuals)
    }

    /// Runs a fixed number of generations and returns the last ranking.
    ///
    /// The initial population counts as the first generation, so it is
    /// evaluated `max(generations, 1)` times in total. `observe` is called
    /// after every evaluation.
    pub fn run<R, F>(
        &self,
        population: Population,
        generations: usize,
        rng: &mut R,
        mut observe: F,
    ) -> RankedPopulation
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationStats, &RankedPopulation),
    {
        info!(
            boards = self.spec.len(),
            population = population.len(),
            generations,
            crossover = %self.crossover,
            "starting search"
        );
        let mut ranked = self.evaluate(population);
        let mut report = |generation: usize, ranked: &RankedPopulation| {
            if let Some(stats) = GenerationStats::new(generation, ranked) {
                debug!(
                    generation,
                    best = stats.best,
                    worst = stats.worst,
                    mean = stats.mean,
                    "generation evaluated"
                );
                observe(&stats, ranked);
            }
        };
        report(0, &ranked);

        for generation in 1..generations {
            let population = self.next(&ranked, rng);
            ranked = self.evaluate(population);
            report(generation, &ranked);
        }

        info!(best = ?ranked.best_fitness(), "search finished");
        ranked
    }
}
