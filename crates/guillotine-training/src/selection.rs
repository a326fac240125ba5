//! Probabilistic tournament selection.
//!
//! A tournament samples `size` individuals from a ranked population, then
//! walks the sample from best to worst, accepting each candidate with
//! probability `probability`. If no candidate is accepted, the worst sampled
//! individual wins. Strong individuals are favored geometrically while weak
//! ones keep a nonzero chance, which sustains diversity.

use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};

use crate::population::{Individual, RankedPopulation};

/// Tournament parameters, bound to a population with [`Self::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TournamentSelectorBuilder {
    /// Number of individuals sampled per tournament.
    pub size: usize,
    /// Probability of accepting the current best remaining candidate.
    pub probability: f64,
    /// Sample with replacement (the same individual may appear twice).
    pub replacement: bool,
}

impl TournamentSelectorBuilder {
    /// Creates a selector drawing from `population`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or `probability` is outside `[0, 1]`.
    #[must_use]
    pub fn bind<'a>(&self, population: &'a RankedPopulation) -> TournamentSelector<'a> {
        assert!(self.size > 0, "tournament size must be positive");
        assert!(
            (0.0..=1.0).contains(&self.probability),
            "selection probability must be within [0, 1]"
        );
        TournamentSelector {
            population,
            size: self.size,
            probability: self.probability,
            replacement: self.replacement,
        }
    }
}

/// Tournament selector bound to one generation.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelector<'a> {
    population: &'a RankedPopulation,
    size: usize,
    probability: f64,
    replacement: bool,
}

impl<'a> TournamentSelector<'a> {
    /// Runs one tournament and returns the winner.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    pub fn select<R>(&self, rng: &mut R) -> &'a Individual
    where
        R: Rng + ?Sized,
    {
        self.population.individual(self.select_rank(rng))
    }

    /// Runs one tournament and returns the winner's rank.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    pub fn select_rank<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let len = self.population.len();
        assert!(len > 0, "cannot select from an empty population");

        // Ranks are ordered by fitness, so sorting the sample sorts by fitness.
        let mut sample = if self.replacement {
            (0..self.size)
                .map(|_| rng.random_range(0..len))
                .collect::<Vec<_>>()
        } else {
            index::sample(rng, len, self.size.min(len)).into_vec()
        };
        sample.sort_unstable();

        let (&worst, contenders) = sample
            .split_last()
            .expect("tournament sample should never be empty");
        contenders
            .iter()
            .copied()
            .find(|_| rng.random_bool(self.probability))
            .unwrap_or(worst)
    }
}
