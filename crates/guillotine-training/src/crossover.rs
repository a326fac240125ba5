//! Crossover operators.
//!
//! Every operator takes two parents of equal length and returns a child of
//! the same length whose gene at each position is copied from one of the
//! parents. A gene carries both the weight and the pick config of its demand
//! board, so the two always travel together.
//!
//! - [`uniform`]: each position comes from either parent with a fair coin flip.
//! - [`one_point`]: a prefix of the first parent, then the rest of the second.
//! - [`two_point`]: first parent, a segment of the second, first parent again.

use std::{fmt, str::FromStr};

use guillotine_engine::Genotype;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Crossover strategy, chosen once per run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crossover {
    #[default]
    Uniform,
    OnePoint,
    TwoPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown crossover strategy '{name}' (valid: uniform, onepoint, twopoint)")]
pub struct UnknownCrossover {
    #[error(not(source))]
    pub name: String,
}

impl Crossover {
    pub const ALL: [Self; 3] = [Self::Uniform, Self::OnePoint, Self::TwoPoint];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::OnePoint => "onepoint",
            Self::TwoPoint => "twopoint",
        }
    }

    /// Produces a child from two parents.
    ///
    /// # Panics
    ///
    /// Panics if the parents differ in length.
    pub fn breed<R>(self, a: &Genotype, b: &Genotype, rng: &mut R) -> Genotype
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Uniform => uniform(a, b, rng),
            Self::OnePoint => one_point(a, b, rng),
            Self::TwoPoint => two_point(a, b, rng),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = UnknownCrossover;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCrossover { name: s.to_owned() })
    }
}

/// Copies each gene from `a` or `b` with equal probability.
pub fn uniform<R>(a: &Genotype, b: &Genotype, rng: &mut R) -> Genotype
where
    R: Rng + ?Sized,
{
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let (a, b) = (a.genes(), b.genes());
    Genotype::from_fn(a.len(), |i| if rng.random() { a[i] } else { b[i] })
}

/// Takes `a` before a cut drawn from `[1, len - 1]` and `b` from the cut on.
///
/// Parents shorter than two genes have no cut point; the child is a copy of
/// `a` and no randomness is consumed.
pub fn one_point<R>(a: &Genotype, b: &Genotype, rng: &mut R) -> Genotype
where
    R: Rng + ?Sized,
{
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let len = a.len();
    if len < 2 {
        return a.clone();
    }
    let cut = rng.random_range(1..len);
    splice(a, b, cut, len)
}

/// Takes `b` between two ordered cuts drawn from `[0, len]` and `a` elsewhere.
pub fn two_point<R>(a: &Genotype, b: &Genotype, rng: &mut R) -> Genotype
where
    R: Rng + ?Sized,
{
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let len = a.len();
    let x = rng.random_range(0..=len);
    let y = rng.random_range(0..=len);
    splice(a, b, x.min(y), x.max(y))
}

fn splice(a: &Genotype, b: &Genotype, start: usize, end: usize) -> Genotype {
    let (a, b) = (a.genes(), b.genes());
    Genotype::from_fn(a.len(), |i| {
        if (start..end).contains(&i) {
            b[i]
        } else {
            a[i]
        }
    })
}
