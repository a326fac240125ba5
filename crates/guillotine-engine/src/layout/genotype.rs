use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::Board;

/// Direction in which two boards are joined.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum Axis {
    /// Side by side: widths add up.
    #[default]
    Horizontal,
    /// One above the other: heights add up.
    Vertical,
}

impl Axis {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Joins two boards along this axis and returns their bounding board.
    #[must_use]
    pub fn stack(self, first: Board, second: Board) -> Board {
        match self {
            Self::Horizontal => first.hstack(second),
            Self::Vertical => first.vstack(second),
        }
    }
}

/// How a single demand board is placed when it is picked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickConfig {
    /// Place the board with width and height swapped.
    pub rotated: bool,
    /// Preferred axis for joining the board to the layout built so far.
    pub axis: Axis,
}

impl PickConfig {
    #[must_use]
    pub fn orient(self, board: Board) -> Board {
        if self.rotated { board.rotated() } else { board }
    }
}

impl Distribution<Axis> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Axis {
        if rng.random() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

impl Distribution<PickConfig> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PickConfig {
        PickConfig {
            rotated: rng.random(),
            axis: rng.random(),
        }
    }
}

/// The genes attached to one demand board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    /// Pick priority; boards are picked in ascending weight order.
    pub weight: u16,
    pub config: PickConfig,
}

impl Distribution<Gene> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Gene {
        Gene {
            weight: rng.random(),
            config: rng.random(),
        }
    }
}

/// Evolvable encoding of one arrangement: one [`Gene`] per demand board.
///
/// The gene at position `i` belongs to demand board `i` of the
/// [`CutSpec`](crate::CutSpec) it is decoded against.
///
/// # Example
///
/// ```
/// use guillotine_engine::{Axis, Gene, Genotype, PickConfig};
///
/// let genotype = Genotype::from_fn(3, |i| Gene {
///     weight: 10 - i as u16,
///     config: PickConfig::default(),
/// });
/// assert_eq!(genotype.pick_order(), vec![2, 1, 0]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genotype {
    genes: Vec<Gene>,
}

impl From<Vec<Gene>> for Genotype {
    fn from(genes: Vec<Gene>) -> Self {
        Self { genes }
    }
}

impl Genotype {
    /// Creates a genotype by applying a function to each position.
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> Gene,
    {
        Self {
            genes: (0..len).map(f).collect(),
        }
    }

    /// Creates a genotype with every gene drawn uniformly from its domain.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(len, |_| rng.random())
    }

    #[must_use]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    #[must_use]
    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Demand indices in the order they are picked by the decoder.
    ///
    /// Sorted by ascending weight; equal weights keep index order.
    #[must_use]
    pub fn pick_order(&self) -> Vec<usize> {
        let mut order = (0..self.genes.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| self.genes[i].weight);
        order
    }
}
