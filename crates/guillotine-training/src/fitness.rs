//! Fitness functions for decoded layouts.
//!
//! Fitness is minimized: a lower value is a better layout.

use guillotine_engine::{CutSpec, LayoutTree};

/// Scores a decoded layout.
///
/// Evaluators are called from several threads at once and must not hold
/// mutable state.
pub trait FitnessEvaluator: Sync {
    fn fitness(&self, spec: &CutSpec, tree: &LayoutTree) -> u64;
}

/// Area of the layout's bounding sheet.
///
/// An empty layout scores zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundingArea;

impl FitnessEvaluator for BoundingArea {
    fn fitness(&self, _spec: &CutSpec, tree: &LayoutTree) -> u64 {
        tree.area()
    }
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&CutSpec, &LayoutTree) -> u64 + Sync,
{
    fn fitness(&self, spec: &CutSpec, tree: &LayoutTree) -> u64 {
        self(spec, tree)
    }
}
