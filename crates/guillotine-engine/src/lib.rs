//! Geometry and layout decoding for guillotine cutting.
//!
//! This crate holds everything that is deterministic about a cutting plan:
//!
//! - [`Board`] and [`CutSpec`] describe the rectangles to cut and the stock
//!   width limit.
//! - [`Genotype`] is the evolvable encoding of one arrangement.
//! - [`LayoutTree`] is the guillotine-cut tree decoded from a genotype, and
//!   [`Drawing`] is its flattened, absolute-coordinate form.
//!
//! Nothing here consumes randomness except the `random` constructors, which
//! take the generator as an argument.

pub use self::{core::*, layout::*};

pub mod core;
pub mod layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("split position {position} exceeds board extent {extent}")]
pub struct SplitError {
    pub position: u32,
    pub extent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid board size '{input}', expected WIDTHxHEIGHT (e.g. 200x100)")]
pub struct ParseBoardError {
    #[error(not(source))]
    pub input: String,
}

/// The demand boards are too large to be stacked within a `u32` sheet.
///
/// The summed longer sides of all demand boards bound every stacked layout,
/// so a [`CutSpec`] keeps that sum within `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board {board} would raise the summed board extent to {extent}, past the u32 range")]
pub struct ExtentOverflowError {
    pub board: Board,
    pub extent: u64,
}
