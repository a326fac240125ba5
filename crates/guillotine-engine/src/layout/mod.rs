pub use self::{drawing::*, genotype::*, tree::*};

pub(crate) mod drawing;
pub(crate) mod genotype;
pub(crate) mod tree;
