pub use self::{board::*, cut_spec::*};

pub(crate) mod board;
pub(crate) mod cut_spec;
