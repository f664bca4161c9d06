pub use self::{board::*, palette::*, piece::*};

pub(crate) mod board;
pub(crate) mod palette;
pub(crate) mod piece;
