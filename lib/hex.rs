mod board;
mod cell;
mod moves;
mod outcome;
mod side;
mod square;

pub use board::*;
pub use cell::*;
pub use moves::*;
pub use outcome::*;
pub use side::*;
pub use square::*;
