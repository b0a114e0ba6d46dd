use crate::hex::Side;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The content of one storage slot of the [`Board`][`crate::hex::Board`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, From)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Cell {
    /// A playable cell with no piece on it.
    #[display(fmt = ".")]
    #[from(ignore)]
    Empty,

    /// A playable cell holding a piece of some [`Side`].
    #[display(fmt = "{}", _0)]
    Occupied(Side),

    /// A storage slot outside of the hexagonal playing area.
    #[display(fmt = "-")]
    #[from(ignore)]
    OffBoard,
}

impl Cell {
    /// The symbol of this cell in board notation.
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(s) => s.symbol(),
            Cell::OffBoard => '-',
        }
    }

    /// Parses a cell from its symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'B' => Some(Cell::Occupied(Side::Blue)),
            'R' => Some(Cell::Occupied(Side::Red)),
            '-' => Some(Cell::OffBoard),
            _ => None,
        }
    }

    /// The [`Side`] occupying this cell, if any.
    pub fn side(&self) -> Option<Side> {
        match *self {
            Cell::Occupied(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is a playable cell with no piece on it.
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// Whether this slot lies outside of the playing area.
    pub fn is_off_board(&self) -> bool {
        *self == Cell::OffBoard
    }
}

/// The reason why parsing [`Cell`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse cell, expected one of `.`, `B`, `R` or `-`")]
pub struct ParseCellError;

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Cell::from_symbol(c).ok_or(ParseCellError),
            _ => Err(ParseCellError),
        }
    }
}
