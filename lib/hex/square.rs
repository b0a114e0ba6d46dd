use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A (row, column) position in the board storage.
///
/// Any pair of coordinates is representable, including those that fall
/// outside of the board, so that out of bounds requests can be named and
/// rejected by [`Board::contains`][`crate::hex::Board::contains`].
///
/// Squares are labeled by a row letter followed by a single column digit,
/// e.g. `A4` is row 0, column 4.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    #[cfg_attr(test, strategy(-2i8..10))]
    row: i8,
    #[cfg_attr(test, strategy(-2i8..10))]
    col: i8,
}

impl Square {
    /// Constructs [`Square`] from a pair of row and column indices.
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// This square's row index.
    pub fn row(&self) -> i8 {
        self.row
    }

    /// This square's column index.
    pub fn col(&self) -> i8 {
        self.col
    }

    /// The square reached by stepping `(rows, cols)` away from this one.
    pub fn step(&self, (rows, cols): (i8, i8)) -> Self {
        Square::new(self.row.saturating_add(rows), self.col.saturating_add(cols))
    }

    fn is_labeled(&self) -> bool {
        (0..26).contains(&self.row) && (0..10).contains(&self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_labeled() {
            write!(f, "{}{}", char::from(b'A' + self.row as u8), self.col)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected row letter in the range `(A..=Z)`")]
    InvalidRow,
    #[display(fmt = "failed to parse square, expected column digit in the range `(0..=9)`")]
    InvalidCol,
    #[display(fmt = "failed to parse square, expected exactly two characters")]
    InvalidLength,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::InvalidLength);
        };

        if !r.is_ascii_uppercase() {
            return Err(ParseSquareError::InvalidRow);
        }

        let Some(col) = c.to_digit(10) else {
            return Err(ParseSquareError::InvalidCol);
        };

        Ok(Square::new((r as u8 - b'A') as i8, col as i8))
    }
}

/// The destination of a move request, as typed by a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Target {
    /// Move to this square.
    Square(Square),
    /// End the session.
    Quit,
}

impl Target {
    /// The reserved token that requests the end of the session.
    pub const QUIT: &'static str = "q";
}

impl From<Square> for Target {
    fn from(sq: Square) -> Self {
        Target::Square(sq)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Square(sq) => fmt::Display::fmt(sq, f),
            Target::Quit => f.write_str(Target::QUIT),
        }
    }
}

/// The reason why parsing [`Target`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "{}", _0)]
pub struct ParseTargetError(ParseSquareError);

impl FromStr for Target {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Target::QUIT => Ok(Target::Quit),
            s => Ok(Target::Square(s.parse().map_err(ParseTargetError)?)),
        }
    }
}
