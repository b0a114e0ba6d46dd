use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{ops::Not, str::FromStr};

/// One of the two sides playing the game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Side {
    /// The first side to move, advancing toward decreasing rows.
    #[display(fmt = "B")]
    Blue,
    /// The second side to move, advancing toward increasing rows.
    #[display(fmt = "R")]
    Red,
}

impl Side {
    /// Both sides, in turn order.
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// The symbol that identifies this side on the board and in traces.
    pub fn symbol(&self) -> char {
        match self {
            Side::Blue => 'B',
            Side::Red => 'R',
        }
    }

    /// A human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }

    /// The sign applied to every advance step of this side.
    pub(crate) fn orientation(&self) -> i8 {
        match self {
            Side::Blue => -1,
            Side::Red => 1,
        }
    }

    /// An iterator over both sides, in turn order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
}

/// The reason why parsing [`Side`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse side, expected `B` or `R`")]
pub struct ParseSideError;

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Side::Blue),
            "R" => Ok(Side::Red),
            _ => Err(ParseSideError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn side_implements_not_operator(s: Side) {
        assert_eq!(!!s, s);
        assert_ne!(!s, s);
    }

    #[proptest]
    fn sides_advance_in_opposite_directions(s: Side) {
        assert_eq!(s.orientation(), -(!s).orientation());
    }

    #[proptest]
    fn side_is_displayed_as_its_symbol(s: Side) {
        assert_eq!(s.to_string(), s.symbol().to_string());
    }

    #[proptest]
    fn parsing_printed_side_is_an_identity(s: Side) {
        assert_eq!(s.to_string().parse(), Ok(s));
    }

    #[proptest]
    fn parsing_side_fails_for_anything_but_its_symbol(#[filter(#s != "B" && #s != "R")] s: String) {
        assert_eq!(s.parse::<Side>(), Err(ParseSideError));
    }

    #[test]
    fn blue_moves_first() {
        assert_eq!(Side::iter().next(), Some(Side::Blue));
    }
}
