use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The result of a move request.
///
/// Every rejection is an expected result, the caller is meant to branch on it
/// and usually ask the same side to try again.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The move was legal and, unless simulated, applied.
    #[display(fmt = "OK")]
    Ok,
    /// The source holds a piece of the opponent.
    #[display(fmt = "BAD_SIDE")]
    BadSide,
    /// The destination is not empty.
    #[display(fmt = "DEST_OCCUPIED")]
    DestOccupied,
    /// There is no piece on the source.
    #[display(fmt = "EMPTY_SOURCE")]
    EmptySource,
    /// The destination is not one of the piece's legal targets.
    #[display(fmt = "TOO_FAR")]
    TooFar,
    /// The source or the destination lies outside of the playing area.
    #[display(fmt = "OFF_BOARD")]
    OffBoard,
    /// The player requested the end of the session.
    #[display(fmt = "QUIT")]
    Quit,
}

impl Outcome {
    /// Whether the move was accepted.
    pub fn is_ok(&self) -> bool {
        *self == Outcome::Ok
    }

    /// Whether the move was rejected and the same side should try again.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Outcome::Ok | Outcome::Quit)
    }
}

/// The reason why parsing [`Outcome`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse move outcome")]
pub struct ParseOutcomeError;

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(Outcome::Ok),
            "BAD_SIDE" | "BAD_COLOR" => Ok(Outcome::BadSide),
            "DEST_OCCUPIED" | "DEST_NOT_FREE" => Ok(Outcome::DestOccupied),
            "EMPTY_SOURCE" | "EMPTY_SRC" => Ok(Outcome::EmptySource),
            "TOO_FAR" => Ok(Outcome::TooFar),
            "OFF_BOARD" | "EXT_BOARD" => Ok(Outcome::OffBoard),
            "QUIT" | "EXIT" => Ok(Outcome::Quit),
            _ => Err(ParseOutcomeError),
        }
    }
}

/// Whether a move request is committed to the board.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Mode {
    /// Validate and apply.
    #[default]
    #[display(fmt = "real")]
    Real,
    /// Validate only, leaving the board untouched.
    #[display(fmt = "simulate")]
    Simulate,
}
