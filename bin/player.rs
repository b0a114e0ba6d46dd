use derive_more::{Display, Error, From};
use lib::game::Status;
use lib::hex::{Board, ParseSquareError, ParseTargetError, Side, Square, Target};
use lib::trace::Record;
use std::str::FromStr;

mod human;

pub use human::*;

/// What a [`Player`] wants to do next.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Request {
    /// Attempt to move a piece, or quit by targeting [`Target::Quit`].
    #[display(fmt = "{} {}", _0, _1)]
    Move(Square, Target),

    /// Walk away from the session without recording anything.
    #[display(fmt = "{}", "Target::QUIT")]
    Leave,
}

/// The reason why parsing [`Request`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum ParseRequestError {
    #[display(fmt = "expected `<source> <destination>` or `{}`", "Target::QUIT")]
    #[from(ignore)]
    InvalidTokenCount,
    #[display(fmt = "invalid source, {}", _0)]
    InvalidSource(ParseSquareError),
    #[display(fmt = "invalid destination, {}", _0)]
    InvalidDestination(ParseTargetError),
}

impl FromStr for Request {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>()[..] {
            [Target::QUIT, ..] => Ok(Request::Leave),
            [whence, whither] => Ok(Request::Move(whence.parse()?, whither.parse()?)),
            _ => Err(ParseRequestError::InvalidTokenCount),
        }
    }
}

/// Trait for types that take part in a game session.
#[cfg_attr(test, mockall::automock(type Error = String;))]
pub trait Player {
    /// The reason why the [`Player`] was unable to continue.
    type Error;

    /// Asks what `side` wants to do on the [`Board`].
    fn request(&mut self, board: &Board, side: Side) -> Result<Request, Self::Error>;

    /// Reports the [`Record`] of an attempt and the resulting [`Status`].
    fn notify(&mut self, record: &Record, status: Status) -> Result<(), Self::Error>;
}
