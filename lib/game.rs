use crate::hex::{Board, Mode, Outcome, Side, Square, Target};
use crate::trace::Record;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// The state of a [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Status {
    #[display(fmt = "ongoing")]
    Ongoing,

    #[display(fmt = "won by the {} side", "_0.name()")]
    Won(Side),

    #[display(fmt = "quit")]
    Quit,
}

impl Status {
    /// The winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match *self {
            Status::Won(s) => Some(s),
            _ => None,
        }
    }
}

/// Rejects move attempts once the [`Game`] is over.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "the game is over, {}", _0)]
pub struct GameOver(#[error(not(source))] pub Status);

/// A game session.
///
/// Owns the [`Board`] and tracks whose turn it is. Sides alternate after
/// every accepted move, a rejected move lets the same side try again.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    board: Board,
    turn: Side,
    plies: usize,
    status: Status,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::default(), Side::Blue)
    }
}

impl From<Board> for Game {
    fn from(board: Board) -> Self {
        Game::new(board, Side::Blue)
    }
}

impl Game {
    /// Starts a game from some [`Board`] with `turn` to move.
    pub fn new(board: Board, turn: Side) -> Self {
        let status = match board.winner(turn) {
            Some(w) => Status::Won(w),
            None => Status::Ongoing,
        };

        Game {
            board,
            turn,
            plies: 0,
            status,
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The number of accepted moves so far.
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// The current [`Status`].
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the game is over.
    pub fn is_over(&self) -> bool {
        self.status != Status::Ongoing
    }

    /// Attempts a move for the side to move.
    ///
    /// Returns the [`Record`] of the attempt, whatever its [`Outcome`].
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), err)]
    pub fn attempt(&mut self, whence: Square, whither: Target) -> Result<Record, GameOver> {
        if self.is_over() {
            return Err(GameOver(self.status));
        }

        let side = self.turn;
        let outcome = self.board.play(side, whence, whither, Mode::Real);

        match outcome {
            Outcome::Ok => {
                self.plies += 1;
                self.turn = !side;

                if let Some(w) = self.board.winner(self.turn) {
                    self.status = Status::Won(w);
                    info!(winner = w.name(), plies = self.plies, "game over");
                }
            }

            Outcome::Quit => {
                self.status = Status::Quit;
                info!(side = side.name(), plies = self.plies, "game quit");
            }

            rejection => debug!(%rejection, "move rejected"),
        }

        Ok(Record::new(side, whence, whither, outcome))
    }
}
