use crate::hex::{steps, Cell, Mode, Move, Outcome, Side, Square, Target, Targets};
use derive_more::{DebugCustom, Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The number of rows in the board storage.
pub const ROWS: usize = 7;

/// The number of columns in the board storage.
///
/// The column axis is one slot wider than the row axis, column 0 lies
/// entirely outside of the hexagon.
pub const COLS: usize = ROWS + 1;

const O: Cell = Cell::OffBoard;
const E: Cell = Cell::Empty;
const B: Cell = Cell::Occupied(Side::Blue);
const R: Cell = Cell::Occupied(Side::Red);

#[rustfmt::skip]
const INITIAL: [[Cell; COLS]; ROWS] = [
    [O, O, O, O, R, R, R, R],
    [O, O, O, E, R, R, R, R],
    [O, O, E, E, E, R, R, R],
    [O, B, B, E, E, E, R, R],
    [O, B, B, B, E, E, E, O],
    [O, B, B, B, B, E, O, O],
    [O, B, B, B, B, O, O, O],
];

/// The game board.
///
/// A hexagon with four cells per edge, stored in a rectangular grid whose
/// slots outside of the hexagon hold [`Cell::OffBoard`]. Which slots are off
/// board is fixed, only playable cells ever change.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[debug(fmt = "Board({self})")]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// The starting layout, each side clustered on opposite corners.
impl Default for Board {
    fn default() -> Self {
        Board { cells: INITIAL }
    }
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        let mut cells = INITIAL;
        for c in cells.iter_mut().flatten() {
            if c.side().is_some() {
                *c = Cell::Empty;
            }
        }

        Board { cells }
    }

    /// The storage slot of a [`Square`], if within storage bounds.
    fn slot(sq: Square) -> Option<(usize, usize)> {
        let (row, col) = (usize::try_from(sq.row()).ok()?, usize::try_from(sq.col()).ok()?);
        (row < ROWS && col <= ROWS).then_some((row, col))
    }

    /// Whether a [`Square`] is part of the playing area.
    ///
    /// This is the only place where board bounds are checked.
    pub fn contains(&self, sq: Square) -> bool {
        self.get(sq).is_some_and(|c| !c.is_off_board())
    }

    /// The [`Cell`] at a [`Square`], or `None` if outside of storage bounds.
    pub fn get(&self, sq: Square) -> Option<Cell> {
        Board::slot(sq).map(|(r, c)| self.cells[r][c])
    }

    /// A read-only view of the board storage, row by row.
    pub fn cells(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// An iterator over every storage slot, off-board ones included.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Square, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            let sq = move |c| Square::new(r as i8, c as i8);
            row.iter().enumerate().map(move |(c, &cell)| (sq(c), cell))
        })
    }

    /// An iterator over the [`Square`]s occupied by a [`Side`].
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |&(_, c)| c == Cell::Occupied(side))
            .map(|(sq, _)| sq)
    }

    /// The destinations the piece on `whence` may move to.
    ///
    /// All slots are blank unless `whence` holds a piece of `side`.
    pub fn targets(&self, side: Side, whence: Square) -> Targets {
        if self.get(whence) != Some(Cell::Occupied(side)) {
            return Targets::default();
        }

        Targets::new(steps(side).map(|step| {
            let whither = whence.step(step);
            let free = self.contains(whither) && self[whither].is_empty();
            free.then_some(whither)
        }))
    }

    /// An iterator over the legal [`Move`]s of a [`Side`].
    pub fn moves(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        self.pieces(side).flat_map(move |whence| {
            let targets = self.targets(side, whence);
            (0..3).filter_map(move |i| targets[i].map(|whither| Move::new(side, whence, whither)))
        })
    }

    /// The number of legal [`Move`]s of a [`Side`].
    pub fn mobility(&self, side: Side) -> usize {
        self.pieces(side).map(|sq| self.targets(side, sq).len()).sum()
    }

    /// The winner if `side` is the side to move and has no legal move.
    pub fn winner(&self, side: Side) -> Option<Side> {
        (self.mobility(side) == 0).then_some(!side)
    }

    /// Judges a move request without touching the board.
    ///
    /// Exactly one [`Outcome`] is reported, checks are evaluated in order:
    /// quit request, playing area, destination, source, then direction.
    pub fn check(&self, side: Side, whence: Square, whither: Target) -> Outcome {
        let Target::Square(whither) = whither else {
            return Outcome::Quit;
        };

        if !self.contains(whence) || !self.contains(whither) {
            Outcome::OffBoard
        } else if !self[whither].is_empty() {
            Outcome::DestOccupied
        } else if self[whence].is_empty() {
            Outcome::EmptySource
        } else if self[whence] != Cell::Occupied(side) {
            Outcome::BadSide
        } else if !self.targets(side, whence).contains(whither) {
            Outcome::TooFar
        } else {
            Outcome::Ok
        }
    }

    /// Judges a move request and, if legal and `mode` is [`Mode::Real`], applies it.
    ///
    /// The board changes only if the result is [`Outcome::Ok`].
    pub fn play(&mut self, side: Side, whence: Square, whither: Target, mode: Mode) -> Outcome {
        let outcome = self.check(side, whence, whither);

        if let (Outcome::Ok, Mode::Real, Target::Square(whither)) = (outcome, mode, whither) {
            self.set(whither, Cell::Occupied(side));
            self.set(whence, Cell::Empty);
        }

        outcome
    }

    fn set(&mut self, sq: Square, cell: Cell) {
        debug_assert!(self.contains(sq) && !cell.is_off_board());
        if let Some((r, c)) = Board::slot(sq) {
            self.cells[r][c] = cell;
        }
    }
}

/// Retrieves the [`Cell`] at a given [`Square`].
///
/// Panics if the square is outside of storage bounds, see [`Board::get`].
impl Index<Square> for Board {
    type Output = Cell;

    fn index(&self, sq: Square) -> &Self::Output {
        match Board::slot(sq) {
            Some((r, c)) => &self.cells[r][c],
            None => panic!("square `{sq}` is outside of the board storage"),
        }
    }
}

/// Prints the board notation, rows from `A` down joined by `/`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_char('/')?;
            }

            for cell in row {
                f.write_char(cell.symbol())?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing the board notation failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected {} rows", ROWS)]
    InvalidRowCount,
    #[display(fmt = "failed to parse board, expected {} cells per row", COLS)]
    InvalidRowLength,
    #[display(fmt = "failed to parse board, expected one of `.`, `B`, `R` or `-`")]
    InvalidCell,
    #[display(fmt = "failed to parse board, off-board cells do not match the hexagon")]
    InvalidShape,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<_> = s.trim().split('/').collect();
        if rows.len() != ROWS {
            return Err(ParseBoardError::InvalidRowCount);
        }

        let mut cells = INITIAL;
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != COLS {
                return Err(ParseBoardError::InvalidRowLength);
            }

            for (c, symbol) in row.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(ParseBoardError::InvalidCell)?;
                if cell.is_off_board() != INITIAL[r][c].is_off_board() {
                    return Err(ParseBoardError::InvalidShape);
                }

                cells[r][c] = cell;
            }
        }

        Ok(Board { cells })
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let playable = Board::empty().iter().filter(|(_, c)| c.is_empty()).count();
        let cell = prop_oneof![2 => Just(E), 1 => Just(B), 1 => Just(R)];

        proptest::collection::vec(cell, playable)
            .prop_map(|v| {
                let mut board = Board::empty();

                board
                    .cells
                    .iter_mut()
                    .flatten()
                    .filter(|c| c.is_empty())
                    .zip(v)
                    .for_each(|(c, v)| *c = v);

                board
            })
            .boxed()
    }
}
