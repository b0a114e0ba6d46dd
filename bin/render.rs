use derive_more::{Constructor, Deref};
use lib::hex::{Board, Side, Square, COLS, ROWS};
use std::fmt::{self, Display};

const INDENT: usize = 5;

/// Renders a [`Board`] as a hexagon, one diagonal per line.
///
/// Every playable cell is printed as its label followed by its symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Constructor, Deref)]
pub struct Diagram(Board);

impl Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = (ROWS as i8, COLS as i8);

        for diagonal in (1 - cols..cols).rev() {
            let cells: Vec<_> = (0..rows)
                .map(|row| Square::new(row, diagonal + row))
                .filter_map(|sq| Some((sq, self.get(sq)?)))
                .filter(|(_, cell)| !cell.is_off_board())
                .collect();

            if cells.is_empty() {
                continue;
            }

            let indent = INDENT.saturating_sub(cells.len()) * 3;
            write!(f, "{:indent$}", "")?;

            for (i, (sq, cell)) in cells.iter().enumerate() {
                if i > 0 {
                    write!(f, "   ")?;
                }

                write!(f, "{}{}", sq, cell.symbol())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// The final word on a game, given its winner and the number of accepted moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
pub struct Verdict {
    winner: Option<Side>,
    plies: usize,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = self.plies / 2;
        match self.winner {
            Some(w) => write!(f, "victory of the {} side ({moves} full moves)", w.name()),
            None => write!(f, "no winner ({moves} full moves)"),
        }
    }
}
