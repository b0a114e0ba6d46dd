use crate::hex::{Side, Square};
use derive_more::{Constructor, DebugCustom, Deref, Display};
use serde::{Deserialize, Serialize};

/// The advance steps of [`Side::Red`] as (rows, columns).
///
/// These are the unit vectors at 90°, 135° and 180°, rounded to the grid.
const ADVANCE: [(i8, i8); 3] = [(1, 0), (1, -1), (0, -1)];

/// The three directions a piece of `side` may step in.
///
/// Sides only ever advance toward each other, never backward.
pub fn steps(side: Side) -> [(i8, i8); 3] {
    let o = side.orientation();
    ADVANCE.map(|(r, c)| (r * o, c * o))
}

/// A piece of some [`Side`] stepping from one [`Square`] to another.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Move({self})")]
#[display(fmt = "{}:{}->{}", side, whence, whither)]
pub struct Move {
    pub side: Side,
    pub whence: Square,
    pub whither: Square,
}

/// The destinations reachable by one piece, one slot per direction.
///
/// A blank slot means there is no move in that direction, either because it
/// leads off the board or because the cell there is not empty.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Deref)]
pub struct Targets([Option<Square>; 3]);

impl Targets {
    pub(crate) fn new(slots: [Option<Square>; 3]) -> Self {
        Targets(slots)
    }

    /// An iterator over the non-blank slots.
    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.0.iter().flatten().copied()
    }

    /// The number of non-blank slots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether every slot is blank.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `sq` is one of the non-blank slots.
    pub fn contains(&self, sq: Square) -> bool {
        self.iter().any(|t| t == sq)
    }
}
