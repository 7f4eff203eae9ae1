#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate on the grid. `x` grows to the right and `y` grows downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    #[inline]
    pub fn x(self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(self) -> usize {
        self.y
    }

    /// Offset this position on a `width`x`height` torus.
    ///
    /// Both edges wrap to the opposite edge, so every position has a full neighborhood.
    #[inline]
    pub fn wrapped(self, delta: (isize, isize), width: usize, height: usize) -> Self {
        Position {
            x: wrap(self.x, delta.0, width),
            y: wrap(self.y, delta.1, height),
        }
    }
}

impl From<(usize, usize)> for Position {
    #[inline]
    fn from((x, y): (usize, usize)) -> Self {
        Position { x, y }
    }
}

/// `((coord + delta) mod dim + dim) mod dim`, without overflow for any delta.
#[inline]
pub fn wrap(coord: usize, delta: isize, dim: usize) -> usize {
    let dim = dim as isize;
    (coord as isize + delta % dim).rem_euclid(dim) as usize
}
