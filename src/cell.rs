use crate::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One site of the grid: a fixed position and the state currently visible there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell<S> {
    position: Position,
    state: S,
}

impl<S> Cell<S> {
    #[inline]
    pub fn new(position: Position, state: S) -> Self {
        Cell { position, state }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Replace the state wholesale, returning the old one.
    #[inline]
    pub fn replace_state(&mut self, state: S) -> S {
        std::mem::replace(&mut self.state, state)
    }
}
