use crate::{CellState, Direction, GetNeighbors, Neighborhood, Position, SquareGrid};
use enum_iterator::IntoEnumIterator;
use std::iter::{once, Chain, Once};
use std::ops::{Index, IndexMut};
use NeumannDirection::*;

/// The four orthogonal directions, counter-clockwise from `Right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum NeumannDirection {
    Right,
    Up,
    Left,
    Down,
}

impl Direction for NeumannDirection {
    type Directions = <NeumannDirection as IntoEnumIterator>::Iterator;

    #[inline]
    fn directions() -> Self::Directions {
        NeumannDirection::into_enum_iter()
    }

    #[inline]
    fn delta(self) -> (isize, isize) {
        match self {
            Right => (1, 0),
            Up => (0, -1),
            Left => (-1, 0),
            Down => (0, 1),
        }
    }
}

impl NeumannDirection {
    /// Whether `self` and `other` lie on the same axis.
    #[inline]
    pub fn collinear(self, other: Self) -> bool {
        self == other || self.inv() == other
    }
}

impl From<usize> for NeumannDirection {
    fn from(n: usize) -> Self {
        match n {
            0 => Right,
            1 => Up,
            2 => Left,
            3 => Down,
            _ => panic!("invalid integer conversion to NeumannDirection"),
        }
    }
}

impl From<NeumannDirection> for usize {
    fn from(dir: NeumannDirection) -> usize {
        match dir {
            Right => 0,
            Up => 1,
            Left => 2,
            Down => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NeumannNeighbors<T> {
    pub right: T,
    pub up: T,
    pub left: T,
    pub down: T,
}

impl<T> NeumannNeighbors<T> {
    pub fn as_ref(&self) -> NeumannNeighbors<&T> {
        NeumannNeighbors {
            right: &self.right,
            up: &self.up,
            left: &self.left,
            down: &self.down,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> NeumannNeighbors<U> {
        NeumannNeighbors {
            right: f(self.right),
            up: f(self.up),
            left: f(self.left),
            down: f(self.down),
        }
    }
}

impl<T> std::iter::FromIterator<T> for NeumannNeighbors<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut next = || {
            iter.next()
                .expect("NeumannNeighbors::from_iter: iterator yielded fewer than 4 items")
        };
        Self {
            right: next(),
            up: next(),
            left: next(),
            down: next(),
        }
    }
}

impl<T> Index<NeumannDirection> for NeumannNeighbors<T> {
    type Output = T;
    #[inline]
    fn index(&self, ix: NeumannDirection) -> &T {
        match ix {
            Right => &self.right,
            Up => &self.up,
            Left => &self.left,
            Down => &self.down,
        }
    }
}

impl<T> IndexMut<NeumannDirection> for NeumannNeighbors<T> {
    #[inline]
    fn index_mut(&mut self, ix: NeumannDirection) -> &mut T {
        match ix {
            Right => &mut self.right,
            Up => &mut self.up,
            Left => &mut self.left,
            Down => &mut self.down,
        }
    }
}

type NeighborhoodIter<T> = Chain<Chain<Chain<Once<T>, Once<T>>, Once<T>>, Once<T>>;

impl<T> Neighborhood<T> for NeumannNeighbors<T> {
    type Direction = NeumannDirection;
    type Iter = NeighborhoodIter<T>;
    type DirIter = NeighborhoodIter<(NeumannDirection, T)>;

    #[inline]
    fn new<F: FnMut(NeumannDirection) -> T>(mut f: F) -> NeumannNeighbors<T> {
        Self {
            right: f(Right),
            up: f(Up),
            left: f(Left),
            down: f(Down),
        }
    }

    #[inline]
    fn iter(self) -> Self::Iter {
        once(self.right)
            .chain(once(self.up))
            .chain(once(self.left))
            .chain(once(self.down))
    }

    #[inline]
    fn dir_iter(self) -> Self::DirIter {
        once((Right, self.right))
            .chain(once((Up, self.up)))
            .chain(once((Left, self.left)))
            .chain(once((Down, self.down)))
    }
}

impl<'a, T> From<NeumannNeighbors<&'a T>> for NeumannNeighbors<T>
where
    T: Clone,
{
    #[inline]
    fn from(f: NeumannNeighbors<&'a T>) -> Self {
        Self::new(|dir| f[dir].clone())
    }
}

impl<'a, S: CellState> GetNeighbors<'a, Position, NeumannNeighbors<&'a S>> for SquareGrid<S> {
    #[inline]
    fn get_neighbors(&'a self, pos: Position) -> NeumannNeighbors<&'a S> {
        NeumannNeighbors::new(|dir| self.state(self.offset(pos, dir.delta())))
    }
}
