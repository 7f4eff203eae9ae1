use crate::{CellState, GetNeighbors, Neighborhood, Position, SquareGrid};
use enum_iterator::IntoEnumIterator;
use std::iter::{once, Chain, Once};
use std::ops::{Index, IndexMut};
use MooreDirection::*;

/// The eight surrounding directions, counter-clockwise from `Right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum MooreDirection {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl crate::Direction for MooreDirection {
    type Directions = <MooreDirection as IntoEnumIterator>::Iterator;

    #[inline]
    fn inv(self) -> MooreDirection {
        match self {
            Right => Left,
            UpRight => DownLeft,
            Up => Down,
            UpLeft => DownRight,
            Left => Right,
            DownLeft => UpRight,
            Down => Up,
            DownRight => UpLeft,
        }
    }

    #[inline]
    fn directions() -> Self::Directions {
        MooreDirection::into_enum_iter()
    }

    #[inline]
    fn delta(self) -> (isize, isize) {
        match self {
            Right => (1, 0),
            UpRight => (1, -1),
            Up => (0, -1),
            UpLeft => (-1, -1),
            Left => (-1, 0),
            DownLeft => (-1, 1),
            Down => (0, 1),
            DownRight => (1, 1),
        }
    }
}

impl MooreDirection {
    /// Whether the direction has an upward component.
    #[inline]
    pub fn is_north(self) -> bool {
        matches!(self, UpRight | Up | UpLeft)
    }

    #[inline]
    pub fn is_south(self) -> bool {
        matches!(self, DownLeft | Down | DownRight)
    }

    #[inline]
    pub fn is_west(self) -> bool {
        matches!(self, UpLeft | Left | DownLeft)
    }

    #[inline]
    pub fn is_east(self) -> bool {
        matches!(self, DownRight | Right | UpRight)
    }
}

impl From<usize> for MooreDirection {
    fn from(n: usize) -> Self {
        match n {
            0 => Right,
            1 => UpRight,
            2 => Up,
            3 => UpLeft,
            4 => Left,
            5 => DownLeft,
            6 => Down,
            7 => DownRight,
            _ => panic!("invalid integer conversion to MooreDirection"),
        }
    }
}

impl From<MooreDirection> for usize {
    fn from(dir: MooreDirection) -> usize {
        match dir {
            Right => 0,
            UpRight => 1,
            Up => 2,
            UpLeft => 3,
            Left => 4,
            DownLeft => 5,
            Down => 6,
            DownRight => 7,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MooreNeighbors<T> {
    pub right: T,
    pub up_right: T,
    pub up: T,
    pub up_left: T,
    pub left: T,
    pub down_left: T,
    pub down: T,
    pub down_right: T,
}

impl<T> Index<MooreDirection> for MooreNeighbors<T> {
    type Output = T;
    #[inline]
    fn index(&self, ix: MooreDirection) -> &T {
        match ix {
            Right => &self.right,
            UpRight => &self.up_right,
            Up => &self.up,
            UpLeft => &self.up_left,
            Left => &self.left,
            DownLeft => &self.down_left,
            Down => &self.down,
            DownRight => &self.down_right,
        }
    }
}

impl<T> IndexMut<MooreDirection> for MooreNeighbors<T> {
    #[inline]
    fn index_mut(&mut self, ix: MooreDirection) -> &mut T {
        match ix {
            Right => &mut self.right,
            UpRight => &mut self.up_right,
            Up => &mut self.up,
            UpLeft => &mut self.up_left,
            Left => &mut self.left,
            DownLeft => &mut self.down_left,
            Down => &mut self.down,
            DownRight => &mut self.down_right,
        }
    }
}

impl<T> std::iter::FromIterator<T> for MooreNeighbors<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut next = || {
            iter.next()
                .expect("MooreNeighbors::from_iter: iterator yielded fewer than 8 items")
        };
        MooreNeighbors {
            right: next(),
            up_right: next(),
            up: next(),
            up_left: next(),
            left: next(),
            down_left: next(),
            down: next(),
            down_right: next(),
        }
    }
}

type NeighborhoodIter<T> = Chain<
    Chain<
        Chain<Chain<Chain<Chain<Chain<Once<T>, Once<T>>, Once<T>>, Once<T>>, Once<T>>, Once<T>>,
        Once<T>,
    >,
    Once<T>,
>;

impl<T> Neighborhood<T> for MooreNeighbors<T> {
    type Direction = MooreDirection;
    type Iter = NeighborhoodIter<T>;
    type DirIter = NeighborhoodIter<(MooreDirection, T)>;

    #[inline]
    fn new<F: FnMut(MooreDirection) -> T>(mut f: F) -> MooreNeighbors<T> {
        MooreNeighbors {
            right: f(Right),
            up_right: f(UpRight),
            up: f(Up),
            up_left: f(UpLeft),
            left: f(Left),
            down_left: f(DownLeft),
            down: f(Down),
            down_right: f(DownRight),
        }
    }

    #[inline]
    fn iter(self) -> Self::Iter {
        once(self.right)
            .chain(once(self.up_right))
            .chain(once(self.up))
            .chain(once(self.up_left))
            .chain(once(self.left))
            .chain(once(self.down_left))
            .chain(once(self.down))
            .chain(once(self.down_right))
    }

    #[inline]
    fn dir_iter(self) -> Self::DirIter {
        once((Right, self.right))
            .chain(once((UpRight, self.up_right)))
            .chain(once((Up, self.up)))
            .chain(once((UpLeft, self.up_left)))
            .chain(once((Left, self.left)))
            .chain(once((DownLeft, self.down_left)))
            .chain(once((Down, self.down)))
            .chain(once((DownRight, self.down_right)))
    }
}

impl<'a, T> From<MooreNeighbors<&'a T>> for MooreNeighbors<T>
where
    T: Clone,
{
    #[inline]
    fn from(f: MooreNeighbors<&'a T>) -> Self {
        MooreNeighbors::new(|dir| f[dir].clone())
    }
}

impl<'a, S: CellState> GetNeighbors<'a, Position, MooreNeighbors<&'a S>> for SquareGrid<S> {
    #[inline]
    fn get_neighbors(&'a self, pos: Position) -> MooreNeighbors<&'a S> {
        use crate::Direction;
        MooreNeighbors::new(|dir| self.state(self.offset(pos, dir.delta())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    #[test]
    fn inverse_negates_delta() {
        for dir in MooreDirection::directions() {
            let (dx, dy) = dir.delta();
            assert_eq!(dir.inv().delta(), (-dx, -dy));
            let back: usize = dir.into();
            assert_eq!(MooreDirection::from(back), dir);
        }
    }

    #[test]
    fn sides_share_corners() {
        let north = MooreDirection::directions().filter(|d| d.is_north()).count();
        let west = MooreDirection::directions().filter(|d| d.is_west()).count();
        assert_eq!(north, 3);
        assert_eq!(west, 3);
        assert!(UpLeft.is_north() && UpLeft.is_west());
    }
}
