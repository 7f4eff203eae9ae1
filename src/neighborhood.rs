use crate::{CellState, Direction, MooreNeighbors, NeumannNeighbors, Position, SquareGrid};

/// A `Neighborhood` contains all of your neighbors, which are each in their own `Direction`.
pub trait Neighborhood<T>: std::iter::FromIterator<T> {
    type Direction: Direction;
    type Iter: Iterator<Item = T>;
    type DirIter: Iterator<Item = (Self::Direction, T)>;

    fn new<F: FnMut(Self::Direction) -> T>(dir_map: F) -> Self;

    /// Iterate over all neighbor cells.
    fn iter(self) -> Self::Iter;
    /// Iterate over all neighbor cells with their directions.
    fn dir_iter(self) -> Self::DirIter;
}

pub trait GetNeighbors<'a, Idx, Neighbors> {
    fn get_neighbors(&'a self, index: Idx) -> Neighbors;
}

/// Number of live cells among the 4 orthogonal neighbors, wrapping at the edges.
#[inline]
pub fn count_live_neumann<S: CellState>(grid: &SquareGrid<S>, pos: Position) -> usize {
    let neighbors: NeumannNeighbors<&S> = grid.get_neighbors(pos);
    neighbors.iter().filter(|s| s.is_active()).count()
}

/// Number of live cells among the 8 surrounding neighbors, wrapping at the edges.
#[inline]
pub fn count_live_moore<S: CellState>(grid: &SquareGrid<S>, pos: Position) -> usize {
    let neighbors: MooreNeighbors<&S> = grid.get_neighbors(pos);
    neighbors.iter().filter(|s| s.is_active()).count()
}

/// Moore count plus the cell itself.
#[inline]
pub fn count_live_block<S: CellState>(grid: &SquareGrid<S>, pos: Position) -> usize {
    count_live_moore(grid, pos) + grid.state(pos).is_active() as usize
}
