//! Unconstrained growth: a cell turns on if it or any cell in its neighborhood is on.

use crate::{BoolState, Cell, CellState, Context, Rule, SquareGrid};

/// OR over `offsets` and the cell itself.
fn grow<'n>(
    offsets: &[(isize, isize)],
    grid: &SquareGrid<BoolState>,
    cell: &Cell<BoolState>,
    next: &'n mut BoolState,
) -> &'n BoolState {
    let pos = cell.position();
    let n = offsets
        .iter()
        .filter(|&&delta| grid.state(grid.offset(pos, delta)).is_active())
        .count();
    let current = cell.state();
    next.follow(current, current.value() || n > 0, n as u8)
}

/// Grows diamonds: the von Neumann neighborhood.
#[derive(Copy, Clone, Debug, Default)]
pub struct Diamonds;

/// Grows squares: the Moore neighborhood.
#[derive(Copy, Clone, Debug, Default)]
pub struct Squares;

/// Grows downward-pointing triangles: north, east and west neighbors only.
#[derive(Copy, Clone, Debug, Default)]
pub struct Triangles;

const NEUMANN: [(isize, isize); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];
const MOORE: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const TRIANGLE: [(isize, isize); 3] = [(1, 0), (0, -1), (-1, 0)];

impl Rule<BoolState> for Diamonds {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        grow(&NEUMANN, grid, cell, next)
    }
}

impl Rule<BoolState> for Squares {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        grow(&MOORE, grid, cell, next)
    }
}

impl Rule<BoolState> for Triangles {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        grow(&TRIANGLE, grid, cell, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::step;

    #[test]
    fn diamond_from_single_seed() {
        let mut grid = SquareGrid::from_active(5, 5, vec![(2, 2)]);
        step(&mut grid, Diamonds);
        assert_eq!(
            grid.active_positions(),
            vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]
        );
    }

    #[test]
    fn square_from_single_seed() {
        let mut grid = SquareGrid::from_active(7, 7, vec![(3, 3)]);
        step(&mut grid, Squares);
        step(&mut grid, Squares);
        assert_eq!(grid.live_count(), 25);
        assert!(grid.get_cell(1, 1).state().value());
        assert!(!grid.get_cell(0, 3).state().value());
    }

    #[test]
    fn triangle_from_single_seed() {
        let mut grid = SquareGrid::from_active(9, 9, vec![(4, 0)]);
        step(&mut grid, Triangles);
        step(&mut grid, Triangles);
        // The top row widens by one on each side per generation; each row below is two narrower.
        assert_eq!(
            grid.active_positions(),
            vec![
                (2, 0),
                (3, 0),
                (4, 0),
                (5, 0),
                (6, 0),
                (3, 1),
                (4, 1),
                (5, 1),
                (4, 2)
            ]
        );
    }

    #[test]
    fn growth_wraps() {
        let mut grid = SquareGrid::from_active(4, 4, vec![(0, 0)]);
        step(&mut grid, Diamonds);
        assert!(grid.get_cell(3, 0).state().value());
        assert!(grid.get_cell(0, 3).state().value());
    }
}
