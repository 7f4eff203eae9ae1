use crate::{count_live_moore, BoolState, Cell, Context, Rule, SquareGrid};

/// Conway's Game of Life (B3/S23). The echo keeps the previous value for rendering.
#[derive(Copy, Clone, Debug, Default)]
pub struct GameOfLife;

impl Rule<BoolState> for GameOfLife {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let current = cell.state();
        let n = count_live_moore(grid, cell.position());
        let value = if current.value() {
            (2..=3).contains(&n)
        } else {
            n == 3
        };
        next.follow(current, value, n as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::step;

    #[test]
    fn blinker() {
        let mut grid = SquareGrid::from_active(5, 5, (1..=3).map(|x| (x, 2)));
        step(&mut grid, GameOfLife);
        assert_eq!(grid.active_positions(), vec![(2, 1), (2, 2), (2, 3)]);
        let center = grid.get_cell(2, 2).state();
        assert!(center.echo());
        assert_eq!(center.live_sum(), 2);
        assert!(!grid.get_cell(1, 2).state().value());
        assert!(grid.get_cell(1, 2).state().echo());
        step(&mut grid, GameOfLife);
        assert_eq!(grid.active_positions(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn block_wraps_across_corner() {
        let corners = vec![(0, 0), (3, 0), (0, 3), (3, 3)];
        let mut grid = SquareGrid::from_active(4, 4, corners.clone());
        step(&mut grid, GameOfLife);
        assert_eq!(grid.active_positions(), corners);
    }
}
