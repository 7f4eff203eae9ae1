use crate::{BoolState, Cell, Context, GetNeighbors, Neighborhood, NeumannNeighbors, Rule, SquareGrid};

/// Fills pockets and erases corners on the von Neumann neighborhood.
///
/// With two live neighbors the cell is on exactly when they are opposite each other
/// (north and south, or east and west). With three or more it is forced on, and with
/// fewer than two it keeps its value.
#[derive(Copy, Clone, Debug, Default)]
pub struct Banks;

impl Rule<BoolState> for Banks {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let current = cell.state();
        let neighbors: NeumannNeighbors<&BoolState> = grid.get_neighbors(cell.position());
        let mut live = neighbors
            .dir_iter()
            .filter(|(_, s)| s.value())
            .map(|(dir, _)| dir);
        let n = live.clone().count();
        let value = match n {
            0 | 1 => current.value(),
            2 => match (live.next(), live.next()) {
                (Some(a), Some(b)) => a.collinear(b),
                _ => current.value(),
            },
            _ => true,
        };
        next.follow(current, value, n as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::step;

    #[test]
    fn fills_straight_gaps() {
        let mut grid = SquareGrid::from_active(5, 5, vec![(1, 2), (3, 2)]);
        step(&mut grid, Banks);
        assert!(grid.get_cell(2, 2).state().value());
    }

    #[test]
    fn erases_corners() {
        // (2, 2) is live with live neighbors to the east and south: a convex corner.
        let mut grid = SquareGrid::from_active(6, 6, vec![(2, 2), (3, 2), (2, 3)]);
        step(&mut grid, Banks);
        assert!(!grid.get_cell(2, 2).state().value());
        // (3, 3) sits in the pocket with two corner neighbors and stays off.
        assert!(!grid.get_cell(3, 3).state().value());
    }

    #[test]
    fn forced_on_with_three() {
        let mut grid = SquareGrid::from_active(5, 5, vec![(1, 2), (3, 2), (2, 1)]);
        step(&mut grid, Banks);
        assert!(grid.get_cell(2, 2).state().value());
        assert_eq!(grid.get_cell(2, 2).state().live_sum(), 3);
    }

    #[test]
    fn sparse_cells_keep_value() {
        let mut grid = SquareGrid::from_active(5, 5, vec![(0, 0)]);
        step(&mut grid, Banks);
        assert_eq!(grid.active_positions(), vec![(0, 0)]);
    }
}
