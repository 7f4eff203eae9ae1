use crate::{count_live_moore, BoolState, Cell, Context, Rule, SquareGrid};

/// Turns on with 3, 7 or 8 live neighbors and otherwise keeps its value, so it never turns off.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lichens;

impl Rule<BoolState> for Lichens {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let current = cell.state();
        let n = count_live_moore(grid, cell.position());
        let value = matches!(n, 3 | 7 | 8) || current.value();
        next.follow(current, value, n as u8)
    }
}

/// Turns on with exactly one live neighbor and otherwise keeps its value.
#[derive(Copy, Clone, Debug, Default)]
pub struct OneOutOfEight;

impl Rule<BoolState> for OneOutOfEight {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let current = cell.state();
        let n = count_live_moore(grid, cell.position());
        next.follow(current, n == 1 || current.value(), n as u8)
    }
}
