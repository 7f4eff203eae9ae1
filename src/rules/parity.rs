use crate::{count_live_neumann, BoolState, Cell, Context, Rule, SquareGrid};

#[inline]
fn parity(grid: &SquareGrid<BoolState>, cell: &Cell<BoolState>) -> (bool, usize) {
    let n = count_live_neumann(grid, cell.position());
    ((n + cell.state().value() as usize) % 2 == 1, n)
}

/// XOR of the cell and its four orthogonal neighbors.
#[derive(Copy, Clone, Debug, Default)]
pub struct Parity;

impl Rule<BoolState> for Parity {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let (odd, n) = parity(grid, cell);
        next.follow(cell.state(), odd, n as u8)
    }
}

/// Second-order parity: the parity result XORed with the value one generation back.
///
/// The echo holds the previous result, so running the rule with the value and echo
/// swapped retraces the history.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParityFlip;

impl Rule<BoolState> for ParityFlip {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let (odd, n) = parity(grid, cell);
        let current = cell.state();
        next.follow(current, odd ^ current.echo(), n as u8)
    }
}
