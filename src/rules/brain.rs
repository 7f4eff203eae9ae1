use crate::{count_live_neumann, BrainState, Cell, Context, Rule, SquareGrid};

/// Brian's Brain on the von Neumann neighborhood.
///
/// A ready cell fires when exactly two orthogonal neighbors are firing, a firing cell
/// becomes refractory, and a refractory cell becomes ready again.
#[derive(Copy, Clone, Debug, Default)]
pub struct BriansBrain;

impl Rule<BrainState> for BriansBrain {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BrainState>,
        cell: &Cell<BrainState>,
        next: &'n mut BrainState,
    ) -> &'n BrainState {
        let phase = cell.state().phase();
        let firing = count_live_neumann(grid, cell.position());
        next.set(phase.advance(firing == 2), phase)
    }
}
