use crate::{BoolState, Cell, Context, GetNeighbors, MooreNeighbors, Neighborhood, Rule, SquareGrid};
use rand::Rng;

/// Whether a live cell is supported on all four sides.
///
/// The north group is the three cells above, the south group the three below, and the
/// west and east groups the three columns either side. Corners belong to two groups.
fn supported(grid: &SquareGrid<BoolState>, cell: &Cell<BoolState>) -> (bool, usize) {
    let neighbors: MooreNeighbors<&BoolState> = grid.get_neighbors(cell.position());
    let (mut north, mut south, mut west, mut east, mut n) = (false, false, false, false, 0);
    for (dir, _) in neighbors.dir_iter().filter(|(_, s)| s.value()) {
        north |= dir.is_north();
        south |= dir.is_south();
        west |= dir.is_west();
        east |= dir.is_east();
        n += 1;
    }
    (north && south && west && east, n)
}

#[inline]
fn erode<'n>(
    grid: &SquareGrid<BoolState>,
    cell: &Cell<BoolState>,
    next: &'n mut BoolState,
) -> &'n BoolState {
    let current = cell.state();
    let (held, n) = supported(grid, cell);
    next.follow(current, current.value() && held, n as u8)
}

/// Live cells survive only while supported on every side. Dead cells stay dead.
#[derive(Copy, Clone, Debug, Default)]
pub struct SoilErosion;

impl Rule<BoolState> for SoilErosion {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        erode(grid, cell, next)
    }
}

/// [`SoilErosion`] applied to each cell with probability 1/512 per generation, emulating
/// asynchronous update. Cells that are not picked keep their state.
#[derive(Copy, Clone, Debug, Default)]
pub struct SoilErosionRandom;

impl SoilErosionRandom {
    pub const UPDATE_RATIO: (u32, u32) = (1, 512);
}

impl Rule<BoolState> for SoilErosionRandom {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let (num, den) = Self::UPDATE_RATIO;
        if ctx.rng(cell.position()).random_ratio(num, den) {
            erode(grid, cell, next)
        } else {
            let current = cell.state();
            next.follow(current, current.value(), current.live_sum())
        }
    }
}
