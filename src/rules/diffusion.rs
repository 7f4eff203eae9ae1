//! Random-walk movement of live cells.
//!
//! Every cell picks one orthogonal direction per generation from its own stream. In
//! [`DiffusionMode::Copy`] it simply adopts the value found there. In
//! [`DiffusionMode::Handshake`] two neighbors exchange values only when each picked the
//! other and exactly one of them is live, so a live cell either gives itself to an empty
//! neighbor or an empty cell takes from a live one, never both, and the population is
//! conserved.

use crate::{
    count_live_neumann, BoolState, Cell, Context, Direction, NeumannDirection, Position, Rule,
    SquareGrid,
};
use enum_iterator::IntoEnumIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiffusionMode {
    Copy,
    Handshake,
}

impl Default for DiffusionMode {
    fn default() -> Self {
        DiffusionMode::Handshake
    }
}

/// Diffusion of anonymous particles.
///
/// With `partitioned` set the grid is cut into 3x3 equal blocks and nothing moves
/// between blocks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveDiffusion {
    pub mode: DiffusionMode,
    pub partitioned: bool,
}

/// Diffusion of species-tagged particles that exclude one another.
///
/// A move between two cells is allowed only when one of them is untagged or both carry
/// the same species. The receiving cell adopts the partner's species tag, while a cell
/// given an untagged value keeps its own, so every species leaves a trail of territory
/// the others cannot enter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneticDrift {
    pub mode: DiffusionMode,
    pub partitioned: bool,
}

impl NaiveDiffusion {
    pub fn new(mode: DiffusionMode, partitioned: bool) -> Self {
        NaiveDiffusion { mode, partitioned }
    }
}

impl GeneticDrift {
    pub fn new(mode: DiffusionMode, partitioned: bool) -> Self {
        GeneticDrift { mode, partitioned }
    }
}

/// Which of the 3x3 blocks `pos` falls in.
#[inline]
fn block<S>(grid: &SquareGrid<S>, pos: Position) -> (usize, usize) {
    (pos.x() * 3 / grid.width(), pos.y() * 3 / grid.height())
}

#[inline]
fn compatible(a: &BoolState, b: &BoolState) -> bool {
    a.species() == 0 || b.species() == 0 || a.species() == b.species()
}

#[inline]
fn heading(ctx: &Context, pos: Position) -> NeumannDirection {
    ctx.direction(pos)
}

fn diffuse<'n>(
    mode: DiffusionMode,
    partitioned: bool,
    tagged: bool,
    ctx: &Context,
    grid: &SquareGrid<BoolState>,
    cell: &Cell<BoolState>,
    next: &'n mut BoolState,
) -> &'n BoolState {
    let pos = cell.position();
    let current = cell.state();
    let dir = heading(ctx, pos);
    let target = grid.offset(pos, dir.delta());
    let other = grid.state(target);

    let allowed = target != pos
        && (!partitioned || block(grid, pos) == block(grid, target))
        && (!tagged || compatible(current, other));
    let moved = allowed
        && match mode {
            DiffusionMode::Copy => true,
            DiffusionMode::Handshake => {
                current.value() != other.value() && heading(ctx, target) == dir.inv()
            }
        };

    let n = count_live_neumann(grid, pos) as u8;
    if !moved {
        return next.follow(current, current.value(), n);
    }
    next.follow(current, other.value(), n);
    if tagged && other.species() != 0 {
        next.set_species(other.species());
    }
    next
}

impl Rule<BoolState> for NaiveDiffusion {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        diffuse(self.mode, self.partitioned, false, ctx, grid, cell, next)
    }
}

impl Rule<BoolState> for GeneticDrift {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        diffuse(self.mode, self.partitioned, true, ctx, grid, cell, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::step_seeded;

    fn scattered(width: usize, height: usize) -> Vec<(usize, usize)> {
        (0..width * height)
            .filter(|i| i % 5 == 0 || i % 7 == 0)
            .map(|i| (i % width, i / width))
            .collect()
    }

    #[test]
    fn handshake_conserves_population() {
        let mut grid = SquareGrid::from_active(12, 10, scattered(12, 10));
        let live = grid.live_count();
        let before = grid.active_positions();
        for generation in 0..30 {
            step_seeded(&mut grid, NaiveDiffusion::default(), 4, generation);
            assert_eq!(grid.live_count(), live);
        }
        assert_ne!(grid.active_positions(), before);
    }

    #[test]
    fn copy_adopts_the_chosen_neighbor() {
        let grid = SquareGrid::from_active(6, 6, scattered(6, 6));
        let mut stepped = grid.clone();
        step_seeded(
            &mut stepped,
            NaiveDiffusion::new(DiffusionMode::Copy, false),
            8,
            2,
        );
        let ctx = Context::new(8, 2);
        for cell in grid.cells() {
            let pos = cell.position();
            let source = grid.offset(pos, heading(&ctx, pos).delta());
            assert_eq!(
                stepped.state(pos).value(),
                grid.state(source).value(),
                "{:?}",
                pos
            );
        }
    }

    #[test]
    fn partitions_hold_particles() {
        let corner: Vec<_> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let mut grid = SquareGrid::from_active(9, 9, corner.into_iter().step_by(2));
        let live = grid.live_count();
        for generation in 0..40 {
            step_seeded(
                &mut grid,
                NaiveDiffusion::new(DiffusionMode::Handshake, true),
                6,
                generation,
            );
        }
        assert_eq!(grid.live_count(), live);
        assert!(grid.active_positions().iter().all(|&(x, y)| x < 3 && y < 3));
    }

    #[test]
    fn drift_conserves_each_species() {
        let mut grid: SquareGrid<BoolState> = SquareGrid::new(10, 10);
        for (i, (x, y)) in scattered(10, 10).into_iter().enumerate() {
            let species = (i % 2) as u32 + 1;
            grid.set_state(Position::new(x, y), BoolState::with_species(true, species));
        }
        let counts = grid.species_counts();
        for generation in 0..25 {
            step_seeded(&mut grid, GeneticDrift::default(), 12, generation);
        }
        assert_eq!(grid.species_counts(), counts);
    }

    #[test]
    fn incompatible_species_do_not_mix() {
        // An empty cell tagged 2 next to a live cell of species 1: with copy mode and both
        // cells looking at each other, nothing may move.
        let mut grid: SquareGrid<BoolState> = SquareGrid::new(2, 1);
        grid.set_state(Position::new(0, 0), BoolState::with_species(true, 1));
        grid.set_state(Position::new(1, 0), BoolState::with_species(false, 2));
        for generation in 0..10 {
            step_seeded(
                &mut grid,
                GeneticDrift::new(DiffusionMode::Copy, false),
                1,
                generation,
            );
            assert!(grid.get_cell(0, 0).state().value());
            assert!(!grid.get_cell(1, 0).state().value());
        }
    }
}
