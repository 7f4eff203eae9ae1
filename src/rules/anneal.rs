use crate::{count_live_block, BoolState, Cell, Context, Error, Result, Rule, SquareGrid};
use rand::Rng;

#[inline]
fn anneal(sum: usize) -> bool {
    sum == 4 || sum >= 6
}

/// Twisted majority over the 3x3 block: on when 4 or at least 6 of the 9 are on.
///
/// Swapping the outcomes of 4 and 5 destabilizes flat fronts less than curved ones, so
/// domains straighten their boundaries over time.
#[derive(Copy, Clone, Debug, Default)]
pub struct Anneal;

impl Rule<BoolState> for Anneal {
    fn apply<'n>(
        &self,
        _: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let sum = count_live_block(grid, cell.position());
        next.follow(cell.state(), anneal(sum), sum as u8)
    }
}

/// Anneal with thermal noise at domain boundaries.
///
/// Clear majorities (at most 3 or at least 6 of 9) behave as in [`Anneal`]. A cell whose
/// block sums to 4 or 5 sits on a boundary, and its annealed result is inverted with
/// probability `temperature`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomAnneal {
    temperature: f64,
}

impl RandomAnneal {
    pub const DEFAULT_TEMPERATURE: f64 = 0.5;

    pub fn new(temperature: f64) -> Result<Self> {
        Ok(RandomAnneal {
            temperature: Error::check_probability("temperature", temperature)?,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Default for RandomAnneal {
    fn default() -> Self {
        RandomAnneal {
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }
}

impl Rule<BoolState> for RandomAnneal {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let sum = count_live_block(grid, cell.position());
        let mut value = anneal(sum);
        if (4..=5).contains(&sum) && ctx.rng(cell.position()).random_bool(self.temperature) {
            value = !value;
        }
        next.follow(cell.state(), value, sum as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{step, step_seeded};

    #[test]
    fn anneal_table() {
        let expected = [false, false, false, false, true, false, true, true, true, true];
        for (sum, &on) in expected.iter().enumerate() {
            assert_eq!(anneal(sum), on, "sum {}", sum);
        }
    }

    #[test]
    fn lone_cell_dies_and_solid_block_survives() {
        let mut grid = SquareGrid::from_active(6, 6, vec![(1, 1)]);
        step(&mut grid, Anneal);
        assert_eq!(grid.live_count(), 0);

        let block: Vec<_> = (1..4).flat_map(|y| (1..4).map(move |x| (x, y))).collect();
        let mut grid = SquareGrid::from_active(7, 7, block);
        step(&mut grid, Anneal);
        assert!(grid.get_cell(2, 2).state().value());
        assert_eq!(grid.get_cell(2, 2).state().live_sum(), 9);
    }

    #[test]
    fn zero_temperature_matches_anneal() {
        let live: Vec<_> = (0..40).map(|i| ((i * 7) % 10, (i * 3) % 10)).collect();
        let mut cold = SquareGrid::from_active(10, 10, live.clone());
        let mut plain = SquareGrid::from_active(10, 10, live);
        step_seeded(&mut cold, RandomAnneal::new(0.0).unwrap(), 9, 0);
        step(&mut plain, Anneal);
        assert_eq!(cold.active_positions(), plain.active_positions());
    }

    #[test]
    fn full_temperature_inverts_boundaries_only() {
        let live: Vec<_> = (0..40).map(|i| ((i * 7) % 10, (i * 3) % 10)).collect();
        let mut hot = SquareGrid::from_active(10, 10, live.clone());
        let mut plain = SquareGrid::from_active(10, 10, live);
        step_seeded(&mut hot, RandomAnneal::new(1.0).unwrap(), 9, 0);
        step(&mut plain, Anneal);
        for (h, p) in hot.cells().iter().zip(plain.cells()) {
            let sum = p.state().live_sum();
            let flipped = h.state().value() != p.state().value();
            assert_eq!(flipped, sum == 4 || sum == 5);
        }
    }
}
