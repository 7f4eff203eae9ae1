use crate::{BoolState, Cell, Context, Rule, SquareGrid};
use rand::Rng;

/// Each live cell goes out with probability 1/32 per generation, independently.
#[derive(Copy, Clone, Debug, Default)]
pub struct CandleRain;

impl CandleRain {
    pub const EXTINGUISH_RATIO: (u32, u32) = (1, 32);
}

impl Rule<BoolState> for CandleRain {
    fn apply<'n>(
        &self,
        ctx: &Context,
        _: &SquareGrid<BoolState>,
        cell: &Cell<BoolState>,
        next: &'n mut BoolState,
    ) -> &'n BoolState {
        let current = cell.state();
        let (num, den) = Self::EXTINGUISH_RATIO;
        let value = current.value() && !ctx.rng(cell.position()).random_ratio(num, den);
        next.follow(current, value, 0)
    }
}
