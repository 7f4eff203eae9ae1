use crate::{
    count_live_moore, Cell, Context, Error, PulsePhase, PulseState, Result, Rule, SquareGrid,
};
use rand::Rng;

/// Pulse Weaver: an excitable medium with sticky afterglow.
///
/// A dormant cell next to `n` charged Moore neighbors charges with probability
/// `1 - (1 - spark)^n`. Charged cells fade, and fading cells go dormant unless they were
/// created persistent, in which case they keep fading forever.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PulseWeaver {
    spark: f64,
}

impl PulseWeaver {
    pub const DEFAULT_SPARK: f64 = 0.3;

    pub fn new(spark: f64) -> Result<Self> {
        Ok(PulseWeaver {
            spark: Error::check_probability("spark", spark)?,
        })
    }

    pub fn spark(&self) -> f64 {
        self.spark
    }
}

impl Default for PulseWeaver {
    fn default() -> Self {
        PulseWeaver {
            spark: Self::DEFAULT_SPARK,
        }
    }
}

impl Rule<PulseState> for PulseWeaver {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<PulseState>,
        cell: &Cell<PulseState>,
        next: &'n mut PulseState,
    ) -> &'n PulseState {
        use PulsePhase::*;
        let current = cell.state();
        let phase = match current.phase() {
            Dormant => {
                let charged = count_live_moore(grid, cell.position());
                let ignite = 1.0 - (1.0 - self.spark).powi(charged as i32);
                if charged > 0 && ctx.rng(cell.position()).random_bool(ignite) {
                    Charged
                } else {
                    Dormant
                }
            }
            Charged => Fading,
            Fading if current.persistent() => Fading,
            Fading => Dormant,
        };
        next.set(phase, current.persistent())
    }
}
