//! Camgrid runs classical cellular automata on toroidal square grids.
//!
//! A generation is computed in two phases. Every cell is handed to the configured
//! [`Rule`]s together with the grid as it was before the pass, and the rules write the
//! result into the grid's shadow buffer. Only after every cell has been computed is the
//! shadow buffer committed as the new visible generation. This enforces that all new
//! cells are only produced from old board state, so the update order (or running the
//! pass on many threads) cannot change the outcome.
//!
//! The rules cover the CAM catalogue of Toffoli and Margolus: Life, Brian's Brain,
//! parity, anneal, banks, lichens, diffusion, erosion and friends. Probabilistic rules
//! draw from a stream owned by each cell invocation (see [`Context`]), so seeded runs
//! are reproducible and independent of scheduling.

mod automaton;
mod cell;
pub mod catalogue;
pub mod config;
mod direction;
mod error;
mod grid;
pub mod init;
mod moore;
mod neighborhood;
mod neumann;
mod position;
pub mod render;
mod rng;
pub mod rules;
#[cfg(feature = "serde")]
mod snapshot;
mod state;

pub use automaton::*;
pub use cell::*;
pub use direction::*;
pub use error::*;
pub use grid::*;
pub use moore::*;
pub use neighborhood::*;
pub use neumann::*;
pub use position::*;
pub use rng::*;
pub use state::*;

/// A transition law: the next state of one cell as a function of the previous generation.
///
/// Implementations read only through `grid` (the pre-pass snapshot) and write only into
/// `next`, the shadow slot at `cell`'s position, which they overwrite in place and hand
/// back. Randomness comes from `ctx.rng(cell.position())`.
pub trait Rule<S>: Send + Sync {
    fn apply<'n>(
        &self,
        ctx: &Context,
        grid: &SquareGrid<S>,
        cell: &Cell<S>,
        next: &'n mut S,
    ) -> &'n S;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Populates a grid before the first generation.
///
/// Implementations fill the visible cells, then reset the shadow buffer to mirror the
/// fresh states, allocating it if it is absent. Calling one twice before stepping is
/// harmless; calling one mid-pass is impossible because the pass holds the grid mutably.
/// Parameters that only make sense against the grid's area are checked here, before any
/// generation runs.
pub trait Initializer<S> {
    fn initialize(&self, grid: &mut SquareGrid<S>, rng: &mut CellRng) -> Result<()>;

    /// Run `self`, then `next`, on the same grid.
    fn then<B>(self, next: B) -> Then<Self, B>
    where
        Self: Sized,
        B: Initializer<S>,
    {
        Then(self, next)
    }
}

/// Two initializers applied in sequence. See [`Initializer::then`].
#[derive(Clone, Debug)]
pub struct Then<A, B>(pub A, pub B);

impl<S, A, B> Initializer<S> for Then<A, B>
where
    A: Initializer<S>,
    B: Initializer<S>,
{
    fn initialize(&self, grid: &mut SquareGrid<S>, rng: &mut CellRng) -> Result<()> {
        self.0.initialize(grid, rng)?;
        self.1.initialize(grid, rng)
    }
}

impl<S, I: Initializer<S> + ?Sized> Initializer<S> for Box<I> {
    fn initialize(&self, grid: &mut SquareGrid<S>, rng: &mut CellRng) -> Result<()> {
        (**self).initialize(grid, rng)
    }
}
