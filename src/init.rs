//! Initial distributions.
//!
//! Each initializer is one small fill step; richer starts are built by chaining with
//! [`Initializer::then`], e.g. `UniformRandom::new(0.3)?.then(BaselineRow)`. Fills that
//! describe the whole grid clear it first, overlays such as [`BaselineRow`] only touch
//! their own cells. Every step leaves the shadow buffer mirroring the visible states.

use crate::{
    BoolState, CellRng, CellState, Error, Initializer, Position, PulsePhase, PulseState, Result,
    SquareGrid,
};
use rand::seq::index::sample;
use rand::Rng;

fn clear<S: CellState>(grid: &mut SquareGrid<S>) {
    for cell in grid.cells_mut() {
        *cell.state_mut() = S::default();
    }
}

fn check_population<S: CellState>(grid: &SquareGrid<S>, population: usize) -> Result<()> {
    if population > grid.size() {
        return Err(Error::PopulationExceedsArea {
            population,
            area: grid.size(),
        });
    }
    Ok(())
}

/// Offset of `pos` from the grid's center cell.
#[inline]
fn center_offset<S>(grid: &SquareGrid<S>, pos: Position) -> (isize, isize) {
    (
        pos.x() as isize - (grid.width() / 2) as isize,
        pos.y() as isize - (grid.height() / 2) as isize,
    )
}

/// Every cell is live independently with `probability`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformRandom {
    probability: f64,
}

impl UniformRandom {
    pub fn new(probability: f64) -> Result<Self> {
        Ok(UniformRandom {
            probability: Error::check_probability("probability", probability)?,
        })
    }
}

impl Default for UniformRandom {
    fn default() -> Self {
        UniformRandom { probability: 0.5 }
    }
}

impl Initializer<BoolState> for UniformRandom {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, rng: &mut CellRng) -> Result<()> {
        for cell in grid.cells_mut() {
            *cell.state_mut() = BoolState::new(rng.random_bool(self.probability));
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// A live square of side `2 * half_side + 1` centered on the grid; everything else is dead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CenteredSquare {
    pub half_side: usize,
}

impl Initializer<BoolState> for CenteredSquare {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, _: &mut CellRng) -> Result<()> {
        let h = self.half_side as isize;
        for ix in 0..grid.size() {
            let (dx, dy) = center_offset(grid, grid.position(ix));
            let live = dx.abs() <= h && dy.abs() <= h;
            *grid.cells_mut()[ix].state_mut() = BoolState::new(live);
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// Cells within `radius` of the center, and only with `probability`.
///
/// A probability of 1 gives a solid disk; lower values give a ragged blob.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CenteredDisk {
    radius: usize,
    probability: f64,
}

impl CenteredDisk {
    pub fn new(radius: usize) -> Self {
        CenteredDisk {
            radius,
            probability: 1.0,
        }
    }

    pub fn blob(radius: usize, probability: f64) -> Result<Self> {
        Ok(CenteredDisk {
            radius,
            probability: Error::check_probability("probability", probability)?,
        })
    }
}

impl Initializer<BoolState> for CenteredDisk {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, rng: &mut CellRng) -> Result<()> {
        let r2 = (self.radius * self.radius) as isize;
        for ix in 0..grid.size() {
            let (dx, dy) = center_offset(grid, grid.position(ix));
            let live = dx * dx + dy * dy <= r2 && rng.random_bool(self.probability);
            *grid.cells_mut()[ix].state_mut() = BoolState::new(live);
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// `count` live squares of side `size` at random places, wrapping at the edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spots {
    count: usize,
    size: usize,
}

impl Spots {
    pub fn new(count: usize, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidParameter {
                name: "size",
                reason: "spots must be at least one cell wide".into(),
            });
        }
        Ok(Spots { count, size })
    }
}

impl Initializer<BoolState> for Spots {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, rng: &mut CellRng) -> Result<()> {
        if self.size > grid.width().min(grid.height()) {
            return Err(Error::InvalidParameter {
                name: "size",
                reason: format!(
                    "spot size {} exceeds the {}x{} grid",
                    self.size,
                    grid.width(),
                    grid.height()
                ),
            });
        }
        clear(grid);
        for _ in 0..self.count {
            let corner = Position::new(
                rng.random_range(0..grid.width()),
                rng.random_range(0..grid.height()),
            );
            for dy in 0..self.size as isize {
                for dx in 0..self.size as isize {
                    let pos = grid.offset(corner, (dx, dy));
                    grid.set_state(pos, BoolState::new(true));
                }
            }
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// Exactly `population` distinct random cells get `state`; the rest are default.
///
/// With a firing [`BrainState`](crate::BrainState) this seeds Brian's Brain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scatter<S> {
    population: usize,
    state: S,
}

impl<S> Scatter<S> {
    pub fn new(population: usize, state: S) -> Self {
        Scatter { population, state }
    }
}

impl<S: CellState> Initializer<S> for Scatter<S> {
    fn initialize(&self, grid: &mut SquareGrid<S>, rng: &mut CellRng) -> Result<()> {
        check_population(grid, self.population)?;
        clear(grid);
        for ix in sample(rng, grid.size(), self.population) {
            grid.set_state(grid.position(ix), self.state.clone());
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// `population` distinct random live cells, tagged round-robin with species `1..=species`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpeciesPopulation {
    species: u32,
    population: usize,
}

impl SpeciesPopulation {
    pub fn new(species: u32, population: usize) -> Result<Self> {
        Ok(SpeciesPopulation {
            species: Error::check_species(species)?,
            population,
        })
    }
}

impl Initializer<BoolState> for SpeciesPopulation {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, rng: &mut CellRng) -> Result<()> {
        check_population(grid, self.population)?;
        clear(grid);
        let species = (1..=self.species).cycle();
        for (ix, tag) in sample(rng, grid.size(), self.population).into_iter().zip(species) {
            grid.set_state(grid.position(ix), BoolState::with_species(true, tag));
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// Turns the bottom row on, leaving the rest of the grid alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BaselineRow;

impl Initializer<BoolState> for BaselineRow {
    fn initialize(&self, grid: &mut SquareGrid<BoolState>, _: &mut CellRng) -> Result<()> {
        let y = grid.height() - 1;
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            let species = grid.state(pos).species();
            grid.set_state(pos, BoolState::with_species(true, species));
        }
        grid.mirror_next_states();
        Ok(())
    }
}

/// Pulse Weaver field: each cell is charged with `probability`, otherwise dormant, and
/// rolls its persistence flag once as it is created.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PulseField {
    probability: f64,
}

impl PulseField {
    pub fn new(probability: f64) -> Result<Self> {
        Ok(PulseField {
            probability: Error::check_probability("probability", probability)?,
        })
    }
}

impl Initializer<PulseState> for PulseField {
    fn initialize(&self, grid: &mut SquareGrid<PulseState>, rng: &mut CellRng) -> Result<()> {
        for cell in grid.cells_mut() {
            let phase = if rng.random_bool(self.probability) {
                PulsePhase::Charged
            } else {
                PulsePhase::Dormant
            };
            *cell.state_mut() = PulseState::spawn(phase, rng);
        }
        grid.mirror_next_states();
        Ok(())
    }
}
