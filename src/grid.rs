use crate::{BoolState, Cell, CellState, Context, Error, Position, Result, Rule};

use itertools::iproduct;

use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::IntoParallelRefMutIterator;
use rayon::iter::ParallelIterator;
use tracing::trace;

/// Represents the state of the simulation.
///
/// Cells are stored in raster order. The shadow buffer (`next_states`) is the only
/// write target of a pass: it is taken out of the grid for the duration of the pass, so
/// rules can only observe the visible cells, and `commit` swaps it in afterwards.
#[derive(Clone, Debug)]
pub struct SquareGrid<S> {
    cells: Vec<Cell<S>>,
    next: Option<Vec<S>>,
    width: usize,
    height: usize,
}

impl<S> SquareGrid<S> {
    /// Make a grid by evaluating each position to a state with a closure.
    pub fn from_fn<F>(width: usize, height: usize, mut state_map: F) -> Self
    where
        F: FnMut(Position) -> S,
    {
        assert!(
            width >= 1 && height >= 1,
            "SquareGrid::from_fn: grid is empty, which isnt allowed"
        );
        let cells = iproduct!(0..height, 0..width)
            .map(|(y, x)| Position::new(x, y))
            .map(|pos| Cell::new(pos, state_map(pos)))
            .collect();
        SquareGrid {
            cells,
            next: None,
            width,
            height,
        }
    }

    /// Make a new grid directly from an initial iter of states in raster order.
    pub fn new_iter<I>(width: usize, height: usize, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut iter = iter.into_iter();
        // Assert that they provided enough cells. If they didn't the simulation would panic.
        Self::from_fn(width, height, |_| {
            iter.next()
                .expect("SquareGrid::new_iter: not enough cells provided in iter")
        })
    }

    /// Linear raster index of a position. Panics if out of bounds.
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        assert!(
            pos.x() < self.width && pos.y() < self.height,
            "SquareGrid::index: {:?} is outside a {}x{} grid",
            pos,
            self.width,
            self.height
        );
        pos.y() * self.width + pos.x()
    }

    /// Inverse of `index`.
    #[inline]
    pub fn position(&self, ix: usize) -> Position {
        Position::new(ix % self.width, ix / self.width)
    }

    /// Offset a position to a new position on the torus.
    #[inline]
    pub fn offset(&self, pos: Position, delta: (isize, isize)) -> Position {
        pos.wrapped(delta, self.width, self.height)
    }

    /// Get a &Cell. Panics if out of bounds; callers wrap coordinates themselves.
    #[inline]
    pub fn get_cell(&self, x: usize, y: usize) -> &Cell<S> {
        &self.cells[self.index(Position::new(x, y))]
    }

    /// Replace the cell at `(x, y)`. The cell must carry that position.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell<S>) {
        let pos = Position::new(x, y);
        assert_eq!(
            cell.position(),
            pos,
            "SquareGrid::set_cell: cell position does not match its slot"
        );
        let ix = self.index(pos);
        self.cells[ix] = cell;
    }

    /// The visible state at `pos`. Panics if out of bounds.
    #[inline]
    pub fn state(&self, pos: Position) -> &S {
        self.cells[self.index(pos)].state()
    }

    /// Overwrite the visible state at `pos`. Only initializers should call this.
    #[inline]
    pub fn set_state(&mut self, pos: Position, state: S) {
        let ix = self.index(pos);
        self.cells[ix].replace_state(state);
    }

    /// Get the Grid's Cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell<S>] {
        &self.cells[..]
    }

    /// Get the Grid's Cell slice mutably.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell<S>] {
        &mut self.cells[..]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell<S>> {
        self.cells.chunks(self.width)
    }

    /// Get the Grid's width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the Grid's height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the Grid's size.
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }
}

impl<S: CellState> SquareGrid<S> {
    /// Make a new grid using the state's Default impl. Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self::try_new(width, height).expect("SquareGrid::new: grid is empty, which isnt allowed")
    }

    /// Make a new grid using the state's Default impl, rejecting empty dimensions.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::from_fn(width, height, |_| S::default()))
    }

    /// Number of cells whose state is active.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state().is_active()).count()
    }

    /// The shadow buffer, `None` until an initializer allocates it.
    #[inline]
    pub fn next_states(&self) -> Option<&[S]> {
        self.next.as_deref()
    }

    #[inline]
    pub fn next_states_mut(&mut self) -> Option<&mut [S]> {
        self.next.as_deref_mut()
    }

    /// Install a shadow buffer. Panics if its length is not `width * height`.
    pub fn set_next_states(&mut self, next: Vec<S>) {
        assert_eq!(
            next.len(),
            self.size(),
            "SquareGrid::set_next_states: buffer does not match grid size"
        );
        self.next = Some(next);
    }

    /// Remove the shadow buffer, leaving the grid uninitialized for stepping.
    pub fn take_next_states(&mut self) -> Option<Vec<S>> {
        self.next.take()
    }

    /// Allocate the shadow buffer with default states if it is absent.
    pub fn allocate_next_states(&mut self) -> &mut [S] {
        let size = self.size();
        self.next.get_or_insert_with(|| {
            trace!(size, "allocating shadow buffer");
            vec![S::default(); size]
        })
    }

    /// Reset every shadow slot to a clone of the visible state at the same position.
    ///
    /// Rules that leave fields untouched then carry them over instead of reading defaults.
    pub fn mirror_next_states(&mut self) {
        self.allocate_next_states();
        if let Some(next) = self.next.as_mut() {
            for (slot, cell) in next.iter_mut().zip(&self.cells) {
                slot.clone_from(cell.state());
            }
        }
    }

    /// Apply every rule to every cell in parallel, writing only into the shadow buffer.
    pub fn compute_parallel(&mut self, rules: &[Box<dyn Rule<S>>], ctx: Context) -> Result<()> {
        let mut next = self.next.take().ok_or(Error::ShadowBufferMissing)?;
        {
            let grid = &*self;
            next.par_iter_mut()
                .zip(grid.cells.par_iter())
                .for_each(|(slot, cell)| grid.apply_rules(rules, ctx, cell, slot));
        }
        self.next = Some(next);
        Ok(())
    }

    /// Apply every rule to every cell in raster order, writing only into the shadow buffer.
    pub fn compute_serial(&mut self, rules: &[Box<dyn Rule<S>>], ctx: Context) -> Result<()> {
        let mut next = self.next.take().ok_or(Error::ShadowBufferMissing)?;
        for (slot, cell) in next.iter_mut().zip(&self.cells) {
            self.apply_rules(rules, ctx, cell, slot);
        }
        self.next = Some(next);
        Ok(())
    }

    #[inline]
    fn apply_rules(&self, rules: &[Box<dyn Rule<S>>], ctx: Context, cell: &Cell<S>, slot: &mut S) {
        for (layer, rule) in rules.iter().enumerate() {
            rule.apply(&ctx.with_layer(layer as u32), self, cell, slot);
        }
    }

    /// Make the shadow buffer the visible generation.
    ///
    /// The states are swapped, so the old generation becomes the next pass's write target
    /// and nothing is allocated.
    pub fn commit(&mut self) -> Result<()> {
        let next = self.next.as_mut().ok_or(Error::ShadowBufferMissing)?;
        for (cell, slot) in self.cells.iter_mut().zip(next.iter_mut()) {
            std::mem::swap(cell.state_mut(), slot);
        }
        Ok(())
    }

    /// Run one full generation: compute every cell against the current snapshot, then commit.
    pub fn cycle(&mut self, rules: &[Box<dyn Rule<S>>], ctx: Context, parallel: bool) -> Result<()> {
        if parallel {
            self.compute_parallel(rules, ctx)?;
        } else {
            self.compute_serial(rules, ctx)?;
        }
        self.commit()
    }
}

impl SquareGrid<BoolState> {
    /// Make a grid where exactly the given positions are active.
    pub fn from_active<I>(width: usize, height: usize, active: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(width, height);
        for (x, y) in active {
            grid.set_state(Position::new(x, y), BoolState::new(true));
        }
        grid
    }

    /// Positions of the active cells in raster order.
    pub fn active_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|c| c.state().value())
            .map(|c| (c.position().x(), c.position().y()))
            .collect()
    }

    /// Count of active cells carrying each species id, indexed by id.
    pub fn species_counts(&self) -> Vec<usize> {
        let max = self.cells.iter().map(|c| c.state().species()).max().unwrap_or(0);
        let mut counts = vec![0; max as usize + 1];
        for cell in self.cells.iter().filter(|c| c.state().value()) {
            counts[cell.state().species() as usize] += 1;
        }
        counts
    }
}
