//! The renderer side of the engine.
//!
//! Drawing is somebody else's job; this module only fixes the interface. A [`Glyph`] maps
//! one committed state to a character, and [`render_frame`] lays a whole generation out
//! as text. Because frames are only built from a committed grid they never mix
//! generations.

use crate::{
    BoolState, BrainPhase, BrainState, CellState, PublishError, PulsePhase, PulseState,
    SquareGrid,
};
use std::io::Write;

pub trait Glyph<S> {
    fn glyph(&self, state: &S) -> char;
}

impl<S, F> Glyph<S> for F
where
    F: Fn(&S) -> char,
{
    fn glyph(&self, state: &S) -> char {
        self(state)
    }
}

/// Default glyphs, using the echo to show births and deaths.
#[derive(Copy, Clone, Debug, Default)]
pub struct Classic;

impl Glyph<BoolState> for Classic {
    fn glyph(&self, state: &BoolState) -> char {
        match (state.echo(), state.value()) {
            (true, true) => '#',
            (false, true) => '+',
            (true, false) => '.',
            (false, false) => ' ',
        }
    }
}

impl Glyph<BrainState> for Classic {
    fn glyph(&self, state: &BrainState) -> char {
        match state.phase() {
            BrainPhase::Firing => '#',
            BrainPhase::Refractory => '+',
            BrainPhase::Ready => ' ',
        }
    }
}

impl Glyph<PulseState> for Classic {
    fn glyph(&self, state: &PulseState) -> char {
        match (state.phase(), state.persistent()) {
            (PulsePhase::Charged, _) => '#',
            (PulsePhase::Fading, true) => '=',
            (PulsePhase::Fading, false) => '-',
            (PulsePhase::Dormant, _) => ' ',
        }
    }
}

/// One line per row, top to bottom, each terminated by a newline.
pub fn render_frame<S, G>(grid: &SquareGrid<S>, glyph: &G) -> String
where
    S: CellState,
    G: Glyph<S> + ?Sized,
{
    let mut frame = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        frame.extend(row.iter().map(|cell| glyph.glyph(cell.state())));
        frame.push('\n');
    }
    frame
}

/// A consumer that writes every generation to `out` as a text frame.
///
/// Write errors are handed back to the automaton, which reports them for that
/// generation only.
pub fn frame_writer<S, G, W>(
    glyph: G,
    mut out: W,
) -> impl FnMut(&SquareGrid<S>) -> Result<(), PublishError> + Send + 'static
where
    S: CellState + 'static,
    G: Glyph<S> + Send + 'static,
    W: Write + Send + 'static,
{
    move |grid: &SquareGrid<S>| -> Result<(), PublishError> {
        out.write_all(render_frame(grid, &glyph).as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
