//! Saving and restoring a committed generation with bincode.

use crate::{CellState, Error, Result, SquareGrid};
use bincode::{deserialize_from, serialize_into};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Snapshot<S> {
    generation: u64,
    width: usize,
    height: usize,
    states: Vec<S>,
}

impl<S> SquareGrid<S>
where
    S: CellState + Serialize + DeserializeOwned,
{
    /// Write the visible states and the generation they belong to.
    ///
    /// The shadow buffer is not saved; it is rebuilt on restore.
    pub fn write_snapshot<W: Write>(&self, generation: u64, out: W) -> Result<()> {
        let snapshot = Snapshot {
            generation,
            width: self.width(),
            height: self.height(),
            states: self.cells().iter().map(|c| c.state().clone()).collect(),
        };
        serialize_into(out, &snapshot)?;
        Ok(())
    }

    /// Read a grid written by [`write_snapshot`](Self::write_snapshot), returning it with
    /// its generation. The restored grid is ready to step.
    pub fn read_snapshot<R: Read>(input: R) -> Result<(Self, u64)> {
        let Snapshot {
            generation,
            width,
            height,
            states,
        } = deserialize_from::<_, Snapshot<S>>(input)?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if width.checked_mul(height) != Some(states.len()) {
            return Err(Error::SnapshotShape {
                width,
                height,
                len: states.len(),
            });
        }
        debug!(generation, width, height, "restored snapshot");
        let mut grid = SquareGrid::new_iter(width, height, states);
        grid.mirror_next_states();
        Ok((grid, generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameOfLife;
    use crate::{BoolState, Context, Rule};

    #[test]
    fn restored_grid_continues_identically() {
        let mut grid = SquareGrid::from_active(6, 6, vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        grid.mirror_next_states();
        let rules: Vec<Box<dyn Rule<BoolState>>> = vec![Box::new(GameOfLife)];

        let mut bytes = Vec::new();
        grid.write_snapshot(7, &mut bytes).unwrap();
        let (mut restored, generation) =
            SquareGrid::<BoolState>::read_snapshot(&bytes[..]).unwrap();
        assert_eq!(generation, 7);
        assert_eq!(restored.active_positions(), grid.active_positions());

        grid.cycle(&rules, Context::new(0, 7), false).unwrap();
        restored.cycle(&rules, Context::new(0, 7), false).unwrap();
        assert_eq!(restored.active_positions(), grid.active_positions());
    }

    #[test]
    fn rejects_mismatched_shape() {
        let snapshot = Snapshot {
            generation: 0,
            width: 3,
            height: 3,
            states: vec![BoolState::default(); 8],
        };
        let bytes = bincode::serialize(&snapshot).unwrap();
        assert!(matches!(
            SquareGrid::<BoolState>::read_snapshot(&bytes[..]),
            Err(Error::SnapshotShape { len: 8, .. })
        ));
        assert!(matches!(
            SquareGrid::<BoolState>::read_snapshot(&bytes[..4]),
            Err(Error::Snapshot(_))
        ));
    }
}
