//! Errors produced while building and running automata.
//!
//! Out-of-range coordinates and empty grids are programmer errors and panic at the
//! call site. Everything a configuration can get wrong is reported here instead, at
//! construction time, so it never reaches the update loop.

/// Boxed error returned by a grid consumer.
pub type PublishError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Width or height was zero.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A probability parameter fell outside `[0, 1]`.
    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Species count outside the supported `1..=4`.
    #[error("species count must lie in 1..=4, got {count}")]
    InvalidSpeciesCount { count: u32 },

    /// More cells were requested than the grid holds.
    #[error("population {population} exceeds grid area {area}")]
    PopulationExceedsArea { population: usize, area: usize },

    /// Any other numeric parameter outside its domain.
    #[error("parameter `{name}` is invalid: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A generation was started before an initializer allocated the shadow buffer.
    #[error("shadow buffer has not been allocated; run an initializer first")]
    ShadowBufferMissing,

    /// The consumer rejected a committed generation.
    #[error("failed to publish generation {generation}: {source}")]
    Publish {
        generation: u64,
        #[source]
        source: PublishError,
    },

    /// A catalogue lookup by name failed.
    #[error("unknown {kind} `{name}`")]
    UnknownName { kind: &'static str, name: String },

    /// A snapshot stream could not be encoded or decoded.
    #[cfg(feature = "serde")]
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),

    /// A decoded snapshot does not hold one state per cell.
    #[error("snapshot of {width}x{height} carries {len} states")]
    SnapshotShape {
        width: usize,
        height: usize,
        len: usize,
    },
}

impl Error {
    /// Checks that `value` is a probability, naming the parameter on failure.
    pub fn check_probability(name: &'static str, value: f64) -> Result<f64> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(Error::InvalidProbability { name, value })
        }
    }

    /// Checks that a species count is in the supported range.
    pub fn check_species(count: u32) -> Result<u32> {
        if (1..=4).contains(&count) {
            Ok(count)
        } else {
            Err(Error::InvalidSpeciesCount { count })
        }
    }
}
