//! Numeric configuration.
//!
//! Loading these from files belongs to the caller; with the `serde` feature every struct
//! deserializes with defaults for missing fields. Nothing here is trusted until
//! `validate` (or the constructor it feeds) has accepted it.

use crate::rules::DiffusionMode;
use crate::{Error, Result};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape and pacing of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutomatonConfig {
    pub width: usize,
    pub height: usize,
    /// Pause before each generation in `run`.
    pub interval_ms: u64,
    /// Root of every random stream in the run.
    pub seed: u64,
    /// Compute each pass on the rayon pool instead of in raster order.
    pub parallel: bool,
    /// Stop `run` after this many generations.
    pub max_generations: Option<u64>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        AutomatonConfig {
            width: 64,
            height: 64,
            interval_ms: 100,
            seed: 0,
            parallel: true,
            max_generations: None,
        }
    }
}

impl AutomatonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Knobs of the parameterized rules. Rules without parameters ignore all of them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleParams {
    /// Per-neighbor charge probability of Pulse Weaver.
    pub spark: f64,
    /// Boundary flip probability of random anneal.
    pub temperature: f64,
    pub diffusion_mode: DiffusionMode,
    /// Confine diffusion to 3x3 blocks of the grid.
    pub partitioned: bool,
}

impl Default for RuleParams {
    fn default() -> Self {
        RuleParams {
            spark: crate::rules::PulseWeaver::DEFAULT_SPARK,
            temperature: crate::rules::RandomAnneal::DEFAULT_TEMPERATURE,
            diffusion_mode: DiffusionMode::default(),
            partitioned: false,
        }
    }
}

impl RuleParams {
    pub fn validate(&self) -> Result<()> {
        Error::check_probability("spark", self.spark)?;
        Error::check_probability("temperature", self.temperature)?;
        Ok(())
    }
}

/// Knobs of the initial distributions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InitParams {
    pub probability: f64,
    pub radius: usize,
    pub half_side: usize,
    /// Number of spots.
    pub count: usize,
    /// Side of each spot.
    pub size: usize,
    /// Cells placed by fixed-count fills.
    pub population: usize,
    pub species: u32,
    /// Also turn the bottom row on.
    pub baseline: bool,
}

impl Default for InitParams {
    fn default() -> Self {
        InitParams {
            probability: 0.5,
            radius: 8,
            half_side: 4,
            count: 8,
            size: 2,
            population: 64,
            species: 2,
            baseline: false,
        }
    }
}

impl InitParams {
    pub fn validate(&self) -> Result<()> {
        Error::check_probability("probability", self.probability)?;
        Error::check_species(self.species)?;
        if self.size == 0 {
            return Err(Error::InvalidParameter {
                name: "size",
                reason: "spots must be at least one cell wide".into(),
            });
        }
        Ok(())
    }

    /// Checks the parameters that depend on the grid they will fill.
    pub fn validate_for(&self, config: &AutomatonConfig) -> Result<()> {
        self.validate()?;
        let area = config.width * config.height;
        if self.population > area {
            return Err(Error::PopulationExceedsArea {
                population: self.population,
                area,
            });
        }
        let short = config.width.min(config.height);
        for &(name, value) in &[("radius", self.radius), ("half_side", self.half_side)] {
            if value > short {
                return Err(Error::InvalidParameter {
                    name,
                    reason: format!("{} exceeds the smaller grid dimension {}", value, short),
                });
            }
        }
        Ok(())
    }
}
