//! The transition laws.
//!
//! Every rule here is a unit or small parameter struct implementing [`Rule`] for one
//! state family. Deterministic rules ignore the [`Context`]; probabilistic ones draw
//! from `ctx.rng(cell.position())` only.
//!
//! [`Rule`]: crate::Rule
//! [`Context`]: crate::Context

mod anneal;
mod banks;
mod brain;
mod diffusion;
mod erosion;
mod growth;
mod lichens;
mod life;
mod parity;
mod pulse;
mod rain;

pub use anneal::{Anneal, RandomAnneal};
pub use banks::Banks;
pub use brain::BriansBrain;
pub use diffusion::{DiffusionMode, GeneticDrift, NaiveDiffusion};
pub use erosion::{SoilErosion, SoilErosionRandom};
pub use growth::{Diamonds, Squares, Triangles};
pub use lichens::{Lichens, OneOutOfEight};
pub use life::GameOfLife;
pub use parity::{Parity, ParityFlip};
pub use pulse::PulseWeaver;
pub use rain::CandleRain;
