//! The three state families a grid can hold.
//!
//! A grid holds exactly one family. Rules write into shadow-buffer slots through the
//! `set` methods here rather than building fresh values, so one generation allocates
//! nothing.

use enum_iterator::IntoEnumIterator;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common capability of every state family.
pub trait CellState: Clone + Default + Send + Sync + std::fmt::Debug {
    /// Whether this state counts as live for neighbor counting and statistics.
    fn is_active(&self) -> bool;
}

/// Two-valued state with a one-generation memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoolState {
    value: bool,
    echo: bool,
    live_sum: u8,
    species: u32,
}

impl BoolState {
    #[inline]
    pub fn new(value: bool) -> Self {
        BoolState {
            value,
            ..Default::default()
        }
    }

    #[inline]
    pub fn with_species(value: bool, species: u32) -> Self {
        BoolState {
            value,
            species,
            ..Default::default()
        }
    }

    #[inline]
    pub fn value(&self) -> bool {
        self.value
    }

    /// The value this cell held one generation ago.
    #[inline]
    pub fn echo(&self) -> bool {
        self.echo
    }

    /// Neighbor count seen by the last rule that wrote this state.
    #[inline]
    pub fn live_sum(&self) -> u8 {
        self.live_sum
    }

    /// `0` means unassigned.
    #[inline]
    pub fn species(&self) -> u32 {
        self.species
    }

    /// Overwrite value, echo and live sum in place. The species tag is untouched.
    #[inline]
    pub fn set(&mut self, value: bool, echo: bool, live_sum: u8) -> &mut Self {
        self.value = value;
        self.echo = echo;
        self.live_sum = live_sum;
        self
    }

    /// Become the successor of `current`: the echo remembers `current`'s value and the
    /// species tag carries over.
    #[inline]
    pub fn follow(&mut self, current: &BoolState, value: bool, live_sum: u8) -> &mut Self {
        self.species = current.species;
        self.set(value, current.value, live_sum)
    }

    #[inline]
    pub fn set_value(&mut self, value: bool) -> &mut Self {
        self.value = value;
        self
    }

    #[inline]
    pub fn set_species(&mut self, species: u32) -> &mut Self {
        self.species = species;
        self
    }

    /// Whether the cell changed value between the previous and the current generation.
    #[inline]
    pub fn toggled(&self) -> bool {
        self.value != self.echo
    }
}

impl CellState for BoolState {
    #[inline]
    fn is_active(&self) -> bool {
        self.value
    }
}

/// Phase of a Brian's Brain cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrainPhase {
    Ready,
    Firing,
    Refractory,
}

impl Default for BrainPhase {
    fn default() -> Self {
        BrainPhase::Ready
    }
}

impl BrainPhase {
    /// The unconditional part of the cycle. `Ready` needs its neighbors to decide.
    #[inline]
    pub fn advance(self, fire: bool) -> Self {
        use BrainPhase::*;
        match self {
            Ready if fire => Firing,
            Ready => Ready,
            Firing => Refractory,
            Refractory => Ready,
        }
    }
}

/// Brian's Brain state. The echo keeps the previous phase for second-order rendering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrainState {
    phase: BrainPhase,
    echo: BrainPhase,
}

impl BrainState {
    #[inline]
    pub fn new(phase: BrainPhase) -> Self {
        BrainState {
            phase,
            echo: BrainPhase::Ready,
        }
    }

    #[inline]
    pub fn phase(&self) -> BrainPhase {
        self.phase
    }

    #[inline]
    pub fn echo(&self) -> BrainPhase {
        self.echo
    }

    #[inline]
    pub fn set(&mut self, phase: BrainPhase, echo: BrainPhase) -> &mut Self {
        self.phase = phase;
        self.echo = echo;
        self
    }
}

impl CellState for BrainState {
    #[inline]
    fn is_active(&self) -> bool {
        self.phase == BrainPhase::Firing
    }
}

/// Phase of a Pulse Weaver cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PulsePhase {
    Dormant,
    Charged,
    Fading,
}

impl Default for PulsePhase {
    fn default() -> Self {
        PulsePhase::Dormant
    }
}

/// Pulse Weaver state. `persistent` cells never leave `Fading` once they reach it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PulseState {
    phase: PulsePhase,
    persistent: bool,
}

impl PulseState {
    /// Chance that a freshly created cell is persistent.
    pub const PERSISTENCE_CHANCE: f64 = 0.2;

    #[inline]
    pub fn new(phase: PulsePhase, persistent: bool) -> Self {
        PulseState { phase, persistent }
    }

    /// Create a cell, rolling its persistence flag once.
    pub fn spawn<R: Rng + ?Sized>(phase: PulsePhase, rng: &mut R) -> Self {
        PulseState {
            phase,
            persistent: rng.random_bool(Self::PERSISTENCE_CHANCE),
        }
    }

    #[inline]
    pub fn phase(&self) -> PulsePhase {
        self.phase
    }

    #[inline]
    pub fn persistent(&self) -> bool {
        self.persistent
    }

    #[inline]
    pub fn set(&mut self, phase: PulsePhase, persistent: bool) -> &mut Self {
        self.phase = phase;
        self.persistent = persistent;
        self
    }
}

impl CellState for PulseState {
    #[inline]
    fn is_active(&self) -> bool {
        self.phase == PulsePhase::Charged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn bool_state_fields_read_back() {
        let mut s = BoolState::default();
        s.set(true, false, 7).set_species(3);
        assert!(s.value());
        assert!(!s.echo());
        assert_eq!(s.live_sum(), 7);
        assert_eq!(s.species(), 3);
        assert!(s.toggled());

        s.set(false, true, 0);
        assert!(!s.value());
        assert!(s.echo());
        assert_eq!(s.live_sum(), 0);
        assert_eq!(s.species(), 3);
    }

    #[test]
    fn brain_cycle() {
        use BrainPhase::*;
        assert_eq!(Ready.advance(true), Firing);
        assert_eq!(Ready.advance(false), Ready);
        assert_eq!(Firing.advance(true), Refractory);
        assert_eq!(Refractory.advance(true), Ready);
        assert_eq!(BrainPhase::into_enum_iter().count(), 3);
    }

    #[test]
    fn pulse_persistence_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trials = 20_000;
        let persistent = (0..trials)
            .filter(|_| PulseState::spawn(PulsePhase::Dormant, &mut rng).persistent())
            .count();
        let rate = persistent as f64 / trials as f64;
        assert!((rate - 0.2).abs() < 0.02, "rate was {}", rate);
    }
}
