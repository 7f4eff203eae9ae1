//! Rules and initializers by name.
//!
//! A loader that reads descriptors from disk can resolve identifiers here and get a
//! ready [`Automaton`] back. Names are unique within each catalogue, and every rule
//! listed for one automaton must belong to the same state family.

use crate::config::{AutomatonConfig, InitParams, RuleParams};
use crate::init::{
    BaselineRow, CenteredDisk, CenteredSquare, PulseField, Scatter, SpeciesPopulation, Spots,
    UniformRandom,
};
use crate::render::{render_frame, Classic};
use crate::rules::*;
use crate::{
    Automaton, BoolState, BrainPhase, BrainState, CancelToken, Error, Initializer, PulseState,
    Result, Rule, RunSummary,
};
use boolinator::Boolinator;
use enum_iterator::IntoEnumIterator;
use std::str::FromStr;

/// The state family a rule or initializer works on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum Family {
    Bool,
    Brain,
    Pulse,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum RuleKind {
    GameOfLife,
    BriansBrain,
    PulseWeaver,
    Diamonds,
    Squares,
    Triangles,
    Parity,
    ParityFlip,
    Lichens,
    OneOutOfEight,
    Anneal,
    RandomAnneal,
    Banks,
    NaiveDiffusion,
    GeneticDrift,
    SoilErosion,
    SoilErosionRandom,
    CandleRain,
}

impl RuleKind {
    pub fn name(self) -> &'static str {
        use RuleKind::*;
        match self {
            GameOfLife => "life",
            BriansBrain => "brians_brain",
            PulseWeaver => "pulse_weaver",
            Diamonds => "diamonds",
            Squares => "squares",
            Triangles => "triangles",
            Parity => "parity",
            ParityFlip => "parity_flip",
            Lichens => "lichens",
            OneOutOfEight => "one_out_of_eight",
            Anneal => "anneal",
            RandomAnneal => "random_anneal",
            Banks => "banks",
            NaiveDiffusion => "naive_diffusion",
            GeneticDrift => "genetic_drift",
            SoilErosion => "soil_erosion",
            SoilErosionRandom => "soil_erosion_random",
            CandleRain => "candle_rain",
        }
    }

    pub fn family(self) -> Family {
        match self {
            RuleKind::BriansBrain => Family::Brain,
            RuleKind::PulseWeaver => Family::Pulse,
            _ => Family::Bool,
        }
    }

    fn expect_family(self, family: Family) -> Result<()> {
        Boolinator::ok_or_else(self.family() == family, || Error::InvalidParameter {
            name: "rules",
            reason: format!("`{}` does not run on {:?} grids", self.name(), family),
        })
    }

    pub fn bool_rule(self, params: &RuleParams) -> Result<Box<dyn Rule<BoolState>>> {
        self.expect_family(Family::Bool)?;
        params.validate()?;
        use RuleKind as K;
        Ok(match self {
            K::GameOfLife => Box::new(GameOfLife),
            K::Diamonds => Box::new(Diamonds),
            K::Squares => Box::new(Squares),
            K::Triangles => Box::new(Triangles),
            K::Parity => Box::new(Parity),
            K::ParityFlip => Box::new(ParityFlip),
            K::Lichens => Box::new(Lichens),
            K::OneOutOfEight => Box::new(OneOutOfEight),
            K::Anneal => Box::new(Anneal),
            K::RandomAnneal => Box::new(RandomAnneal::new(params.temperature)?),
            K::Banks => Box::new(Banks),
            K::NaiveDiffusion => Box::new(NaiveDiffusion::new(
                params.diffusion_mode,
                params.partitioned,
            )),
            K::GeneticDrift => Box::new(GeneticDrift::new(
                params.diffusion_mode,
                params.partitioned,
            )),
            K::SoilErosion => Box::new(SoilErosion),
            K::SoilErosionRandom => Box::new(SoilErosionRandom),
            K::CandleRain => Box::new(CandleRain),
            K::BriansBrain | K::PulseWeaver => unreachable!("family checked above"),
        })
    }

    pub fn brain_rule(self, _: &RuleParams) -> Result<Box<dyn Rule<BrainState>>> {
        self.expect_family(Family::Brain)?;
        Ok(Box::new(BriansBrain))
    }

    pub fn pulse_rule(self, params: &RuleParams) -> Result<Box<dyn Rule<PulseState>>> {
        self.expect_family(Family::Pulse)?;
        Ok(Box::new(crate::rules::PulseWeaver::new(params.spark)?))
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RuleKind::into_enum_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownName {
                kind: "rule",
                name: s.to_owned(),
            })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum InitKind {
    Uniform,
    Square,
    Disk,
    Blob,
    Spots,
    Scatter,
    Species,
    Baseline,
    BrainSeeds,
    PulseField,
}

impl InitKind {
    pub fn name(self) -> &'static str {
        use InitKind::*;
        match self {
            Uniform => "uniform",
            Square => "square",
            Disk => "disk",
            Blob => "blob",
            Spots => "spots",
            Scatter => "scatter",
            Species => "species",
            Baseline => "baseline",
            BrainSeeds => "brain_seeds",
            PulseField => "pulse_field",
        }
    }

    pub fn family(self) -> Family {
        match self {
            InitKind::BrainSeeds => Family::Brain,
            InitKind::PulseField => Family::Pulse,
            _ => Family::Bool,
        }
    }

    fn expect_family(self, family: Family) -> Result<()> {
        Boolinator::ok_or_else(self.family() == family, || Error::InvalidParameter {
            name: "initializer",
            reason: format!("`{}` does not fill {:?} grids", self.name(), family),
        })
    }

    /// Build a boolean fill. With `params.baseline` the bottom row is turned on afterwards.
    pub fn bool_init(self, params: &InitParams) -> Result<Box<dyn Initializer<BoolState>>> {
        self.expect_family(Family::Bool)?;
        params.validate()?;
        use InitKind as K;
        let fill: Box<dyn Initializer<BoolState>> = match self {
            K::Uniform => Box::new(UniformRandom::new(params.probability)?),
            K::Square => Box::new(CenteredSquare {
                half_side: params.half_side,
            }),
            K::Disk => Box::new(CenteredDisk::new(params.radius)),
            K::Blob => Box::new(CenteredDisk::blob(params.radius, params.probability)?),
            K::Spots => Box::new(Spots::new(params.count, params.size)?),
            K::Scatter => Box::new(Scatter::new(params.population, BoolState::new(true))),
            K::Species => Box::new(SpeciesPopulation::new(params.species, params.population)?),
            K::Baseline => Box::new(BaselineRow),
            K::BrainSeeds | K::PulseField => unreachable!("family checked above"),
        };
        Ok(if params.baseline && self != K::Baseline {
            Box::new(fill.then(BaselineRow))
        } else {
            fill
        })
    }

    pub fn brain_init(self, params: &InitParams) -> Result<Box<dyn Initializer<BrainState>>> {
        self.expect_family(Family::Brain)?;
        Ok(Box::new(Scatter::new(
            params.population,
            BrainState::new(BrainPhase::Firing),
        )))
    }

    pub fn pulse_init(self, params: &InitParams) -> Result<Box<dyn Initializer<PulseState>>> {
        self.expect_family(Family::Pulse)?;
        Ok(Box::new(PulseField::new(params.probability)?))
    }
}

impl FromStr for InitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InitKind::into_enum_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownName {
                kind: "initializer",
                name: s.to_owned(),
            })
    }
}

/// An automaton of any family, as produced by [`build`].
#[derive(Debug)]
pub enum AnyAutomaton {
    Bool(Automaton<BoolState>),
    Brain(Automaton<BrainState>),
    Pulse(Automaton<PulseState>),
}

impl AnyAutomaton {
    pub fn family(&self) -> Family {
        match self {
            AnyAutomaton::Bool(_) => Family::Bool,
            AnyAutomaton::Brain(_) => Family::Brain,
            AnyAutomaton::Pulse(_) => Family::Pulse,
        }
    }

    pub fn step(&mut self) -> Result<()> {
        match self {
            AnyAutomaton::Bool(a) => a.step(),
            AnyAutomaton::Brain(a) => a.step(),
            AnyAutomaton::Pulse(a) => a.step(),
        }
    }

    pub fn run(&mut self, cancel: &CancelToken) -> Result<RunSummary> {
        match self {
            AnyAutomaton::Bool(a) => a.run(cancel),
            AnyAutomaton::Brain(a) => a.run(cancel),
            AnyAutomaton::Pulse(a) => a.run(cancel),
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            AnyAutomaton::Bool(a) => a.generation(),
            AnyAutomaton::Brain(a) => a.generation(),
            AnyAutomaton::Pulse(a) => a.generation(),
        }
    }

    pub fn live_count(&self) -> usize {
        match self {
            AnyAutomaton::Bool(a) => a.grid().live_count(),
            AnyAutomaton::Brain(a) => a.grid().live_count(),
            AnyAutomaton::Pulse(a) => a.grid().live_count(),
        }
    }

    /// The current generation drawn with the [`Classic`] glyphs.
    pub fn frame(&self) -> String {
        match self {
            AnyAutomaton::Bool(a) => render_frame(a.grid(), &Classic),
            AnyAutomaton::Brain(a) => render_frame(a.grid(), &Classic),
            AnyAutomaton::Pulse(a) => render_frame(a.grid(), &Classic),
        }
    }
}

/// Resolve names and build an initialized automaton.
///
/// The family is taken from the first rule; every other rule and the initializer must
/// share it.
pub fn build(
    config: &AutomatonConfig,
    rules: &[&str],
    initializer: &str,
    rule_params: &RuleParams,
    init_params: &InitParams,
) -> Result<AnyAutomaton> {
    config.validate()?;
    init_params.validate_for(config)?;
    let kinds = rules
        .iter()
        .map(|name| name.parse::<RuleKind>())
        .collect::<Result<Vec<_>>>()?;
    let family = kinds
        .first()
        .map(|kind| kind.family())
        .ok_or_else(|| Error::InvalidParameter {
            name: "rules",
            reason: "at least one rule is required".into(),
        })?;
    let init: InitKind = initializer.parse()?;

    Ok(match family {
        Family::Bool => {
            let rules = kinds
                .iter()
                .map(|k| k.bool_rule(rule_params))
                .collect::<Result<Vec<_>>>()?;
            AnyAutomaton::Bool(Automaton::new(config, rules, &init.bool_init(init_params)?)?)
        }
        Family::Brain => {
            let rules = kinds
                .iter()
                .map(|k| k.brain_rule(rule_params))
                .collect::<Result<Vec<_>>>()?;
            AnyAutomaton::Brain(Automaton::new(config, rules, &init.brain_init(init_params)?)?)
        }
        Family::Pulse => {
            let rules = kinds
                .iter()
                .map(|k| k.pulse_rule(rule_params))
                .collect::<Result<Vec<_>>>()?;
            AnyAutomaton::Pulse(Automaton::new(config, rules, &init.pulse_init(init_params)?)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small() -> AutomatonConfig {
        AutomatonConfig {
            width: 16,
            height: 12,
            interval_ms: 0,
            seed: 21,
            ..Default::default()
        }
    }

    #[test]
    fn names_are_unique_and_parse_back() {
        let names: HashSet<_> = RuleKind::into_enum_iter().map(RuleKind::name).collect();
        assert_eq!(names.len(), RuleKind::into_enum_iter().count());
        for kind in RuleKind::into_enum_iter() {
            assert_eq!(kind.name().parse::<RuleKind>().unwrap(), kind);
        }
        let names: HashSet<_> = InitKind::into_enum_iter().map(InitKind::name).collect();
        assert_eq!(names.len(), InitKind::into_enum_iter().count());
        for kind in InitKind::into_enum_iter() {
            assert_eq!(kind.name().parse::<InitKind>().unwrap(), kind);
        }
        assert!(matches!(
            "seeds".parse::<InitKind>(),
            Err(Error::UnknownName { kind: "initializer", .. })
        ));
    }

    #[test]
    fn every_rule_builds_for_its_family() {
        let params = RuleParams::default();
        for kind in RuleKind::into_enum_iter() {
            let built = match kind.family() {
                Family::Bool => kind.bool_rule(&params).map(|_| ()),
                Family::Brain => kind.brain_rule(&params).map(|_| ()),
                Family::Pulse => kind.pulse_rule(&params).map(|_| ()),
            };
            assert!(built.is_ok(), "{}", kind.name());
        }
        assert!(RuleKind::BriansBrain.bool_rule(&params).is_err());
        assert!(RuleKind::GameOfLife.pulse_rule(&params).is_err());
    }

    #[test]
    fn builds_each_family() {
        let rules = RuleParams::default();
        let init = InitParams {
            population: 20,
            radius: 4,
            ..Default::default()
        };
        let mut life = build(&small(), &["life"], "uniform", &rules, &init).unwrap();
        let mut brain = build(&small(), &["brians_brain"], "brain_seeds", &rules, &init).unwrap();
        let mut pulse = build(&small(), &["pulse_weaver"], "pulse_field", &rules, &init).unwrap();
        assert_eq!(brain.live_count(), 20);
        for automaton in [&mut life, &mut brain, &mut pulse] {
            automaton.step().unwrap();
            assert_eq!(automaton.generation(), 1);
            assert_eq!(automaton.frame().lines().count(), 12);
        }
        assert_eq!(pulse.family(), Family::Pulse);
    }

    #[test]
    fn mixed_families_are_rejected() {
        let rules = RuleParams::default();
        let init = InitParams::default();
        assert!(build(&small(), &["life", "brians_brain"], "uniform", &rules, &init).is_err());
        assert!(build(&small(), &["life"], "pulse_field", &rules, &init).is_err());
        assert!(build(&small(), &[], "uniform", &rules, &init).is_err());
    }

    #[test]
    fn last_rule_in_a_chain_wins() {
        let rules = RuleParams::default();
        let init = InitParams {
            probability: 0.0,
            baseline: true,
            radius: 4,
            ..Default::default()
        };
        let build_chain =
            |names: &[&str]| build(&small(), names, "uniform", &rules, &init).unwrap();
        let mut rain_then_lichens = build_chain(&["candle_rain", "lichens"]);
        let mut lichens = build_chain(&["lichens"]);
        let mut lichens_then_rain = build_chain(&["lichens", "candle_rain"]);
        assert_eq!(lichens.live_count(), 16);

        for automaton in [&mut rain_then_lichens, &mut lichens, &mut lichens_then_rain] {
            automaton.step().unwrap();
        }
        // The baseline seeds the rows on either side of it across the wrap.
        assert_eq!(lichens.live_count(), 48);
        assert_eq!(rain_then_lichens.frame(), lichens.frame());
        // Rain reads the same snapshot and overwrites what lichens grew.
        assert!(lichens_then_rain.live_count() <= 16);
    }
}
