use camgrid::config::{AutomatonConfig, InitParams, RuleParams};
use camgrid::init::{SpeciesPopulation, UniformRandom};
use camgrid::rules::*;
use camgrid::{
    catalogue, Automaton, BoolState, BrainPhase, BrainState, CancelToken, CellRng, Context,
    Initializer, Position, Rule, RunEnd, SquareGrid,
};
use rand::SeedableRng;
use std::thread;
use std::time::Duration;

fn boxed<R: Rule<BoolState> + 'static>(rule: R) -> Vec<Box<dyn Rule<BoolState>>> {
    vec![Box::new(rule)]
}

fn step(grid: &mut SquareGrid<BoolState>, rules: &[Box<dyn Rule<BoolState>>], generation: u64) {
    grid.cycle(rules, Context::new(3, generation), false).unwrap();
}

#[test]
fn diamonds_single_seed() {
    let mut grid = SquareGrid::from_active(5, 5, vec![(2, 2)]);
    grid.mirror_next_states();
    step(&mut grid, &boxed(Diamonds), 0);
    assert_eq!(
        grid.active_positions(),
        vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]
    );
}

#[test]
fn parity_single_seed_on_small_torus() {
    let mut grid = SquareGrid::from_active(3, 3, vec![(1, 1)]);
    grid.mirror_next_states();
    step(&mut grid, &boxed(Parity), 0);
    assert_eq!(
        grid.active_positions(),
        vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]
    );
    for &(x, y) in &[(0, 0), (2, 0), (0, 2), (2, 2)] {
        assert!(!grid.get_cell(x, y).state().value());
    }
}

#[test]
fn brians_brain_transitions() {
    use BrainPhase::*;
    let mut grid: SquareGrid<BrainState> = SquareGrid::new(7, 7);
    // Ready at (3, 3) between two firing cells; a lone refractory cell far away.
    grid.set_state(Position::new(2, 3), BrainState::new(Firing));
    grid.set_state(Position::new(4, 3), BrainState::new(Firing));
    grid.set_state(Position::new(0, 0), BrainState::new(Refractory));
    grid.allocate_next_states();
    let rules: Vec<Box<dyn Rule<BrainState>>> = vec![Box::new(BriansBrain)];
    grid.cycle(&rules, Context::new(0, 0), true).unwrap();

    assert_eq!(grid.state(Position::new(3, 3)).phase(), Firing);
    assert_eq!(grid.state(Position::new(2, 3)).phase(), Refractory);
    assert_eq!(grid.state(Position::new(4, 3)).phase(), Refractory);
    assert_eq!(grid.state(Position::new(0, 0)).phase(), Ready);
    assert_eq!(grid.state(Position::new(3, 3)).echo(), Ready);
}

#[test]
fn deterministic_rules_repeat() {
    let mut rng = CellRng::seed_from_u64(11);
    let mut start: SquareGrid<BoolState> = SquareGrid::new(24, 24);
    UniformRandom::new(0.4)
        .unwrap()
        .initialize(&mut start, &mut rng)
        .unwrap();
    let rules: Vec<Box<dyn Rule<BoolState>>> = vec![
        Box::new(GameOfLife),
        Box::new(Parity),
        Box::new(Diamonds),
        Box::new(Squares),
        Box::new(Triangles),
        Box::new(Banks),
        Box::new(Anneal),
        Box::new(Lichens),
        Box::new(OneOutOfEight),
        Box::new(SoilErosion),
    ];
    for rule in rules {
        let rule = vec![rule];
        let mut a = start.clone();
        let mut b = start.clone();
        a.cycle(&rule, Context::new(1, 0), false).unwrap();
        b.cycle(&rule, Context::new(99, 5), true).unwrap();
        assert_eq!(a.cells(), b.cells(), "{}", rule[0].name());
    }
}

#[test]
fn update_order_does_not_matter() {
    let mut rng = CellRng::seed_from_u64(5);
    let mut start: SquareGrid<BoolState> = SquareGrid::new(30, 30);
    SpeciesPopulation::new(4, 300)
        .unwrap()
        .initialize(&mut start, &mut rng)
        .unwrap();
    let rules = boxed(GeneticDrift::new(DiffusionMode::Handshake, false));
    let mut serial = start.clone();
    let mut parallel = start;
    for generation in 0..20 {
        serial.cycle(&rules, Context::new(8, generation), false).unwrap();
        parallel.cycle(&rules, Context::new(8, generation), true).unwrap();
    }
    assert_eq!(serial.cells(), parallel.cells());
    assert_eq!(serial.live_count(), 300);
}

#[test]
fn candle_rain_frequency() {
    let (num, den) = CandleRain::EXTINGUISH_RATIO;
    let mut grid = SquareGrid::from_fn(128, 128, |_| BoolState::new(true));
    grid.mirror_next_states();
    step(&mut grid, &boxed(CandleRain), 0);
    let trials = grid.size() as f64;
    let expected = trials * f64::from(num) / f64::from(den);
    let out = trials - grid.live_count() as f64;
    assert!((out - expected).abs() < 150.0, "{} went out, expected {}", out, expected);
}

#[test]
fn erosion_random_frequency() {
    let (num, den) = SoilErosionRandom::UPDATE_RATIO;
    // Isolated cells are never supported, so each one dies exactly when it is updated.
    let start = SquareGrid::from_fn(256, 256, |p| {
        BoolState::new(p.x() % 2 == 0 && p.y() % 2 == 0)
    });
    let rules = boxed(SoilErosionRandom);
    let mut trials = 0.0;
    let mut updated = 0.0;
    for generation in 0..8 {
        let mut grid = start.clone();
        grid.mirror_next_states();
        step(&mut grid, &rules, generation);
        trials += start.live_count() as f64;
        updated += (start.live_count() - grid.live_count()) as f64;
    }
    let expected = trials * f64::from(num) / f64::from(den);
    assert!(
        (updated - expected).abs() < 80.0,
        "{} updates, expected {}",
        updated,
        expected
    );
}

#[test]
fn cancel_from_another_thread() {
    let config = AutomatonConfig {
        width: 16,
        height: 16,
        interval_ms: 2,
        seed: 4,
        ..Default::default()
    };
    let mut automaton =
        Automaton::new(&config, boxed(GameOfLife), &UniformRandom::default()).unwrap();
    let token = CancelToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(40));
        remote.cancel();
    });
    let summary = automaton.run(&token).unwrap();
    canceller.join().unwrap();
    assert_eq!(summary.end, RunEnd::Cancelled);
    assert_eq!(summary.generations, automaton.generation());
    assert_eq!(summary.live, automaton.grid().live_count());
}

#[test]
fn seeded_runs_are_reproducible() {
    let config = AutomatonConfig {
        width: 20,
        height: 20,
        interval_ms: 0,
        seed: 77,
        max_generations: Some(15),
        ..Default::default()
    };
    let init = InitParams {
        population: 120,
        species: 3,
        radius: 6,
        ..Default::default()
    };
    let params = RuleParams::default();
    let names = ["genetic_drift", "random_anneal"];
    let mut a = catalogue::build(&config, &names, "species", &params, &init).unwrap();
    let mut b = catalogue::build(&config, &names, "species", &params, &init).unwrap();
    a.run(&CancelToken::new()).unwrap();
    b.run(&CancelToken::new()).unwrap();
    assert_eq!(a.generation(), 15);
    assert_eq!(a.frame(), b.frame());
}
