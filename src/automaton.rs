//! The generation loop.

use crate::config::AutomatonConfig;
use crate::{
    CellRng, CellState, Context, Error, Initializer, PublishError, Result, Rule, SquareGrid,
};
use rand::SeedableRng;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Receives every committed generation.
pub type Consumer<S> =
    Box<dyn FnMut(&SquareGrid<S>) -> std::result::Result<(), PublishError> + Send>;

/// Stops [`Automaton::run`] between generations. Clones share one flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (flag, wake) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `timeout` or until cancelled, whichever comes first.
    /// Returns whether the token is cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, wake) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = wake
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Why [`Automaton::run`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Cancelled,
    GenerationLimit,
}

/// Outcome of a [`Automaton::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub end: RunEnd,
    /// Generations committed by this call.
    pub generations: u64,
    /// Live cells in the last committed generation.
    pub live: usize,
}

/// A grid, the rules that advance it, and the pacing of the loop.
pub struct Automaton<S> {
    grid: SquareGrid<S>,
    rules: Vec<Box<dyn Rule<S>>>,
    interval: Duration,
    seed: u64,
    generation: u64,
    parallel: bool,
    max_generations: Option<u64>,
    consumer: Option<Consumer<S>>,
}

impl<S: CellState> Automaton<S> {
    /// Build the grid described by `config` and run `initializer` on it.
    pub fn new<I>(
        config: &AutomatonConfig,
        rules: Vec<Box<dyn Rule<S>>>,
        initializer: &I,
    ) -> Result<Self>
    where
        I: Initializer<S> + ?Sized,
    {
        config.validate()?;
        let mut grid = SquareGrid::try_new(config.width, config.height)?;
        initializer.initialize(&mut grid, &mut CellRng::seed_from_u64(config.seed))?;
        Ok(Automaton {
            grid,
            rules,
            interval: config.interval(),
            seed: config.seed,
            generation: 0,
            parallel: config.parallel,
            max_generations: config.max_generations,
            consumer: None,
        })
    }

    /// Wrap a grid that is already initialized.
    pub fn from_grid(grid: SquareGrid<S>, rules: Vec<Box<dyn Rule<S>>>) -> Self {
        let defaults = AutomatonConfig::default();
        Automaton {
            grid,
            rules,
            interval: defaults.interval(),
            seed: defaults.seed,
            generation: 0,
            parallel: defaults.parallel,
            max_generations: None,
            consumer: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_generations(mut self, max: Option<u64>) -> Self {
        self.max_generations = max;
        self
    }

    /// Register the consumer invoked after each commit.
    pub fn with_consumer<F>(mut self, consumer: F) -> Self
    where
        F: FnMut(&SquareGrid<S>) -> std::result::Result<(), PublishError> + Send + 'static,
    {
        self.consumer = Some(Box::new(consumer));
        self
    }

    pub fn grid(&self) -> &SquareGrid<S> {
        &self.grid
    }

    pub fn into_grid(self) -> SquareGrid<S> {
        self.grid
    }

    /// Number of generations committed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> &[Box<dyn Rule<S>>] {
        &self.rules[..]
    }

    /// Advance one generation: compute every cell, commit, then publish.
    ///
    /// A publish failure is returned after the commit, so the grid is left at the new
    /// generation either way.
    pub fn step(&mut self) -> Result<()> {
        let ctx = Context::new(self.seed, self.generation);
        self.grid.cycle(&self.rules, ctx, self.parallel)?;
        self.generation += 1;
        debug!(
            generation = self.generation,
            live = self.grid.live_count(),
            "committed generation"
        );
        self.publish()
    }

    fn publish(&mut self) -> Result<()> {
        let generation = self.generation;
        match self.consumer.as_mut() {
            Some(consumer) => consumer(&self.grid).map_err(|source| {
                warn!(generation, error = %source, "failed to publish generation");
                Error::Publish { generation, source }
            }),
            None => Ok(()),
        }
    }

    /// Wait the interval, then step, until cancelled or the generation limit is reached.
    ///
    /// Cancellation is only observed between generations; a step that has started always
    /// commits.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<RunSummary> {
        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            rules = self.rules.len(),
            interval_ms = self.interval.as_millis() as u64,
            max_generations = ?self.max_generations,
            "automaton starting"
        );
        let start = self.generation;
        let end = loop {
            if self
                .max_generations
                .map_or(false, |max| self.generation - start >= max)
            {
                break RunEnd::GenerationLimit;
            }
            if cancel.wait_timeout(self.interval) {
                break RunEnd::Cancelled;
            }
            self.step()?;
        };
        let summary = RunSummary {
            end,
            generations: self.generation - start,
            live: self.grid.live_count(),
        };
        info!(
            reason = ?summary.end,
            generations = summary.generations,
            live = summary.live,
            "automaton stopped"
        );
        Ok(summary)
    }
}

impl<S: CellState> std::fmt::Debug for Automaton<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("generation", &self.generation)
            .field("seed", &self.seed)
            .field("parallel", &self.parallel)
            .finish()
    }
}
