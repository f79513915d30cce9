//! Simulation driver
//!
//! [`ForestFireSimulation`] owns the grid buffers for one run and walks the
//! phases `Uninitialized → Seeded → Running(t) → Done`, recording one history
//! block on entry to every phase but `Done`. The number of steps is fixed up
//! front: a run never stops early because the fire went out.
//!
//! A block that cannot be recorded ends the run in `Failed`. The grid has
//! already moved on by then, so continuing would leave a gap in the history.

pub mod config;
pub mod stats;

pub use config::SimulationConfig;
pub use stats::{RunSummary, SimulationStats};

use crate::grid::{CellCensus, CellGrid};
use crate::history::{CsvHistoryFile, HistorySink};
use crate::solver::{initialize, DoubleBuffer};
use crate::SimError;
use std::fmt;
use tracing::{debug, info};

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Nothing allocated or recorded yet
    Uninitialized,
    /// Initial forest built and recorded as block 0
    Seeded,
    /// `t` transitions done and recorded
    Running(usize),
    /// All transitions done
    Done,
    /// Recording failed; holds the transitions whose blocks were recorded
    Failed(usize),
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Seeded => f.write_str("seeded"),
            Self::Running(t) => write!(f, "running (step {t})"),
            Self::Done => f.write_str("done"),
            Self::Failed(t) => write!(f, "failed (after step {t})"),
        }
    }
}

/// One forest-fire run
pub struct ForestFireSimulation {
    config: SimulationConfig,
    seed: u64,
    phase: RunPhase,

    /// Caller-supplied starting grid, consumed when seeding
    initial_grid: Option<CellGrid>,
    buffers: Option<DoubleBuffer>,

    // Statistics
    initial_census: CellCensus,
    peak_fire: usize,
    peak_fire_step: usize,
    blocks_recorded: usize,
}

impl ForestFireSimulation {
    /// Create a run from validated parameters
    ///
    /// Without a configured seed one is drawn from the thread RNG and logged,
    /// so the run can be reproduced.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        info!(
            "Creating forest fire simulation: {}x{} grid, {} steps, tree probability {:.3}, seed {}",
            config.width, config.height, config.steps, config.tree_probability, seed
        );

        Ok(Self {
            config,
            seed,
            phase: RunPhase::Uninitialized,
            initial_grid: None,
            buffers: None,
            initial_census: CellCensus::default(),
            peak_fire: 0,
            peak_fire_step: 0,
            blocks_recorded: 0,
        })
    }

    /// Create a run that starts from `grid` instead of a random forest
    ///
    /// The config's dimensions are replaced by the grid's; its seed and tree
    /// probability are unused.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`SimulationConfig::validate`].
    pub fn with_initial_grid(
        mut config: SimulationConfig,
        grid: CellGrid,
    ) -> Result<Self, SimError> {
        config.width = grid.width();
        config.height = grid.height();
        let mut sim = Self::new(config)?;
        sim.initial_grid = Some(grid);
        Ok(sim)
    }

    /// Parameters of this run
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the initial forest is (or was) drawn from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    /// Current grid, once seeded
    pub fn current(&self) -> Option<&CellGrid> {
        self.buffers.as_ref().map(DoubleBuffer::current)
    }

    /// Transitions performed so far
    pub fn steps_taken(&self) -> usize {
        match self.phase {
            RunPhase::Uninitialized | RunPhase::Seeded => 0,
            RunPhase::Running(t) | RunPhase::Failed(t) => t,
            RunPhase::Done => self.config.steps,
        }
    }

    /// Build the initial grid and record it as block 0
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidPhase`] unless the run is uninitialized, or the
    /// sink's error if the block could not be recorded.
    pub fn initialize<S: HistorySink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SimulationStats, SimError> {
        if self.phase != RunPhase::Uninitialized {
            return Err(self.phase_error("initialize"));
        }

        let buffers = match self.initial_grid.take() {
            Some(grid) => DoubleBuffer::new(grid)?,
            None => initialize(
                self.config.width,
                self.config.height,
                self.config.tree_probability,
                self.seed,
            )?,
        };

        self.initial_census = buffers.current().census();
        info!(
            "Forest seeded: {} trees, {} empty, {} burning",
            self.initial_census.tree, self.initial_census.empty, self.initial_census.fire
        );

        let buffers = self.buffers.insert(buffers);
        if let Err(e) = sink.record(buffers.current()) {
            self.phase = RunPhase::Failed(0);
            return Err(e);
        }
        self.blocks_recorded += 1;
        self.phase = RunPhase::Seeded;

        Ok(self.track(0))
    }

    /// Perform one transition and record the result
    ///
    /// Moves to [`RunPhase::Done`] once the configured number of steps is
    /// reached. Advancing a seeded run with zero steps finishes it without
    /// stepping.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidPhase`] unless the run is seeded or running, or the
    /// sink's error if the block could not be recorded. After a recording
    /// error the run is [`RunPhase::Failed`] and cannot be advanced again.
    pub fn advance<S: HistorySink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SimulationStats, SimError> {
        let t = match self.phase {
            RunPhase::Seeded => 0,
            RunPhase::Running(t) => t,
            RunPhase::Uninitialized | RunPhase::Done | RunPhase::Failed(_) => {
                return Err(self.phase_error("advance"));
            }
        };
        let Some(buffers) = self.buffers.as_mut() else {
            return Err(self.phase_error("advance"));
        };

        if t >= self.config.steps {
            self.phase = RunPhase::Done;
            return Ok(self.track(t));
        }

        buffers.advance();
        if let Err(e) = sink.record(buffers.current()) {
            self.phase = RunPhase::Failed(t);
            return Err(e);
        }
        self.blocks_recorded += 1;

        let step = t + 1;
        self.phase = if step == self.config.steps {
            RunPhase::Done
        } else {
            RunPhase::Running(step)
        };
        Ok(self.track(step))
    }

    /// Drive the remaining phases to completion
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidPhase`] if the run is already done or failed, or the first
    /// recording error; the run stops at that point.
    pub fn run<S: HistorySink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary, SimError> {
        if matches!(self.phase, RunPhase::Done | RunPhase::Failed(_)) {
            return Err(self.phase_error("run"));
        }
        if self.phase == RunPhase::Uninitialized {
            self.initialize(sink)?;
        }
        while !self.is_done() {
            self.advance(sink)?;
        }

        let summary = self.summary();
        info!(
            "Simulation complete: {} steps, {} blocks, {} charred, {} trees left, peak fire {} at step {}",
            summary.steps_run,
            summary.blocks_recorded,
            summary.final_census.charred,
            summary.final_census.tree,
            summary.peak_fire,
            summary.peak_fire_step
        );
        Ok(summary)
    }

    /// Run to completion, recording into the configured output file
    ///
    /// # Errors
    ///
    /// As [`ForestFireSimulation::run`], plus failure to create the file.
    pub fn run_to_file(&mut self) -> Result<RunSummary, SimError> {
        let mut sink = CsvHistoryFile::create(&self.config.output_path)?;
        self.run(&mut sink)
    }

    /// Statistics gathered so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            steps_run: self.steps_taken(),
            blocks_recorded: self.blocks_recorded,
            initial: self.initial_census,
            final_census: self.current().map(CellGrid::census).unwrap_or_default(),
            peak_fire: self.peak_fire,
            peak_fire_step: self.peak_fire_step,
        }
    }

    fn track(&mut self, step: usize) -> SimulationStats {
        let census = self.current().map(CellGrid::census).unwrap_or_default();
        if census.fire > self.peak_fire {
            self.peak_fire = census.fire;
            self.peak_fire_step = step;
        }
        debug!(
            "Step {}: {} trees, {} burning, {} charred",
            step, census.tree, census.fire, census.charred
        );
        SimulationStats::new(step, census, &self.initial_census)
    }

    fn phase_error(&self, operation: &'static str) -> SimError {
        SimError::InvalidPhase {
            operation,
            phase: self.phase.to_string(),
        }
    }
}

/// Run a whole simulation into the file named by `config`
///
/// # Errors
///
/// Any configuration or history error; nothing is written for a bad config.
pub fn run_simulation(config: SimulationConfig) -> Result<RunSummary, SimError> {
    ForestFireSimulation::new(config)?.run_to_file()
}
