//! Run statistics
//!
//! Gathered from the census of each recorded snapshot.

use crate::grid::CellCensus;
use serde::{Deserialize, Serialize};

/// Snapshot statistics at one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Time step (0 = initial state)
    pub step: usize,
    /// Cell counts at this step
    pub census: CellCensus,
    /// Fraction of the initial fuel (trees plus the ignition cell) now charred
    pub burned_fraction: f64,
}

impl SimulationStats {
    pub fn new(step: usize, census: CellCensus, initial: &CellCensus) -> Self {
        let fuel = initial.tree + initial.fire;
        let burned_fraction = if fuel == 0 {
            0.0
        } else {
            census.charred as f64 / fuel as f64
        };
        Self {
            step,
            census,
            burned_fraction,
        }
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed the initial forest was drawn from
    pub seed: u64,
    /// Transitions performed
    pub steps_run: usize,
    /// Blocks written to the history sink
    pub blocks_recorded: usize,
    /// Census right after initialization
    pub initial: CellCensus,
    /// Census after the last step
    pub final_census: CellCensus,
    /// Largest number of burning cells seen
    pub peak_fire: usize,
    /// First step at which `peak_fire` was reached
    pub peak_fire_step: usize,
}

impl RunSummary {
    /// Fraction of the initial fuel that ended up charred
    pub fn burned_fraction(&self) -> f64 {
        SimulationStats::new(self.steps_run, self.final_census, &self.initial).burned_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burned_fraction() {
        let initial = CellCensus {
            empty: 5,
            tree: 3,
            fire: 1,
            charred: 0,
        };
        let later = CellCensus {
            empty: 5,
            tree: 1,
            fire: 1,
            charred: 2,
        };
        let stats = SimulationStats::new(2, later, &initial);
        assert_eq!(stats.step, 2);
        assert!((stats.burned_fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_fuel_means_nothing_burned() {
        let census = CellCensus {
            empty: 4,
            ..CellCensus::default()
        };
        assert_eq!(SimulationStats::new(0, census, &census).burned_fraction, 0.0);
    }
}
