//! Run parameters
//!
//! A run is fully described by one immutable [`SimulationConfig`] handed to
//! the driver at construction.

use crate::error::SimError;
use crate::solver::validate_tree_probability;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 300;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 300;
/// Default number of transitions
pub const DEFAULT_STEPS: usize = 200;
/// Default fraction of cells seeded as trees
pub const DEFAULT_TREE_PROBABILITY: f64 = 0.45;
/// Default history location
pub const DEFAULT_OUTPUT_PATH: &str = "data/output.csv";

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Number of transitions; the history holds `steps + 1` blocks
    pub steps: usize,
    /// Probability that an initial cell is a tree, in `[0, 1]`
    pub tree_probability: f64,
    /// History sink location
    pub output_path: PathBuf,
    /// Seed for the initial forest; drawn at random when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            steps: DEFAULT_STEPS,
            tree_probability: DEFAULT_TREE_PROBABILITY,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Config with the given grid size and defaults elsewhere
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn tree_probability(mut self, tree_probability: f64) -> Self {
        self.tree_probability = tree_probability;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Check every parameter before any simulation work
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimension`] for a zero width or height and
    /// [`SimError::InvalidTreeProbability`] for a probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width == 0 {
            return Err(SimError::InvalidDimension {
                axis: "width",
                value: self.width,
            });
        }
        if self.height == 0 {
            return Err(SimError::InvalidDimension {
                axis: "height",
                value: self.height,
            });
        }
        validate_tree_probability(self.tree_probability)
    }

    /// Number of blocks a complete run records
    pub fn expected_blocks(&self) -> usize {
        self.steps + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 300);
        assert_eq!(config.steps, 200);
        assert_eq!(config.tree_probability, 0.45);
        assert_eq!(config.output_path, PathBuf::from("data/output.csv"));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_blocks(), 201);
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::with_dimensions(3, 4)
            .steps(1)
            .tree_probability(1.0)
            .seed(9)
            .output_path("out.csv");
        assert_eq!((config.width, config.height), (3, 4));
        assert_eq!(config.steps, 1);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_validation_errors() {
        let err = SimulationConfig::with_dimensions(0, 10).validate().unwrap_err();
        assert!(err.is_configuration());

        let err = SimulationConfig::with_dimensions(10, 0).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidDimension { axis: "height", .. }));

        let err = SimulationConfig::default()
            .tree_probability(-0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidTreeProbability(_)));
    }
}
