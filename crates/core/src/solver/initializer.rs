//! Random forest seeding
//!
//! Each cell independently becomes a tree with the configured probability,
//! then the center cell is ignited. Rows draw from separate `ChaCha` streams of
//! one seed, so rows can be filled in parallel and the result depends only on
//! the seed and the run parameters.

use super::DoubleBuffer;
use crate::core_types::CellState;
use crate::error::SimError;
use crate::grid::CellGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Allocate both buffers and seed the readable one
///
/// The `next` buffer starts all `Empty`; it is fully overwritten by the first
/// step before anything reads it.
///
/// # Errors
///
/// Returns [`SimError::InvalidDimension`] for a zero-sized grid and
/// [`SimError::InvalidTreeProbability`] for a probability outside `[0, 1]`.
pub fn initialize(
    width: usize,
    height: usize,
    tree_probability: f64,
    seed: u64,
) -> Result<DoubleBuffer, SimError> {
    validate_tree_probability(tree_probability)?;

    let mut current = CellGrid::new(width, height)?;
    populate_forest(&mut current, tree_probability, seed);
    ignite_center(&mut current);

    DoubleBuffer::new(current)
}

/// Reject probabilities that are not finite or fall outside `[0, 1]`
///
/// # Errors
///
/// Returns [`SimError::InvalidTreeProbability`] carrying the rejected value.
pub fn validate_tree_probability(tree_probability: f64) -> Result<(), SimError> {
    if tree_probability.is_finite() && (0.0..=1.0).contains(&tree_probability) {
        Ok(())
    } else {
        Err(SimError::InvalidTreeProbability(tree_probability))
    }
}

/// Overwrite every cell with `Tree` or `Empty` from independent uniform draws
pub fn populate_forest(grid: &mut CellGrid, tree_probability: f64, seed: u64) {
    let width = grid.width();
    let base = ChaCha8Rng::seed_from_u64(seed);

    grid.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, cells)| {
            let mut rng = base.clone();
            rng.set_stream(row as u64);
            for cell in cells {
                let draw: f64 = rng.random();
                *cell = if draw < tree_probability {
                    CellState::Tree
                } else {
                    CellState::Empty
                };
            }
        });
}

/// Set `(height / 2, width / 2)` on fire regardless of what was drawn there
pub fn ignite_center(grid: &mut CellGrid) {
    let (row, col) = grid.center();
    grid.set(row, col, CellState::Fire);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_validation() {
        assert!(validate_tree_probability(0.0).is_ok());
        assert!(validate_tree_probability(0.45).is_ok());
        assert!(validate_tree_probability(1.0).is_ok());
        assert!(validate_tree_probability(-0.01).is_err());
        assert!(validate_tree_probability(1.01).is_err());
        assert!(validate_tree_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_single_fire_at_center() {
        let buffers = initialize(31, 17, 0.6, 7).unwrap();
        let grid = buffers.current();
        let (row, col) = grid.center();
        assert_eq!((row, col), (8, 15));
        assert_eq!(grid.get(row, col), CellState::Fire);
        assert_eq!(grid.census().fire, 1);
        assert_eq!(grid.census().charred, 0);
    }

    #[test]
    fn test_probability_bounds() {
        let empty = initialize(20, 20, 0.0, 1).unwrap();
        let census = empty.current().census();
        assert_eq!(census.empty, 399);
        assert_eq!(census.fire, 1);

        let full = initialize(20, 20, 1.0, 1).unwrap();
        let census = full.current().census();
        assert_eq!(census.tree, 399);
        assert_eq!(census.fire, 1);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let a = initialize(64, 48, 0.45, 2022).unwrap();
        let b = initialize(64, 48, 0.45, 2022).unwrap();
        assert_eq!(a.current(), b.current());

        let c = initialize(64, 48, 0.45, 2023).unwrap();
        assert_ne!(a.current(), c.current());
    }

    #[test]
    fn test_tree_density_tracks_probability() {
        let buffers = initialize(200, 200, 0.45, 11).unwrap();
        let trees = buffers.current().census().tree as f64;
        let fraction = trees / 40_000.0;
        assert!(
            (fraction - 0.45).abs() < 0.02,
            "tree fraction {fraction} too far from 0.45"
        );
    }

    #[test]
    fn test_next_buffer_starts_empty() {
        let buffers = initialize(8, 8, 1.0, 3).unwrap();
        assert!(buffers
            .next()
            .as_slice()
            .iter()
            .all(|&s| s == CellState::Empty));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            initialize(0, 10, 0.5, 0),
            Err(SimError::InvalidDimension { .. })
        ));
        assert!(matches!(
            initialize(10, 10, 2.0, 0),
            Err(SimError::InvalidTreeProbability(_))
        ));
    }
}
