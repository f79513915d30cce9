//! Forest-fire transition rule
//!
//! Burning cells char, trees next to fire ignite, everything else stays put.
//! All cells read the same `current` snapshot and write only their own slot
//! of `next`, which is what lets rows run in parallel without locks.

use crate::core_types::CellState;
use crate::grid::CellGrid;
use rayon::prelude::*;

/// Row/column offsets of the Moore neighborhood (the cell itself excluded)
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// State of `(row, col)` after one step, read from `current` only
#[inline]
pub fn next_state(current: &CellGrid, row: usize, col: usize) -> CellState {
    match current.get(row, col) {
        CellState::Fire => CellState::Charred,
        CellState::Tree => {
            if has_burning_neighbor(current, row, col) {
                CellState::Fire
            } else {
                CellState::Tree
            }
        }
        absorbing @ (CellState::Empty | CellState::Charred) => absorbing,
    }
}

/// OR over the eight wrapped neighbors; stops at the first fire found
#[inline]
fn has_burning_neighbor(current: &CellGrid, row: usize, col: usize) -> bool {
    MOORE_OFFSETS
        .iter()
        .any(|&(d_row, d_col)| current.wrapped(row, col, d_row, d_col).is_burning())
}

/// Write the next generation of `current` into `next`
///
/// Every cell of `next` is overwritten, so its previous contents never matter.
/// Rows are computed in parallel; the neighbor scan inside a cell is serial.
///
/// # Panics
///
/// Panics if the two grids differ in dimensions.
pub fn step_forest_cpu(current: &CellGrid, next: &mut CellGrid) {
    assert!(current.same_shape(next), "buffer dimensions differ");
    let width = current.width();

    next.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = next_state(current, row, col);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::CellState::{Charred as C, Empty as E, Fire as F, Tree as T};

    fn stepped(rows: Vec<Vec<CellState>>) -> CellGrid {
        let current = CellGrid::from_rows(rows).unwrap();
        let mut next = CellGrid::new(current.width(), current.height()).unwrap();
        step_forest_cpu(&current, &mut next);
        next
    }

    #[test]
    fn test_fire_chars() {
        let next = stepped(vec![vec![E, E, E], vec![E, F, E], vec![E, E, E]]);
        assert_eq!(next.get(1, 1), C);
        assert_eq!(next.census().fire, 0);
    }

    #[test]
    fn test_all_neighbors_ignite() {
        let next = stepped(vec![vec![T, T, T], vec![T, F, T], vec![T, T, T]]);
        let expected =
            CellGrid::from_rows(vec![vec![F, F, F], vec![F, C, F], vec![F, F, F]]).unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_empty_and_charred_absorb() {
        let next = stepped(vec![vec![E, F, C], vec![C, E, F], vec![F, C, E]]);
        assert_eq!(next.get(0, 0), E);
        assert_eq!(next.get(0, 2), C);
        assert_eq!(next.get(1, 1), E);
        assert_eq!(next.get(2, 1), C);
    }

    #[test]
    fn test_diagonal_neighbor_counts() {
        let next = stepped(vec![
            vec![F, E, E, E],
            vec![E, T, E, E],
            vec![E, E, E, E],
            vec![E, E, E, E],
        ]);
        assert_eq!(next.get(1, 1), F);
    }

    #[test]
    fn test_wraparound_rows_and_columns() {
        // Fire in the bottom-right corner reaches all three other corners
        let mut current = CellGrid::with_state(5, 4, CellState::Tree).unwrap();
        current.set(3, 4, F);
        let mut next = CellGrid::new(5, 4).unwrap();
        step_forest_cpu(&current, &mut next);

        assert_eq!(next.get(0, 0), F);
        assert_eq!(next.get(0, 4), F);
        assert_eq!(next.get(3, 0), F);
        assert_eq!(next.get(3, 4), C);
        // Two columns away even after wrapping
        assert_eq!(next.get(0, 2), T);
        assert_eq!(next.get(1, 1), T);
    }

    #[test]
    fn test_no_leak_within_a_step() {
        // A line of trees only burns one cell further per step; the last
        // column touches the first through the wrap
        let next = stepped(vec![vec![F, T, T, T, T, E, T]]);
        assert_eq!(next.as_slice(), &[C, F, T, T, T, E, F][..]);
    }

    #[test]
    #[should_panic(expected = "buffer dimensions differ")]
    fn test_shorter_next_rejected() {
        let current = CellGrid::with_state(3, 4, T).unwrap();
        let mut next = CellGrid::new(3, 2).unwrap();
        step_forest_cpu(&current, &mut next);
    }

    #[test]
    #[should_panic(expected = "buffer dimensions differ")]
    fn test_taller_next_rejected() {
        let current = CellGrid::with_state(3, 2, T).unwrap();
        let mut next = CellGrid::new(3, 4).unwrap();
        step_forest_cpu(&current, &mut next);
    }

    #[test]
    fn test_next_contents_overwritten() {
        let current = CellGrid::from_rows(vec![vec![E, T], vec![T, E]]).unwrap();
        let mut next = CellGrid::with_state(2, 2, CellState::Charred).unwrap();
        step_forest_cpu(&current, &mut next);
        assert_eq!(next, current);
    }
}
