//! Per-state cell counts

use crate::core_types::CellState;
use serde::{Deserialize, Serialize};

/// Number of cells in each state at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCensus {
    pub empty: usize,
    pub tree: usize,
    pub fire: usize,
    pub charred: usize,
}

impl CellCensus {
    /// Total number of cells counted
    pub fn total(&self) -> usize {
        self.empty + self.tree + self.fire + self.charred
    }

    /// Count for a single state
    pub fn count(&self, state: CellState) -> usize {
        match state {
            CellState::Empty => self.empty,
            CellState::Tree => self.tree,
            CellState::Fire => self.fire,
            CellState::Charred => self.charred,
        }
    }

    fn add(&mut self, state: CellState) {
        match state {
            CellState::Empty => self.empty += 1,
            CellState::Tree => self.tree += 1,
            CellState::Fire => self.fire += 1,
            CellState::Charred => self.charred += 1,
        }
    }
}

impl FromIterator<CellState> for CellCensus {
    fn from_iter<I: IntoIterator<Item = CellState>>(iter: I) -> Self {
        let mut census = Self::default();
        for state in iter {
            census.add(state);
        }
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_counts() {
        let census: CellCensus = [
            CellState::Tree,
            CellState::Tree,
            CellState::Fire,
            CellState::Empty,
        ]
        .into_iter()
        .collect();

        assert_eq!(census.tree, 2);
        assert_eq!(census.fire, 1);
        assert_eq!(census.empty, 1);
        assert_eq!(census.charred, 0);
        assert_eq!(census.total(), 4);
        assert_eq!(census.count(CellState::Tree), 2);
    }
}
