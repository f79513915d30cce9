//! Ping-pong grid buffers
//!
//! Two grids are allocated once per run. Each step reads `current`, writes
//! `next`, then the two are swapped so the new generation becomes readable
//! and the old storage becomes scratch space.

use super::step_forest_cpu;
use crate::error::SimError;
use crate::grid::CellGrid;

/// Current/next grid pair owned for the duration of a run
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    current: CellGrid,
    next: CellGrid,
}

impl DoubleBuffer {
    /// Wrap an initial grid, allocating an `Empty` scratch grid of the same shape
    ///
    /// # Errors
    ///
    /// Never fails for a grid that was itself constructed successfully; the
    /// error is forwarded from the scratch allocation.
    pub fn new(current: CellGrid) -> Result<Self, SimError> {
        let next = CellGrid::new(current.width(), current.height())?;
        Ok(Self { current, next })
    }

    /// Readable generation
    pub fn current(&self) -> &CellGrid {
        &self.current
    }

    /// Scratch generation (contents are stale between steps)
    pub fn next(&self) -> &CellGrid {
        &self.next
    }

    /// Compute the next generation and make it current
    pub fn advance(&mut self) {
        step_forest_cpu(&self.current, &mut self.next);
        self.swap();
    }

    /// Exchange the roles of the two grids without copying cells
    fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Consume the buffers, keeping the readable generation
    pub fn into_current(self) -> CellGrid {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::CellState;

    #[test]
    fn test_advance_swaps_roles() {
        let mut grid = CellGrid::with_state(3, 3, CellState::Tree).unwrap();
        grid.set(1, 1, CellState::Fire);
        let initial = grid.clone();
        let mut buffers = DoubleBuffer::new(grid).unwrap();

        buffers.advance();
        assert_eq!(buffers.current().get(1, 1), CellState::Charred);
        assert_eq!(buffers.current().get(0, 0), CellState::Fire);
        // Old generation now sits in the scratch slot
        assert_eq!(buffers.next(), &initial);
    }

    #[test]
    fn test_swap_reuses_allocations() {
        let mut buffers = DoubleBuffer::new(CellGrid::new(16, 16).unwrap()).unwrap();
        let first = buffers.current().as_slice().as_ptr();
        let second = buffers.next().as_slice().as_ptr();

        buffers.advance();
        assert_eq!(buffers.current().as_slice().as_ptr(), second);
        assert_eq!(buffers.next().as_slice().as_ptr(), first);

        buffers.advance();
        assert_eq!(buffers.current().as_slice().as_ptr(), first);
    }

    #[test]
    fn test_burn_out_sequence() {
        let mut grid = CellGrid::with_state(5, 1, CellState::Tree).unwrap();
        grid.set(0, 0, CellState::Fire);
        let mut buffers = DoubleBuffer::new(grid).unwrap();

        // Fire travels both ways around the ring and meets on the far side
        buffers.advance();
        buffers.advance();
        buffers.advance();
        let grid = buffers.into_current();
        assert!(grid.as_slice().iter().all(|&s| s == CellState::Charred));
    }
}
