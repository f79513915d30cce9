//! Toroidal cell grid storage
//!
//! Stores the forest as a flat `Vec<CellState>` in row-major order. Rows and
//! columns wrap at the edges, so the grid behaves like the surface of a torus.

use super::CellCensus;
use crate::core_types::CellState;
use crate::error::SimError;

/// Fixed-size forest grid
///
/// Dimensions are set at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    /// Cell states in row-major order (row * width + column)
    cells: Vec<CellState>,
    /// Grid width in cells (columns)
    width: usize,
    /// Grid height in cells (rows)
    height: usize,
}

impl CellGrid {
    /// Create a new grid with all cells `Empty`
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimension`] if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        Self::with_state(width, height, CellState::Empty)
    }

    /// Create a new grid with every cell set to `state`
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimension`] if `width` or `height` is zero.
    pub fn with_state(width: usize, height: usize, state: CellState) -> Result<Self, SimError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            cells: vec![state; width * height],
            width,
            height,
        })
    }

    /// Build a grid from explicit rows
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimension`] for no rows or empty rows, and
    /// [`SimError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, SimError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        validate_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (row, states) in rows.into_iter().enumerate() {
            if states.len() != width {
                return Err(SimError::RaggedRows {
                    row,
                    expected: width,
                    found: states.len(),
                });
            }
            cells.extend(states);
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `other` has the same dimensions
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get state at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        assert!(
            row < self.height && col < self.width,
            "Coordinates out of bounds"
        );
        self.cells[row * self.width + col]
    }

    /// Set state at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        assert!(
            row < self.height && col < self.width,
            "Coordinates out of bounds"
        );
        self.cells[row * self.width + col] = state;
    }

    /// Get state at `(row + d_row, col + d_col)` with periodic boundaries
    ///
    /// Offsets may be negative and of any magnitude.
    #[inline]
    pub fn wrapped(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> CellState {
        let r = wrap_index(row, d_row, self.height);
        let c = wrap_index(col, d_col, self.width);
        self.cells[r * self.width + c]
    }

    /// The ignition cell: `(height / 2, width / 2)`
    pub fn center(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.width)
    }

    /// Get reference to cell data
    pub fn as_slice(&self) -> &[CellState] {
        &self.cells
    }

    /// Get mutable reference to cell data
    pub fn as_mut_slice(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Fill entire grid with a state
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Count cells in each state
    pub fn census(&self) -> CellCensus {
        self.cells.iter().copied().collect()
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), SimError> {
    if width == 0 {
        return Err(SimError::InvalidDimension {
            axis: "width",
            value: width,
        });
    }
    if height == 0 {
        return Err(SimError::InvalidDimension {
            axis: "height",
            value: height,
        });
    }
    Ok(())
}

/// Periodic index: `(index + offset) mod len`, always in `0..len`
#[inline]
pub(crate) fn wrap_index(index: usize, offset: isize, len: usize) -> usize {
    let len_i = len as isize;
    (index as isize + offset).rem_euclid(len_i) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = CellGrid::new(10, 20).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.as_slice().len(), 200);
        assert!(grid.as_slice().iter().all(|&s| s == CellState::Empty));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            CellGrid::new(0, 5),
            Err(SimError::InvalidDimension { axis: "width", .. })
        ));
        assert!(matches!(
            CellGrid::new(5, 0),
            Err(SimError::InvalidDimension { axis: "height", .. })
        ));
        assert!(CellGrid::from_rows(Vec::new()).is_err());
        assert!(CellGrid::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_get_set_row_major() {
        let mut grid = CellGrid::new(4, 3).unwrap();
        grid.set(1, 2, CellState::Tree);
        assert_eq!(grid.get(1, 2), CellState::Tree);
        assert_eq!(grid.as_slice()[4 + 2], CellState::Tree);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let grid = CellGrid::new(3, 3).unwrap();
        let _ = grid.get(3, 0);
    }

    #[test]
    fn test_wrapped_access() {
        let mut grid = CellGrid::new(5, 4).unwrap();
        grid.set(3, 4, CellState::Fire);
        // Up-left of the origin lands on the opposite corner
        assert_eq!(grid.wrapped(0, 0, -1, -1), CellState::Fire);
        assert_eq!(grid.wrapped(3, 4, 4, 5), CellState::Fire);
        assert_eq!(grid.wrapped(0, 0, 1, 1), CellState::Empty);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 7), 6);
        assert_eq!(wrap_index(6, 1, 7), 0);
        assert_eq!(wrap_index(3, 0, 7), 3);
        assert_eq!(wrap_index(0, -15, 7), 6);
        assert_eq!(wrap_index(0, 1, 1), 0);
    }

    #[test]
    fn test_from_rows() {
        use crate::core_types::CellState::{Empty as E, Tree as T};
        let grid = CellGrid::from_rows(vec![vec![T, E, T], vec![E, T, E]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 1), T);

        let ragged = CellGrid::from_rows(vec![vec![T, E], vec![E]]);
        assert!(matches!(
            ragged,
            Err(SimError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_center_uses_integer_division() {
        let grid = CellGrid::new(300, 301).unwrap();
        assert_eq!(grid.center(), (150, 150));
        let grid = CellGrid::new(1, 1).unwrap();
        assert_eq!(grid.center(), (0, 0));
    }

    #[test]
    fn test_rows_iterator() {
        let mut grid = CellGrid::new(3, 2).unwrap();
        grid.set(1, 0, CellState::Charred);
        let rows: Vec<&[CellState]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], CellState::Charred);
    }
}
