//! Grid storage and per-state bookkeeping

pub mod cell_grid;
pub mod census;

pub use cell_grid::CellGrid;
pub use census::CellCensus;
