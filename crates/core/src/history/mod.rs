//! Recorded state history
//!
//! The simulation appends one block per time step to a [`HistorySink`]; the
//! reader turns a recorded stream back into grids for analysis.

pub mod reader;
pub mod recorder;

pub use reader::{load_history, read_history};
pub use recorder::{write_block, CsvHistoryFile, HistorySink, MemoryHistory};
