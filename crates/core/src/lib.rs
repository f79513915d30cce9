//! Forest Fire Cellular Automaton Core Library
//!
//! Simulates fire spreading through a randomly seeded forest on a toroidal
//! grid. Each cell is empty ground, a tree, fire or charred remains; on every
//! step burning cells char and trees next to fire ignite. The full state of
//! the grid is recorded after initialization and after every step.
//!
//! ## Running a simulation
//!
//! ```rust
//! use forest_fire_core::{ForestFireSimulation, MemoryHistory, SimulationConfig};
//!
//! let config = SimulationConfig::with_dimensions(40, 30)
//!     .steps(10)
//!     .tree_probability(0.55)
//!     .seed(2022);
//! let mut history = MemoryHistory::new();
//! let summary = ForestFireSimulation::new(config)
//!     .unwrap()
//!     .run(&mut history)
//!     .unwrap();
//!
//! assert_eq!(summary.blocks_recorded, 11);
//! ```

pub mod error;

// Core types and utilities
pub mod core_types;

// Grid storage, solver kernels and history output
pub mod grid;
pub mod history;
pub mod solver;

// Run orchestration
pub mod simulation;

// Animated output of recorded runs
pub mod render;

pub use core_types::CellState;
pub use error::SimError;
pub use grid::{CellCensus, CellGrid};
pub use history::{load_history, read_history, CsvHistoryFile, HistorySink, MemoryHistory};
pub use simulation::{
    run_simulation, ForestFireSimulation, RunPhase, RunSummary, SimulationConfig,
    SimulationStats,
};
pub use render::{render_history_gif, write_gif, RenderOptions};
pub use solver::{initialize, step_forest_cpu, DoubleBuffer};
