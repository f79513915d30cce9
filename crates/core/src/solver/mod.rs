//! Forest-fire solver: seeding, the transition rule and buffer management
//!
//! The data flow for one run is:
//!
//! 1. [`initialize`] allocates a [`DoubleBuffer`] and seeds its current grid
//! 2. [`DoubleBuffer::advance`] applies [`step_forest_cpu`] and swaps buffers
//!
//! # Example
//!
//! ```rust
//! use forest_fire_core::solver::initialize;
//!
//! let mut buffers = initialize(32, 32, 0.45, 42).unwrap();
//! buffers.advance();
//! assert_eq!(buffers.current().get(16, 16).code(), 3);
//! ```

mod buffers;
mod initializer;
mod transition;

pub use buffers::DoubleBuffer;
pub use initializer::{ignite_center, initialize, populate_forest, validate_tree_probability};
pub use transition::{next_state, step_forest_cpu, MOORE_OFFSETS};
