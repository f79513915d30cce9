//! Error type shared by every fallible operation in the crate
//!
//! Configuration problems are reported before any simulation work begins, and
//! history I/O failures abort the run rather than leave a gap in the recorded
//! blocks.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring, running or recording a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Grid width or height is zero
    #[error("grid {axis} must be positive, got {value}")]
    InvalidDimension {
        /// Which axis was rejected (`"width"` or `"height"`)
        axis: &'static str,
        /// The rejected value
        value: usize,
    },

    /// Initial tree probability outside `[0, 1]` or not finite
    #[error("tree probability must be within [0, 1], got {0}")]
    InvalidTreeProbability(f64),

    /// Explicit rows passed to a grid constructor do not form a rectangle
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row
        row: usize,
        /// Width established by the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// A numeric code that does not name one of the four cell states
    #[error("cell code {0} is outside the state domain 0..=3")]
    InvalidCellCode(u8),

    /// Recorded history that does not follow the block layout
    #[error("malformed history at line {line}: {reason}")]
    MalformedHistory {
        /// 1-based line number in the history text
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A driver operation was called in a phase that does not allow it
    #[error("cannot {operation} while the simulation is {phase}")]
    InvalidPhase {
        /// The rejected operation
        operation: &'static str,
        /// Phase the driver was in
        phase: String,
    },

    /// A history animation could not be encoded
    #[error("rendering failed: {0}")]
    Render(#[from] image::ImageError),

    /// The history sink could not be created, truncated, appended or read
    #[error("history I/O failed for {}: {source}", path.display())]
    Io {
        /// Sink location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl SimError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the errors that are detected before a run starts
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension { .. } | Self::InvalidTreeProbability(_)
        )
    }
}
