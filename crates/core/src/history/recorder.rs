//! History sinks
//!
//! A block is `height` lines of `width` comma-terminated state codes. Blocks
//! are appended in simulation order with nothing between them.

use crate::error::SimError;
use crate::grid::CellGrid;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Destination for grid snapshots, one block per call
pub trait HistorySink {
    /// Append one snapshot block
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the block could not be written in full.
    fn record(&mut self, grid: &CellGrid) -> Result<(), SimError>;

    /// Number of blocks appended so far
    fn blocks_written(&self) -> usize;
}

/// Render one snapshot block in the history format
///
/// # Errors
///
/// Forwards any error from `writer`.
pub fn write_block<W: Write>(writer: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    // Codes are single digits: "c," per cell plus the newline
    let mut line = Vec::with_capacity(grid.width() * 2 + 1);
    for row in grid.rows() {
        line.clear();
        for state in row {
            line.push(b'0' + state.code());
            line.push(b',');
        }
        line.push(b'\n');
        writer.write_all(&line)?;
    }
    Ok(())
}

/// Comma-delimited history file
///
/// The file is truncated once on creation; every block is then written by
/// reopening it in append mode and flushing before returning.
#[derive(Debug)]
pub struct CsvHistoryFile {
    path: PathBuf,
    blocks: usize,
}

impl CsvHistoryFile {
    /// Create or truncate the history file, creating its parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the directory or file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                warn!("Creating missing history directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| SimError::io(parent, e))?;
            }
        }

        File::create(&path).map_err(|e| SimError::io(&path, e))?;
        debug!("Truncated history file {}", path.display());

        Ok(Self { path, blocks: 0 })
    }

    /// Location of the history file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for CsvHistoryFile {
    fn record(&mut self, grid: &CellGrid) -> Result<(), SimError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| SimError::io(&self.path, e))?;

        let mut writer = BufWriter::new(file);
        write_block(&mut writer, grid)
            .and_then(|()| writer.flush())
            .map_err(|e| SimError::io(&self.path, e))?;

        self.blocks += 1;
        Ok(())
    }

    fn blocks_written(&self) -> usize {
        self.blocks
    }
}

/// In-memory history, for tests and embedders that post-process blocks
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    bytes: Vec<u8>,
    blocks: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Recorded history as text (always ASCII)
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl HistorySink for MemoryHistory {
    fn record(&mut self, grid: &CellGrid) -> Result<(), SimError> {
        write_block(&mut self.bytes, grid).map_err(|e| SimError::io("<memory>", e))?;
        self.blocks += 1;
        Ok(())
    }

    fn blocks_written(&self) -> usize {
        self.blocks
    }
}

impl<S: HistorySink + ?Sized> HistorySink for &mut S {
    fn record(&mut self, grid: &CellGrid) -> Result<(), SimError> {
        (**self).record(grid)
    }

    fn blocks_written(&self) -> usize {
        (**self).blocks_written()
    }
}
