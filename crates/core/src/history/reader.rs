//! Reading recorded history back into grids
//!
//! The history text carries no header, so the caller supplies the grid
//! dimensions used when it was written.

use crate::core_types::CellState;
use crate::error::SimError;
use crate::grid::CellGrid;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse every block of a history stream
///
/// Each row may end with the trailing comma the recorder writes. Blank lines
/// are accepted only after the last complete block.
///
/// # Errors
///
/// - [`SimError::InvalidDimension`] for zero `width` or `height`
/// - [`SimError::MalformedHistory`] for a row of the wrong length, a
///   non-numeric value, a blank line before the end of the data or a final
///   block with fewer than `height` rows
/// - [`SimError::InvalidCellCode`] for a number outside the state domain
/// - [`SimError::Io`] if reading fails
pub fn read_history<R: BufRead>(
    reader: R,
    width: usize,
    height: usize,
) -> Result<Vec<CellGrid>, SimError> {
    // Validates the dimensions and gives a reusable block buffer
    let mut block = CellGrid::new(width, height)?;
    let mut blocks = Vec::new();
    let mut row = 0;
    let mut line_number = 0;
    // Line of the first blank line; only more blank lines may follow it
    let mut trailing_blank = None;

    for line in reader.lines() {
        line_number += 1;
        let line = line.map_err(|e| SimError::io("<history>", e))?;
        if line.is_empty() {
            if row != 0 {
                return Err(SimError::MalformedHistory {
                    line: line_number,
                    reason: format!("blank line inside a block after {row} of {height} rows"),
                });
            }
            if trailing_blank.is_none() {
                trailing_blank = Some(line_number);
            }
            continue;
        }
        if let Some(blank) = trailing_blank {
            return Err(SimError::MalformedHistory {
                line: blank,
                reason: "blocks are not separated by blank lines".to_string(),
            });
        }

        parse_row(&line, line_number, width, &mut block, row)?;
        row += 1;

        if row == height {
            blocks.push(block.clone());
            row = 0;
        }
    }

    if row != 0 {
        return Err(SimError::MalformedHistory {
            line: line_number,
            reason: format!("final block has {row} of {height} rows"),
        });
    }

    Ok(blocks)
}

/// Open and parse a history file
///
/// # Errors
///
/// Same as [`read_history`], with I/O errors tagged with `path`.
pub fn load_history(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
) -> Result<Vec<CellGrid>, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SimError::io(path, e))?;
    read_history(BufReader::new(file), width, height).map_err(|e| match e {
        SimError::Io { source, .. } => SimError::io(path, source),
        other => other,
    })
}

fn parse_row(
    line: &str,
    line_number: usize,
    width: usize,
    block: &mut CellGrid,
    row: usize,
) -> Result<(), SimError> {
    let trimmed = line.trim_end();
    let values = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let mut col = 0;
    for field in values.split(',') {
        if col == width {
            return Err(SimError::MalformedHistory {
                line: line_number,
                reason: format!("more than {width} values"),
            });
        }
        let code: u8 = field
            .trim()
            .parse()
            .map_err(|_| SimError::MalformedHistory {
                line: line_number,
                reason: format!("'{field}' is not a cell code"),
            })?;
        block.set(row, col, CellState::try_from(code)?);
        col += 1;
    }

    if col != width {
        return Err(SimError::MalformedHistory {
            line: line_number,
            reason: format!("expected {width} values, found {col}"),
        });
    }
    Ok(())
}
