//! Cell states of the forest-fire automaton
//!
//! Every cell holds exactly one of four states. `Fire` lasts a single step,
//! while `Empty` and `Charred` never change once reached.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single forest cell
///
/// The discriminants are the codes written to the history output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Bare ground, never burns
    #[default]
    Empty = 0,
    /// Unburned fuel
    Tree = 1,
    /// Burning this step, charred the next
    Fire = 2,
    /// Burned out
    Charred = 3,
}

impl CellState {
    /// All states in code order
    pub const ALL: [CellState; 4] = [Self::Empty, Self::Tree, Self::Fire, Self::Charred];

    /// Numeric code used in recorded history
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the state can never change under the transition rule
    #[inline]
    pub const fn is_absorbing(self) -> bool {
        matches!(self, Self::Empty | Self::Charred)
    }

    /// Whether the cell is currently on fire
    #[inline]
    pub const fn is_burning(self) -> bool {
        matches!(self, Self::Fire)
    }
}

impl TryFrom<u8> for CellState {
    type Error = SimError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Tree),
            2 => Ok(Self::Fire),
            3 => Ok(Self::Charred),
            other => Err(SimError::InvalidCellCode(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.code()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Tree => "tree",
            Self::Fire => "fire",
            Self::Charred => "charred",
        };
        f.write_str(name)
    }
}
