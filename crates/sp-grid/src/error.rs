//! Grid-subsystem error type.

use thiserror::Error;

use sp_core::CellId;

use crate::SpotStatus;

/// Errors produced by `sp-grid`.
///
/// The map-format variants (`EmptyMap`, `Ragged`, `Parse`, `Io`) are fatal
/// at startup: a lot cannot be built from a malformed map.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("map has no rows")]
    EmptyMap,

    #[error("map line {line} has {got} columns, expected {expected}")]
    Ragged { line: u64, expected: usize, got: usize },

    #[error("map parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("grid of {rows}x{cols} cells exceeds the cell id range")]
    TooLarge { rows: usize, cols: usize },

    #[error("cell extent {width}x{height} px has a zero side")]
    ZeroExtent { width: u32, height: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cell {0} not found in grid")]
    CellNotFound(CellId),

    #[error("cell {0} is not a parking spot")]
    NotASpot(CellId),

    #[error("spot {cell} cannot go from {from} to {to}")]
    IllegalTransition { cell: CellId, from: SpotStatus, to: SpotStatus },
}

pub type GridResult<T> = Result<T, GridError>;
