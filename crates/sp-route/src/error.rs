//! Routing error type.

use thiserror::Error;

use sp_core::CellId;

/// Errors produced by `sp-route`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: CellId, to: CellId },

    #[error("no free spot reachable from {start}")]
    NoReachableSpot { start: CellId },

    #[error("cell {0} not found in graph")]
    CellNotFound(CellId),
}

pub type RouteResult<T> = Result<T, RouteError>;
