use sp_core::{CellId, CoreError};
use sp_reserve::ReserveError;
use sp_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LotError {
    #[error("a search is already running")]
    Busy,

    #[error("cell {0} cannot be a starting position")]
    InvalidStart(CellId),

    #[error("lot configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("routing failed: {0}")]
    Route(#[from] RouteError),

    #[error("reservation failed: {0}")]
    Reserve(#[from] ReserveError),

    #[error("could not spawn search worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("search worker panicked")]
    WorkerPanicked,
}

pub type LotResult<T> = Result<T, LotError>;
