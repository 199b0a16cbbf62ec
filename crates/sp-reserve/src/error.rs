use sp_grid::GridError;
use thiserror::Error;

use crate::RunPhase;

#[derive(Debug, Error)]
pub enum ReserveError {
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("run is not moving (phase {0})")]
    NotMoving(RunPhase),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type ReserveResult<T> = Result<T, ReserveError>;
