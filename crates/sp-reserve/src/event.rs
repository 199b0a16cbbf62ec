//! Events reported to the presentation layer.

use std::fmt;

use sp_core::{CellId, Tick};
use sp_grid::CellMark;
use sp_route::Route;

/// Why a run ended `Faulted`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultReason {
    /// Another vehicle parked in the reserved spot.
    SpotTaken,
}

impl fmt::Display for FaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultReason::SpotTaken => f.write_str("spot taken by another vehicle"),
        }
    }
}

/// One observable change during a run.  Payloads are owned and immutable.
#[derive(Debug, Clone, PartialEq)]
pub enum ParkingEvent {
    /// Spot chosen and reserved; the vehicle will follow `route`.
    Reserved { spot: CellId, route: Route },

    /// The vehicle moved onto `cell`, now marked `mark`.
    Stepped { cell: CellId, mark: CellMark, tick: Tick },

    /// The vehicle reached `spot`, which is now occupied.
    Arrived { spot: CellId, tick: Tick },

    /// `spot` was lost while the vehicle stood on `at`.
    Faulted { spot: CellId, at: CellId, reason: FaultReason, tick: Tick },

    /// The run was cancelled with the vehicle on `at`.
    Cancelled { at: CellId, tick: Tick },

    /// No free spot can be reached from `start`; nothing was reserved.
    NoReachableSpot { start: CellId },
}

impl ParkingEvent {
    /// The outcome this event ends a run with, if it is a terminal event.
    pub fn outcome(&self) -> Option<RunOutcome> {
        match *self {
            ParkingEvent::Arrived { spot, .. } => Some(RunOutcome::Arrived { spot }),
            ParkingEvent::Faulted { spot, at, .. } => Some(RunOutcome::Faulted { spot, at }),
            ParkingEvent::Cancelled { at, .. } => Some(RunOutcome::Cancelled { at }),
            ParkingEvent::NoReachableSpot { start } => Some(RunOutcome::NoReachableSpot { start }),
            ParkingEvent::Reserved { .. } | ParkingEvent::Stepped { .. } => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

/// How a run ended.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    Arrived { spot: CellId },
    Faulted { spot: CellId, at: CellId },
    Cancelled { at: CellId },
    NoReachableSpot { start: CellId },
}

impl RunOutcome {
    /// Where the vehicle stands once the run is over.
    pub fn vehicle(self) -> CellId {
        match self {
            RunOutcome::Arrived { spot } => spot,
            RunOutcome::Faulted { at, .. } | RunOutcome::Cancelled { at } => at,
            RunOutcome::NoReachableSpot { start } => start,
        }
    }
}
