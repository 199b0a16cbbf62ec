//! Run lifecycle.

use std::fmt;

/// Phase of one reservation run.
///
/// ```text
/// Idle → Reserving → Moving → Arrived
///                          ↘ Faulted
///                          ↘ Cancelled
/// ```
///
/// `Reserving` is transient: [`Reservation::begin`](crate::Reservation::begin)
/// reserves the spot and enters `Moving` in one call.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPhase {
    #[default]
    Idle,
    Reserving,
    Moving,
    Arrived,
    Faulted,
    Cancelled,
}

impl RunPhase {
    /// `true` once the run can make no further progress.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Arrived | RunPhase::Faulted | RunPhase::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunPhase::Idle      => "idle",
            RunPhase::Reserving => "reserving",
            RunPhase::Moving    => "moving",
            RunPhase::Arrived   => "arrived",
            RunPhase::Faulted   => "faulted",
            RunPhase::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
