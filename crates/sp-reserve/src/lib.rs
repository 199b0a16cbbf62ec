//! `sp-reserve` — reserving a spot and driving the vehicle to it.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `RunPhase` — where a run is in its lifecycle              |
//! | [`fault`]       | `FaultSource` trait, `RandomFault`, `NeverFault`, `ScriptedFault` |
//! | [`event`]       | `ParkingEvent`, `FaultReason`, `RunOutcome`               |
//! | [`reservation`] | `Reservation` — one route being driven tick by tick       |
//! | [`error`]       | `ReserveError`, `ReserveResult<T>`                        |
//!
//! # Movement model (one cell per tick)
//!
//! 1. [`Reservation::begin`] validates the route, flips the target spot to
//!    `Reserved` and marks the vehicle on `route[0]`.
//! 2. Every [`Reservation::tick`] first asks the [`FaultSource`] whether the
//!    spot was taken by someone else.  If so the spot becomes `Occupied`,
//!    the cells already driven are restored and the run ends `Faulted`.
//! 3. Otherwise the vehicle moves one cell.  The cell it left becomes
//!    `Trail`; reaching the target makes the spot `Occupied` and ends the run
//!    `Arrived`.
//! 4. [`Reservation::cancel`] (only while moving) restores every route cell
//!    and hands the spot back.
//!
//! The caller owns the clock; this crate never sleeps.

pub mod error;
pub mod event;
pub mod fault;
pub mod reservation;
pub mod state;


pub use error::{ReserveError, ReserveResult};
pub use event::{FaultReason, ParkingEvent, RunOutcome};
pub use fault::{FaultSource, NeverFault, RandomFault, ScriptedFault};
pub use reservation::Reservation;
pub use state::RunPhase;
