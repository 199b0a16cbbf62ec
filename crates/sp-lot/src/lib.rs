//! `sp-lot` — the parking lot as a running service.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`lot`]     | `ParkingLot` — start selection, search runs, snapshots      |
//! | [`builder`] | `ParkingLotBuilder` — config + graph + fault source         |
//! | [`cancel`]  | `CancelToken` — cancellation flag that doubles as tick timer |
//! | [`stream`]  | `EventStream` — iterator over one run's `ParkingEvent`s     |
//! | [`error`]   | `LotError`, `LotResult<T>`                                  |
//!
//! # Threading model
//!
//! ```text
//! caller thread                      worker thread (one per run)
//! ─────────────                      ───────────────────────────
//! start_search(start) ──spawn──────▶ lock: select best spot, reserve
//!        │                           loop:
//!        ▼                             wait tick interval on CancelToken
//! EventStream ◀────── mpsc ────────    lock: tick / cancel, send event
//!                                      stop on Arrived / Faulted / Cancelled
//! cancel_search() ──cancel + join──▶
//! ```
//!
//! The graph lives behind one `parking_lot::Mutex`.  While a run is active
//! only the worker writes to it; `select_start` and `start_search` are
//! rejected with [`LotError::Busy`].  Readers take [`GridSnapshot`] copies.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let graph = sp_grid::load_graph(path, config.panel_width_px, config.panel_height_px)?;
//! let mut lot = ParkingLotBuilder::new(config, graph).build()?;
//! if let Some(start) = lot.select_start(PixelPoint::new(12, 30))? {
//!     for event in lot.start_search(start)? {
//!         println!("{event:?}");
//!     }
//! }
//! ```
//!
//! [`GridSnapshot`]: sp_grid::GridSnapshot

pub mod builder;
pub mod cancel;
pub mod error;
pub mod lot;
pub mod stream;

#[cfg(test)]
mod tests;

pub use builder::ParkingLotBuilder;
pub use cancel::CancelToken;
pub use error::{LotError, LotResult};
pub use lot::ParkingLot;
pub use stream::EventStream;
