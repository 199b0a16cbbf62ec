//! `sp-core` — foundational types for the `smart_parking` workspace.
//!
//! This crate is a dependency of every other `sp-*` crate.  It has no `sp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CellId`, `EdgeId`                                    |
//! | [`geom`]        | `GridPos`, `PixelPoint`, `CellExtent`                 |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `ParkingConfig`                                       |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ParkingConfig;
pub use error::{CoreError, CoreResult};
pub use geom::{CellExtent, GridPos, PixelPoint};
pub use ids::{CellId, EdgeId};
pub use rng::SimRng;
pub use time::Tick;
