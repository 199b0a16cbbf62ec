//! `sp-grid` — the parking lot as a weighted 4-connected grid graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`cell`]    | `CellKind` (`Wall` / `Road` / `Spot`), `SpotStatus`, `CellMark` |
//! | [`graph`]   | `ParkingGraph` (CSR adjacency), `GridSnapshot`              |
//! | [`builder`] | `GridBuilder` — codes or kinds → graph                      |
//! | [`loader`]  | `load_map_csv`, `load_map_reader`, `load_graph`             |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod builder;
pub mod cell;
pub mod error;
pub mod graph;
pub mod loader;


pub use builder::{GridBuilder, edge_weight};
pub use cell::{CellKind, CellMark, SpotStatus};
pub use error::{GridError, GridResult};
pub use graph::{GridSnapshot, ParkingGraph};
pub use loader::{load_graph, load_map_csv, load_map_reader};
