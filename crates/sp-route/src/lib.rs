//! `sp-route` — shortest paths over the parking graph.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`pathfinder`] | `Pathfinder` (reusable Dijkstra state), `Route`         |
//! | [`selector`]   | `select_best_spot` — cheapest route to any free spot    |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                          |
//!
//! # Cost units
//!
//! Costs are the integer edge weights built by `sp-grid`, summed in `u64`
//! so long routes over heavy traffic cannot overflow.

pub mod error;
pub mod pathfinder;
pub mod selector;


pub use error::{RouteError, RouteResult};
pub use pathfinder::{Pathfinder, Route};
pub use selector::select_best_spot;
