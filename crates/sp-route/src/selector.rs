//! Best-spot selection: the cheapest route from the vehicle to any free spot.
//!
//! Every `Spot(Free)` is tried in row-major order with a fresh search (the
//! metrics are reset before each one).  A candidate replaces the current
//! best only if it is strictly cheaper, so among equal-cost spots the first
//! one in row-major order wins.

use tracing::debug;

use sp_core::CellId;
use sp_grid::ParkingGraph;

use crate::{Pathfinder, Route, RouteError, RouteResult};

/// Cheapest route from `start` to a free spot.
///
/// Returns [`RouteError::NoReachableSpot`] if the lot has no free spot or
/// none of them can be reached from `start`.
pub fn select_best_spot(
    graph:      &ParkingGraph,
    pathfinder: &mut Pathfinder,
    start:      CellId,
) -> RouteResult<Route> {
    if !graph.contains(start) {
        return Err(RouteError::CellNotFound(start));
    }

    let mut best: Option<Route> = None;
    let mut candidates = 0usize;

    for spot in graph.free_spots() {
        candidates += 1;
        pathfinder.reset();
        match pathfinder.find_shortest_path(graph, start, spot) {
            Ok(route) => {
                if best.as_ref().is_none_or(|b| route.cost < b.cost) {
                    best = Some(route);
                }
            }
            Err(RouteError::NoRoute { .. }) => {
                debug!(%start, %spot, "free spot unreachable");
            }
            Err(e) => return Err(e),
        }
    }

    match best {
        Some(route) => {
            debug!(
                %start,
                candidates,
                spot = %route.goal(),
                cost = route.cost,
                "selected best spot"
            );
            Ok(route)
        }
        None => {
            debug!(%start, candidates, "no reachable free spot");
            Err(RouteError::NoReachableSpot { start })
        }
    }
}
