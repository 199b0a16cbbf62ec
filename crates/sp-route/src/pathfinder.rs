//! Single-source, single-target Dijkstra over the parking graph.
//!
//! # Search metrics
//!
//! Each cell has a `distance_from_start` (+∞ until reached) and a
//! `predecessor` (none until reached).  They live in flat arrays owned by a
//! [`Pathfinder`], indexed by `CellId`, together with the frontier heap.
//! The arrays are allocated once per graph and cleared by
//! [`Pathfinder::reset`] between searches; a search never resets them
//! itself, so the metrics of the last search stay inspectable until the
//! caller resets.
//!
//! # Tie-breaking
//!
//! The frontier is a min-heap of `(distance, CellId)`.  Among cells at equal
//! distance the lower `CellId` (earlier in row-major order) is expanded
//! first, so equal-cost alternatives always resolve the same way.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sp_core::CellId;
use sp_grid::ParkingGraph;

use crate::{RouteError, RouteResult};

/// Distance of a cell the search has not reached.
const UNREACHED: u64 = u64::MAX;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: cells from start to goal inclusive and the
/// summed edge weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Cells to visit in order; `cells[0]` is the start, the last is the goal.
    pub cells: Vec<CellId>,
    /// Sum of the weights of the edges between consecutive cells.
    pub cost: u64,
}

impl Route {
    #[inline]
    pub fn start(&self) -> CellId {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> CellId {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves (edges) along the route.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// `true` if the start and goal are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }
}

// ── Pathfinder ────────────────────────────────────────────────────────────────

/// Reusable Dijkstra state: per-cell metrics plus the frontier.
pub struct Pathfinder {
    /// dist[c] = best known cost from the start; `UNREACHED` = +∞.
    dist:     Vec<u64>,
    /// prev[c] = cell that reached c; `CellId::INVALID` = none.
    prev:     Vec<CellId>,
    frontier: BinaryHeap<Reverse<(u64, CellId)>>,
    /// Set by a search, cleared by `reset`.
    dirty:    bool,
}

impl Pathfinder {
    /// Metrics for a graph of `cell_count` cells, all at their reset default.
    pub fn new(cell_count: usize) -> Self {
        Self {
            dist:     vec![UNREACHED; cell_count],
            prev:     vec![CellId::INVALID; cell_count],
            frontier: BinaryHeap::with_capacity(cell_count),
            dirty:    false,
        }
    }

    pub fn for_graph(graph: &ParkingGraph) -> Self {
        Self::new(graph.cell_count())
    }

    /// Set every cell's distance to +∞ and predecessor to none, and empty
    /// the frontier.  Keeps all allocations.
    pub fn reset(&mut self) {
        self.dist.fill(UNREACHED);
        self.prev.fill(CellId::INVALID);
        self.frontier.clear();
        self.dirty = false;
    }

    /// `true` if no search has run since the last [`reset`](Self::reset).
    #[inline]
    pub fn is_reset(&self) -> bool {
        !self.dirty
    }

    /// Distance from the last search's start, or `None` for +∞.
    #[inline]
    pub fn distance(&self, cell: CellId) -> Option<u64> {
        self.dist
            .get(cell.index())
            .copied()
            .filter(|&d| d != UNREACHED)
    }

    #[inline]
    pub fn predecessor(&self, cell: CellId) -> Option<CellId> {
        self.prev
            .get(cell.index())
            .copied()
            .filter(|p| p.is_valid())
    }

    /// Cheapest route from `start` to `goal`.
    ///
    /// Metrics must be at their reset default (call [`reset`](Self::reset)
    /// first); the search stops as soon as `goal` leaves the frontier.
    /// Returns [`RouteError::NoRoute`] if `goal` is unreachable.
    pub fn find_shortest_path(
        &mut self,
        graph: &ParkingGraph,
        start: CellId,
        goal:  CellId,
    ) -> RouteResult<Route> {
        for cell in [start, goal] {
            if !graph.contains(cell) {
                return Err(RouteError::CellNotFound(cell));
            }
        }
        if self.dist.len() != graph.cell_count() {
            // Different graph: size the arrays to it (this is also a reset).
            *self = Self::for_graph(graph);
        }
        debug_assert!(self.is_reset(), "search metrics must be reset before a search");
        self.dirty = true;

        self.dist[start.index()] = 0;
        self.frontier.push(Reverse((0, start)));

        while let Some(Reverse((cost, cell))) = self.frontier.pop() {
            if cell == goal {
                break;
            }

            // Skip stale heap entries left behind by a later decrease.
            if cost > self.dist[cell.index()] {
                continue;
            }

            for edge in graph.out_edges(cell) {
                let neighbour = graph.edge_to[edge.index()];
                let candidate = cost.saturating_add(graph.edge_weight[edge.index()] as u64);

                if candidate < self.dist[neighbour.index()] {
                    self.dist[neighbour.index()] = candidate;
                    self.prev[neighbour.index()] = cell;
                    self.frontier.push(Reverse((candidate, neighbour)));
                }
            }
        }

        let total = self.dist[goal.index()];
        if total == UNREACHED {
            return Err(RouteError::NoRoute { from: start, to: goal });
        }
        Ok(Route { cells: self.reconstruct(start, goal), cost: total })
    }

    /// Walk predecessors back from `goal` and reverse.
    fn reconstruct(&self, start: CellId, goal: CellId) -> Vec<CellId> {
        let mut cells = vec![goal];
        let mut cur = goal;
        while let Some(p) = self.predecessor(cur) {
            cells.push(p);
            cur = p;
        }
        cells.reverse();
        debug_assert_eq!(cells[0], start);
        cells
    }
}
