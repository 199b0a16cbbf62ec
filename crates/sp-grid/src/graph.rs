//! Parking-lot graph representation.
//!
//! # Data layout
//!
//! Cells are stored flat in row-major order and addressed by
//! `CellId = row * cols + col`.  Outgoing edges use **Compressed Sparse Row
//! (CSR)** format.  Given a `CellId c`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ cell_out_start[c] .. cell_out_start[c+1] ]
//! ```
//!
//! Within a cell the edges are ordered south, east, north, west.  Edges and
//! predecessors refer to cells by id, never by reference, so the graph has
//! no ownership cycles and can be copied into snapshots cheaply.
//!
//! # Mutable state
//!
//! The topology and edge weights are fixed at build time.  The only mutable
//! state is each spot's [`SpotStatus`] (changed through
//! [`ParkingGraph::set_spot_status`], which enforces the allowed transitions)
//! and each cell's [`CellMark`].

use sp_core::{CellExtent, CellId, EdgeId, GridPos, PixelPoint};

use crate::{CellKind, CellMark, GridError, GridResult, SpotStatus};

// ── ParkingGraph ──────────────────────────────────────────────────────────────

/// Directed, weighted 4-connected grid graph in CSR format.
///
/// Edge arrays are `pub` for direct indexed access in the pathfinder's inner
/// loop.  Do not construct directly; use [`GridBuilder`](crate::GridBuilder).
#[derive(Debug, Clone)]
pub struct ParkingGraph {
    pub(crate) rows:   u32,
    pub(crate) cols:   u32,
    pub(crate) extent: CellExtent,

    // ── Cell data (indexed by CellId) ─────────────────────────────────────
    pub(crate) cell_kind: Vec<CellKind>,
    pub(crate) cell_mark: Vec<CellMark>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of cell `c` are at EdgeIds
    /// `cell_out_start[c] .. cell_out_start[c+1]`.
    /// Length = `cell_count + 1`.
    pub cell_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    /// Destination cell of each edge.
    pub edge_to: Vec<CellId>,

    /// Traversal cost of each edge.  Always non-negative.
    pub edge_weight: Vec<u32>,
}

impl ParkingGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    #[inline]
    pub fn extent(&self) -> CellExtent {
        self.extent
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_kind.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_kind.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: CellId) -> bool {
        cell.index() < self.cell_kind.len()
    }

    /// Iterator over every cell id in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cell_kind.len() as u32).map(CellId)
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    /// Cell id at `pos`, or `None` outside the grid.
    #[inline]
    pub fn id_of(&self, pos: GridPos) -> Option<CellId> {
        (pos.row < self.rows && pos.col < self.cols).then(|| CellId(pos.row * self.cols + pos.col))
    }

    /// Grid coordinate of `cell`.
    #[inline]
    pub fn pos_of(&self, cell: CellId) -> GridPos {
        GridPos { row: cell.0 / self.cols, col: cell.0 % self.cols }
    }

    /// Cell under a panel pixel, or `None` if the pixel is outside the grid
    /// (including the leftover strip when the panel does not divide evenly).
    pub fn cell_at_pixel(&self, p: PixelPoint) -> Option<CellId> {
        self.extent.locate(p).and_then(|pos| self.id_of(pos))
    }

    // ── Cell state ────────────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self, cell: CellId) -> CellKind {
        self.cell_kind[cell.index()]
    }

    #[inline]
    pub fn mark(&self, cell: CellId) -> CellMark {
        self.cell_mark[cell.index()]
    }

    #[inline]
    pub fn set_mark(&mut self, cell: CellId, mark: CellMark) {
        self.cell_mark[cell.index()] = mark;
    }

    pub fn spot_status(&self, cell: CellId) -> Option<SpotStatus> {
        self.cell_kind.get(cell.index()).and_then(|k| k.spot_status())
    }

    /// Move the spot at `cell` to status `to`.
    ///
    /// Only `Free → Reserved`, `Reserved → Occupied`, and `Reserved → Free`
    /// are accepted.  Returns the previous status.
    pub fn set_spot_status(&mut self, cell: CellId, to: SpotStatus) -> GridResult<SpotStatus> {
        let kind = self
            .cell_kind
            .get_mut(cell.index())
            .ok_or(GridError::CellNotFound(cell))?;
        match kind {
            CellKind::Spot { status } => {
                let from = *status;
                if !from.can_become(to) {
                    return Err(GridError::IllegalTransition { cell, from, to });
                }
                *status = to;
                Ok(from)
            }
            CellKind::Wall | CellKind::Road { .. } => Err(GridError::NotASpot(cell)),
        }
    }

    /// Free spots in row-major order.
    pub fn free_spots(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cell_kind
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_free_spot())
            .map(|(i, _)| CellId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `cell`.
    ///
    /// A contiguous index range; no allocation.
    #[inline]
    pub fn out_edges(&self, cell: CellId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.cell_out_start[cell.index()];
        let end   = self.cell_out_start[cell.index() + 1];
        (start..end).map(EdgeId)
    }

    #[inline]
    pub fn out_degree(&self, cell: CellId) -> usize {
        let start = self.cell_out_start[cell.index()] as usize;
        let end   = self.cell_out_start[cell.index() + 1] as usize;
        end - start
    }

    /// Number of edges pointing at `cell`.  O(E); intended for checks, not
    /// hot paths.
    pub fn in_degree(&self, cell: CellId) -> usize {
        self.edge_to.iter().filter(|&&to| to == cell).count()
    }

    /// The edge from `from` to `to`, if the two cells are connected.
    pub fn edge_between(&self, from: CellId, to: CellId) -> Option<EdgeId> {
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    /// Owned copy of every cell's kind and mark, for readers that must not
    /// hold a lock on the live graph.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows:  self.rows(),
            cols:  self.cols(),
            kinds: self.cell_kind.clone(),
            marks: self.cell_mark.clone(),
        }
    }
}

// ── GridSnapshot ──────────────────────────────────────────────────────────────

/// A consistent, immutable view of all cell kinds and marks at one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub rows:  usize,
    pub cols:  usize,
    pub kinds: Vec<CellKind>,
    pub marks: Vec<CellMark>,
}

impl GridSnapshot {
    /// Kind and mark of the cell at `(row, col)`, or `None` outside the grid.
    pub fn at(&self, row: usize, col: usize) -> Option<(CellKind, CellMark)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let i = row * self.cols + col;
        Some((self.kinds[i], self.marks[i]))
    }

    /// Number of spots in `status`.
    pub fn count_spots(&self, status: SpotStatus) -> usize {
        self.kinds.iter().filter(|k| k.spot_status() == Some(status)).count()
    }
}
