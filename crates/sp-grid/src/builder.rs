//! Turn a rectangular matrix of cells into a [`ParkingGraph`].
//!
//! Construction is two passes:
//!
//! 1. **Cells**: every position receives a [`CellKind`] (decoded from a map
//!    code, or set directly).
//! 2. **Edges**: every non-wall cell gets one directed edge to each
//!    non-wall 4-neighbour, in the order south, east, north, west.  No
//!    diagonals.
//!
//! Because cells are visited in row-major order, edges come out already
//! sorted by source and the CSR row pointer is filled in the same pass.
//! Same input, same graph: construction is fully deterministic.

use tracing::debug;

use sp_core::{CellExtent, CellId, GridPos};

use crate::{CellKind, CellMark, GridError, GridResult, ParkingGraph};

/// Cost of the edge between two adjacent cells:
/// `extent_len * ((traffic_a + traffic_b) / 2)`, with integer division and
/// zero traffic for anything that is not a road.
///
/// `extent_len` is the cell height for vertical moves and the cell width for
/// horizontal moves.
#[inline]
pub fn edge_weight(a: CellKind, b: CellKind, extent_len: u32) -> u32 {
    extent_len.saturating_mul((a.traffic() + b.traffic()) / 2)
}

/// Construct a [`ParkingGraph`] from cell kinds, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sp_core::{CellExtent, GridPos};
/// use sp_grid::{CellKind, GridBuilder};
///
/// let mut b = GridBuilder::new(1, 2, CellExtent::square(40));
/// b.set(GridPos::new(0, 0), CellKind::road(10));
/// b.set(GridPos::new(0, 1), CellKind::free_spot());
/// let g = b.build();
/// assert_eq!(g.edge_count(), 2); // road → spot and spot → road
/// ```
pub struct GridBuilder {
    rows:   u32,
    cols:   u32,
    extent: CellExtent,
    kinds:  Vec<CellKind>,
}

impl GridBuilder {
    /// An all-wall grid of `rows × cols` cells.
    ///
    /// # Panics
    /// Panics if `rows * cols` does not fit in a `CellId` or `extent` has a
    /// zero side.  Use [`from_codes`](Self::from_codes) for untrusted input.
    pub fn new(rows: usize, cols: usize, extent: CellExtent) -> Self {
        match Self::try_new(rows, cols, extent) {
            Ok(b) => b,
            Err(e) => panic!("{e}"),
        }
    }

    fn try_new(rows: usize, cols: usize, extent: CellExtent) -> GridResult<Self> {
        if extent.is_degenerate() {
            return Err(GridError::ZeroExtent { width: extent.width, height: extent.height });
        }
        let too_large = || GridError::TooLarge { rows, cols };
        let r = u32::try_from(rows).map_err(|_| too_large())?;
        let c = u32::try_from(cols).map_err(|_| too_large())?;
        // CellId::INVALID (u32::MAX) must stay out of range.
        let count = r.checked_mul(c).filter(|&n| n < u32::MAX).ok_or_else(too_large)?;
        Ok(Self {
            rows:   r,
            cols:   c,
            extent,
            kinds:  vec![CellKind::Wall; count as usize],
        })
    }

    /// Build directly from a matrix of map codes.
    ///
    /// The matrix must be non-empty and rectangular.  Unrecognized codes
    /// become walls.
    pub fn from_codes(codes: &[Vec<i32>], extent: CellExtent) -> GridResult<ParkingGraph> {
        let cols = check_rectangular(codes)?;
        let mut b = Self::try_new(codes.len(), cols, extent)?;
        let mut unknown = 0usize;
        for (r, row) in codes.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::decode(code).unwrap_or_else(|| {
                    unknown += 1;
                    debug!(row = r, col = c, code, "unrecognized map code, using wall");
                    CellKind::Wall
                });
                b.kinds[r * cols + c] = kind;
            }
        }
        if unknown > 0 {
            debug!(unknown, "map contained unrecognized codes");
        }
        Ok(b.build())
    }

    /// Build from a matrix of cell kinds.  The matrix must be non-empty and
    /// rectangular.
    pub fn from_kinds(kinds: &[Vec<CellKind>], extent: CellExtent) -> GridResult<ParkingGraph> {
        let cols = check_rectangular(kinds)?;
        let mut b = Self::try_new(kinds.len(), cols, extent)?;
        for (r, row) in kinds.iter().enumerate() {
            b.kinds[r * cols..(r + 1) * cols].copy_from_slice(row);
        }
        Ok(b.build())
    }

    /// Set the kind of the cell at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: GridPos, kind: CellKind) -> &mut Self {
        assert!(
            pos.row < self.rows && pos.col < self.cols,
            "{pos} outside {}x{} grid", self.rows, self.cols,
        );
        self.kinds[(pos.row * self.cols + pos.col) as usize] = kind;
        self
    }

    /// Set a whole row of kinds.
    ///
    /// # Panics
    /// Panics if `row` is out of range or `kinds` is not exactly one row long.
    pub fn set_row(&mut self, row: usize, kinds: &[CellKind]) -> &mut Self {
        let cols = self.cols as usize;
        assert_eq!(kinds.len(), cols, "row {row} must have {cols} cells");
        self.kinds[row * cols..(row + 1) * cols].copy_from_slice(kinds);
        self
    }

    pub fn rows(&self) -> usize { self.rows as usize }
    pub fn cols(&self) -> usize { self.cols as usize }

    /// Consume the builder and produce a [`ParkingGraph`].
    ///
    /// Time complexity: O(rows × cols).
    pub fn build(self) -> ParkingGraph {
        let (rows, cols) = (self.rows, self.cols);
        let cell_count = self.kinds.len();
        let kinds = self.kinds;

        let mut cell_out_start = Vec::with_capacity(cell_count + 1);
        let mut edge_to     = Vec::with_capacity(cell_count * 4);
        let mut edge_weight_v = Vec::with_capacity(cell_count * 4);

        cell_out_start.push(0u32);
        for r in 0..rows {
            for c in 0..cols {
                let here = r * cols + c;
                let here_kind = kinds[here as usize];

                // Every non-wall cell gets out edges, spots of any status
                // included, so a route may cross an occupied spot.
                if !here_kind.is_wall() {
                    // (neighbour row, neighbour col, extent along the move)
                    let neighbours = [
                        (r.checked_add(1).filter(|&n| n < rows), Some(c), self.extent.height), // south
                        (Some(r), c.checked_add(1).filter(|&n| n < cols), self.extent.width),  // east
                        (r.checked_sub(1), Some(c), self.extent.height),                       // north
                        (Some(r), c.checked_sub(1), self.extent.width),                        // west
                    ];
                    for (nr, nc, len) in neighbours {
                        let (Some(nr), Some(nc)) = (nr, nc) else { continue };
                        let there = nr * cols + nc;
                        let there_kind = kinds[there as usize];
                        if there_kind.is_wall() {
                            continue;
                        }
                        edge_to.push(CellId(there));
                        edge_weight_v.push(edge_weight(here_kind, there_kind, len));
                    }
                }
                cell_out_start.push(edge_to.len() as u32);
            }
        }
        debug_assert_eq!(cell_out_start.len(), cell_count + 1);

        debug!(
            rows,
            cols,
            edges = edge_to.len(),
            free_spots = kinds.iter().filter(|k| k.is_free_spot()).count(),
            "built parking graph"
        );

        ParkingGraph {
            rows,
            cols,
            extent: self.extent,
            cell_mark: vec![CellMark::Baseline; cell_count],
            cell_kind: kinds,
            cell_out_start,
            edge_to,
            edge_weight: edge_weight_v,
        }
    }
}

/// Column count of a non-empty rectangular matrix.
fn check_rectangular<T>(rows: &[Vec<T>]) -> GridResult<usize> {
    let first = rows.first().ok_or(GridError::EmptyMap)?;
    let cols = first.len();
    if cols == 0 {
        return Err(GridError::EmptyMap);
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(GridError::Ragged {
                line:     i as u64 + 1,
                expected: cols,
                got:      row.len(),
            });
        }
    }
    Ok(cols)
}
