//! Grid coordinates, pixel coordinates, and the cell extent that maps
//! between them.
//!
//! The grid is drawn as a panel of `cols × rows` equally sized rectangles.
//! Pixel `(x, y)` falls into column `x / width` and row `y / height`.

/// A `(row, column)` grid coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: u32,
    pub col: u32,
}

impl GridPos {
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// A point on the presentation panel, in pixels from the top-left corner.
///
/// Signed because pointer events may report positions left of or above the
/// panel; those map to no cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel size of one grid cell.
///
/// Also the length factor of edge weights: vertical moves cost `height`,
/// horizontal moves cost `width`, each scaled by the mean traffic of the
/// two cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellExtent {
    pub width:  u32,
    pub height: u32,
}

impl CellExtent {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square cell of side `side`.
    #[inline]
    pub fn square(side: u32) -> Self {
        Self { width: side, height: side }
    }

    /// Divide a `panel_width × panel_height` panel evenly among `cols × rows`
    /// cells (integer division; leftover pixels on the right and bottom
    /// belong to no cell).
    ///
    /// Returns `None` if the grid has no rows or columns, or if a cell would
    /// be less than one pixel wide or tall.
    pub fn fit(panel_width: u32, panel_height: u32, rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let width  = panel_width / u32::try_from(cols).ok()?;
        let height = panel_height / u32::try_from(rows).ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// `true` if either side is zero pixels.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Grid coordinate under `p`, ignoring grid bounds on the far side.
    ///
    /// Returns `None` for points left of or above the panel origin, and for
    /// every point when the extent is degenerate.
    #[inline]
    pub fn locate(self, p: PixelPoint) -> Option<GridPos> {
        let x = u32::try_from(p.x).ok()?;
        let y = u32::try_from(p.y).ok()?;
        Some(GridPos {
            row: y.checked_div(self.height)?,
            col: x.checked_div(self.width)?,
        })
    }
}
