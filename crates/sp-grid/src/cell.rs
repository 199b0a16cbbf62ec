//! Cell kinds, spot status, and the visual mark of a cell.

use std::fmt;

/// Occupancy of a parking spot.
///
/// Allowed transitions:
///
/// ```text
/// Free ──reserve──▶ Reserved ──arrive / taken──▶ Occupied
///                      │
///                      └──cancel──▶ Free
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpotStatus {
    Free,
    Occupied,
    Reserved,
}

impl SpotStatus {
    /// `true` if a spot may move from `self` to `to`.
    #[inline]
    pub fn can_become(self, to: SpotStatus) -> bool {
        matches!(
            (self, to),
            (SpotStatus::Free, SpotStatus::Reserved)
                | (SpotStatus::Reserved, SpotStatus::Occupied)
                | (SpotStatus::Reserved, SpotStatus::Free)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpotStatus::Free     => "free",
            SpotStatus::Occupied => "occupied",
            SpotStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What occupies a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Impassable.  Never an edge endpoint.
    Wall,
    /// Drivable lane.  `traffic` (0–100) scales the cost of edges touching it.
    Road { traffic: u8 },
    /// Parking spot.  Drivable; contributes zero traffic to edge weights.
    Spot { status: SpotStatus },
}

impl CellKind {
    pub const WALL_CODE:          i32 = 0;
    pub const MAX_TRAFFIC:        i32 = 100;
    pub const FREE_SPOT_CODE:     i32 = 200;
    pub const OCCUPIED_SPOT_CODE: i32 = 300;

    /// Decode a map code.
    ///
    /// | Code      | Kind                 |
    /// |-----------|----------------------|
    /// | `0`       | `Wall`               |
    /// | `1..=100` | `Road { traffic }`   |
    /// | `200`     | `Spot(Free)`         |
    /// | `300`     | `Spot(Occupied)`     |
    ///
    /// Returns `None` for any other code; the builder treats those as walls.
    pub fn decode(code: i32) -> Option<CellKind> {
        match code {
            Self::WALL_CODE => Some(CellKind::Wall),
            1..=Self::MAX_TRAFFIC => Some(CellKind::Road { traffic: code as u8 }),
            Self::FREE_SPOT_CODE => Some(CellKind::Spot { status: SpotStatus::Free }),
            Self::OCCUPIED_SPOT_CODE => Some(CellKind::Spot { status: SpotStatus::Occupied }),
            _ => None,
        }
    }

    #[inline]
    pub fn road(traffic: u8) -> CellKind {
        CellKind::Road { traffic }
    }

    #[inline]
    pub fn free_spot() -> CellKind {
        CellKind::Spot { status: SpotStatus::Free }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall)
    }

    #[inline]
    pub fn is_road(self) -> bool {
        matches!(self, CellKind::Road { .. })
    }

    #[inline]
    pub fn is_free_spot(self) -> bool {
        matches!(self, CellKind::Spot { status: SpotStatus::Free })
    }

    /// Traffic coefficient used in edge weights: the road's traffic, or 0
    /// for spots and walls.
    #[inline]
    pub fn traffic(self) -> u32 {
        match self {
            CellKind::Road { traffic } => traffic as u32,
            CellKind::Wall | CellKind::Spot { .. } => 0,
        }
    }

    #[inline]
    pub fn spot_status(self) -> Option<SpotStatus> {
        match self {
            CellKind::Spot { status } => Some(status),
            CellKind::Wall | CellKind::Road { .. } => None,
        }
    }

    /// Hue in `[0, 1]` of a road's baseline colour: green (120°) for empty
    /// roads down to red (0°) at traffic 100.  `None` for walls and spots,
    /// which have fixed colours.
    pub fn baseline_hue(self) -> Option<f32> {
        const GREEN_HUE: f32 = 120.0 / 255.0;
        match self {
            CellKind::Road { traffic } => {
                let load = f32::from(traffic.min(100)) / 100.0;
                Some((1.0 - load) * GREEN_HUE)
            }
            CellKind::Wall | CellKind::Spot { .. } => None,
        }
    }
}

/// Visual state of a cell, painted by the presentation layer on top of the
/// cell's kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellMark {
    /// Kind-derived colour (traffic hue for roads).
    #[default]
    Baseline,
    /// The vehicle stands here.
    Vehicle,
    /// Already driven over during the current run.
    Trail,
}
