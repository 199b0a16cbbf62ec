//! Run configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the lot builder.  Every field has a
//! default matching the classic smart-parking demo: a 400 × 400 px panel,
//! a 250 ms tick, and a 2.5 % chance per tick that the reserved spot is
//! taken by another driver.

use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Top-level configuration for a parking lot instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParkingConfig {
    /// Wall-clock interval between two movement ticks, in milliseconds.
    pub tick_interval_ms: u64,

    /// Probability in `[0, 1]` that the reserved spot is lost on any tick.
    pub fault_probability: f64,

    /// Master RNG seed for fault injection.  The same seed always produces
    /// the same sequence of faults.
    pub seed: u64,

    /// Presentation panel width in pixels.  Divided evenly among columns.
    pub panel_width_px: u32,

    /// Presentation panel height in pixels.  Divided evenly among rows.
    pub panel_height_px: u32,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:  250,
            fault_probability: 0.025,
            seed:              42,
            panel_width_px:    400,
            panel_height_px:   400,
        }
    }
}

impl ParkingConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.fault_probability) {
            return Err(CoreError::Config(format!(
                "fault_probability {} is outside [0, 1]",
                self.fault_probability
            )));
        }
        if self.panel_width_px == 0 || self.panel_height_px == 0 {
            return Err(CoreError::Config(format!(
                "panel size {}x{} must be non-zero",
                self.panel_width_px, self.panel_height_px
            )));
        }
        Ok(())
    }
}
