//! Fluent builder for constructing a [`ParkingLot`].

use std::sync::Arc;

use parking_lot::Mutex;

use sp_core::{ParkingConfig, SimRng};
use sp_grid::ParkingGraph;
use sp_reserve::{FaultSource, RandomFault};
use sp_route::Pathfinder;

use crate::lot::LotState;
use crate::{LotResult, ParkingLot};

/// Fluent builder for [`ParkingLot<F>`].
///
/// # Required inputs
///
/// - [`ParkingConfig`] — tick interval, fault probability, seed, panel size
/// - [`ParkingGraph`] — from [`sp_grid::GridBuilder`] or [`sp_grid::load_graph`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                           |
/// |----------------------|---------------------------------------------------|
/// | `.fault_source(f)`   | `RandomFault` seeded from `config.seed` with `config.fault_probability` |
///
/// # Example
///
/// ```rust,ignore
/// let lot = ParkingLotBuilder::new(config, graph)
///     .fault_source(NeverFault)
///     .build()?;
/// ```
pub struct ParkingLotBuilder<F: FaultSource = RandomFault> {
    config: ParkingConfig,
    graph:  ParkingGraph,
    faults: F,
}

impl ParkingLotBuilder<RandomFault> {
    pub fn new(config: ParkingConfig, graph: ParkingGraph) -> Self {
        let faults = RandomFault::new(SimRng::new(config.seed), config.fault_probability);
        Self { config, graph, faults }
    }
}

impl<F: FaultSource + 'static> ParkingLotBuilder<F> {
    /// Replace the fault source, e.g. with `NeverFault` or a scripted
    /// sequence for deterministic runs.
    pub fn fault_source<G: FaultSource + 'static>(self, faults: G) -> ParkingLotBuilder<G> {
        ParkingLotBuilder { config: self.config, graph: self.graph, faults }
    }

    /// Validate the configuration and return an idle lot with no vehicle.
    pub fn build(self) -> LotResult<ParkingLot<F>> {
        self.config.validate()?;

        let pathfinder = Pathfinder::for_graph(&self.graph);
        let state = LotState { graph: self.graph, pathfinder, vehicle: None };

        Ok(ParkingLot {
            config: self.config,
            state:  Arc::new(Mutex::new(state)),
            faults: Arc::new(Mutex::new(self.faults)),
            run:    None,
            runs:   0,
        })
    }
}
