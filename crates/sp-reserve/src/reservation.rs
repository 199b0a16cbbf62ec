//! One route being driven to its spot, one cell per tick.

use tracing::{debug, warn};

use sp_core::{CellId, Tick};
use sp_grid::{CellMark, ParkingGraph, SpotStatus};
use sp_route::Route;

use crate::{FaultReason, FaultSource, ParkingEvent, ReserveError, ReserveResult, RunPhase};

/// Movement state of a single run.
///
/// The reservation does not own the graph; every call that changes cell
/// state borrows it mutably, so the caller decides how the graph is shared.
#[derive(Debug, Clone)]
pub struct Reservation {
    route: Route,
    /// Index into `route.cells` of the cell the vehicle stands on.
    pos:   usize,
    phase: RunPhase,
    tick:  Tick,
}

impl Reservation {
    /// Validate `route`, reserve its target spot and put the vehicle on its
    /// first cell.
    ///
    /// The route must be non-empty, start on a non-wall cell, end on a free
    /// spot that appears nowhere else in it, and step only between connected
    /// cells.  A single-cell route means the vehicle already stands on the
    /// free spot; it parks on the first tick.
    pub fn begin(graph: &mut ParkingGraph, route: Route) -> ReserveResult<Self> {
        validate(graph, &route)?;

        let mut reservation = Self { route, pos: 0, phase: RunPhase::Reserving, tick: Tick::ZERO };
        let target = reservation.target();

        graph.set_spot_status(target, SpotStatus::Reserved)?;
        graph.set_mark(reservation.position(), CellMark::Vehicle);
        reservation.phase = RunPhase::Moving;

        debug!(
            start = %reservation.position(),
            spot  = %target,
            steps = reservation.route.steps(),
            cost  = reservation.route.cost,
            "spot reserved"
        );
        Ok(reservation)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The cell the vehicle currently stands on.
    #[inline]
    pub fn position(&self) -> CellId {
        self.route.cells[self.pos]
    }

    /// The reserved spot.
    #[inline]
    pub fn target(&self) -> CellId {
        self.route.goal()
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Ticks elapsed since `begin`.
    #[inline]
    pub fn elapsed(&self) -> Tick {
        self.tick
    }

    /// Cells still to be driven, excluding the current one.
    pub fn remaining(&self) -> &[CellId] {
        &self.route.cells[self.pos + 1..]
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Advance one tick: draw a fault, otherwise move one cell.
    ///
    /// Returns the event describing what happened.  Errors with
    /// [`ReserveError::NotMoving`] once the run has ended.
    pub fn tick<F>(&mut self, graph: &mut ParkingGraph, fault: &mut F) -> ReserveResult<ParkingEvent>
    where
        F: FaultSource + ?Sized,
    {
        self.ensure_moving()?;
        self.tick = self.tick.next();
        let target = self.target();

        if fault.spot_taken() {
            graph.set_spot_status(target, SpotStatus::Occupied)?;
            for &cell in &self.route.cells[..self.pos] {
                graph.set_mark(cell, CellMark::Baseline);
            }
            let at = self.position();
            graph.set_mark(at, CellMark::Vehicle);
            self.phase = RunPhase::Faulted;

            warn!(spot = %target, %at, tick = %self.tick, "reserved spot taken");
            return Ok(ParkingEvent::Faulted {
                spot:   target,
                at,
                reason: FaultReason::SpotTaken,
                tick:   self.tick,
            });
        }

        let here = self.position();
        if here != target {
            graph.set_mark(here, CellMark::Trail);
            self.pos += 1;
        }

        let cell = self.position();
        graph.set_mark(cell, CellMark::Vehicle);

        if cell == target {
            graph.set_spot_status(target, SpotStatus::Occupied)?;
            self.phase = RunPhase::Arrived;
            debug!(spot = %target, tick = %self.tick, "arrived");
            return Ok(ParkingEvent::Arrived { spot: target, tick: self.tick });
        }

        Ok(ParkingEvent::Stepped { cell, mark: CellMark::Vehicle, tick: self.tick })
    }

    /// Abandon the run: restore every route cell, hand the spot back and
    /// leave the vehicle where it stands.
    pub fn cancel(&mut self, graph: &mut ParkingGraph) -> ReserveResult<ParkingEvent> {
        self.ensure_moving()?;
        let target = self.target();

        for &cell in &self.route.cells {
            graph.set_mark(cell, CellMark::Baseline);
        }
        let at = self.position();
        graph.set_mark(at, CellMark::Vehicle);

        if graph.spot_status(target) == Some(SpotStatus::Reserved) {
            graph.set_spot_status(target, SpotStatus::Free)?;
        }
        self.phase = RunPhase::Cancelled;

        debug!(spot = %target, %at, tick = %self.tick, "reservation cancelled");
        Ok(ParkingEvent::Cancelled { at, tick: self.tick })
    }

    fn ensure_moving(&self) -> ReserveResult<()> {
        match self.phase {
            RunPhase::Moving => Ok(()),
            other => Err(ReserveError::NotMoving(other)),
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn validate(graph: &ParkingGraph, route: &Route) -> ReserveResult<()> {
    let invalid = |msg: String| Err(ReserveError::InvalidRoute(msg));

    let Some((&target, rest)) = route.cells.split_last() else {
        return invalid("route is empty".into());
    };
    if let Some(&bad) = route.cells.iter().find(|c| !graph.contains(**c)) {
        return invalid(format!("cell {bad} is outside the lot"));
    }
    let start = route.cells[0];
    if graph.kind(start).is_wall() {
        return invalid(format!("start {start} is a wall"));
    }
    if !graph.kind(target).is_free_spot() {
        return invalid(format!("target {target} is not a free spot"));
    }
    if rest.contains(&target) {
        return invalid(format!("target {target} is visited before the end"));
    }
    if let Some(w) = route.cells.windows(2).find(|w| graph.edge_between(w[0], w[1]).is_none()) {
        return invalid(format!("no edge from {} to {}", w[0], w[1]));
    }
    Ok(())
}
