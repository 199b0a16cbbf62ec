//! The parking lot service.

use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{error, info, warn};

use sp_core::{CellId, ParkingConfig, PixelPoint};
use sp_grid::{CellMark, GridSnapshot, ParkingGraph, SpotStatus};
use sp_reserve::{FaultSource, ParkingEvent, Reservation, RunOutcome};
use sp_route::{Pathfinder, RouteError, select_best_spot};

use crate::{CancelToken, EventStream, LotError, LotResult};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything the worker mutates, behind one lock.
pub(crate) struct LotState {
    pub(crate) graph:      ParkingGraph,
    pub(crate) pathfinder: Pathfinder,
    pub(crate) vehicle:    Option<CellId>,
}

impl LotState {
    /// Move the vehicle marker to `cell` and wipe the previous run's trail.
    fn place_vehicle(&mut self, cell: CellId) {
        let trail: Vec<CellId> = self
            .graph
            .cells()
            .filter(|&c| self.graph.mark(c) == CellMark::Trail)
            .collect();
        for c in trail {
            self.graph.set_mark(c, CellMark::Baseline);
        }
        if let Some(prev) = self.vehicle.filter(|&v| v != cell) {
            self.graph.set_mark(prev, CellMark::Baseline);
        }
        self.graph.set_mark(cell, CellMark::Vehicle);
        self.vehicle = Some(cell);
    }
}

pub(crate) struct ActiveRun {
    cancel: CancelToken,
    handle: JoinHandle<LotResult<RunOutcome>>,
}

// ── ParkingLot ────────────────────────────────────────────────────────────────

/// A parking lot with one vehicle looking for a spot.
///
/// Construct with [`ParkingLotBuilder`](crate::ParkingLotBuilder).  At most
/// one search runs at a time; dropping the lot cancels it.
pub struct ParkingLot<F: FaultSource + 'static> {
    pub(crate) config: ParkingConfig,
    pub(crate) state:  Arc<Mutex<LotState>>,
    pub(crate) faults: Arc<Mutex<F>>,
    pub(crate) run:    Option<ActiveRun>,
    /// Runs started so far; numbers each run's fault stream.
    pub(crate) runs:   u64,
}

impl<F: FaultSource + 'static> ParkingLot<F> {
    // ── Queries ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &ParkingConfig {
        &self.config
    }

    /// `true` while a search worker is still running.
    pub fn is_active(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.handle.is_finished())
    }

    /// The cell the vehicle stands on, if a start has been chosen.
    pub fn vehicle(&self) -> Option<CellId> {
        self.state.lock().vehicle
    }

    /// Consistent copy of every cell's kind and mark.
    pub fn snapshot(&self) -> GridSnapshot {
        self.state.lock().graph.snapshot()
    }

    pub fn spot_status(&self, cell: CellId) -> Option<SpotStatus> {
        self.state.lock().graph.spot_status(cell)
    }

    /// Cell under panel pixel `p`, if any.
    pub fn cell_at_pixel(&self, p: PixelPoint) -> Option<CellId> {
        self.state.lock().graph.cell_at_pixel(p)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Choose the vehicle's starting cell by panel pixel.
    ///
    /// Only road cells are accepted; anything else (walls, spots, pixels
    /// outside the grid) returns `Ok(None)` and changes nothing.  A new start
    /// resets all search metrics and moves the vehicle marker.
    pub fn select_start(&mut self, p: PixelPoint) -> LotResult<Option<CellId>> {
        self.ensure_idle()?;

        let mut state = self.state.lock();
        let Some(cell) = state.graph.cell_at_pixel(p) else {
            return Ok(None);
        };
        if !state.graph.kind(cell).is_road() {
            return Ok(None);
        }

        state.pathfinder.reset();
        state.place_vehicle(cell);
        info!(%cell, x = p.x, y = p.y, "start selected");
        Ok(Some(cell))
    }

    /// Find the best free spot from `start` and drive there on a worker
    /// thread, one cell per tick.
    ///
    /// Returns immediately; the run's progress arrives on the returned
    /// [`EventStream`].  Fails with [`LotError::Busy`] while another run is
    /// active and [`LotError::InvalidStart`] for walls and unknown cells.
    pub fn start_search(&mut self, start: CellId) -> LotResult<EventStream> {
        self.ensure_idle()?;

        {
            let mut state = self.state.lock();
            if !state.graph.contains(start) || state.graph.kind(start).is_wall() {
                return Err(LotError::InvalidStart(start));
            }
            state.place_vehicle(start);
        }

        let run = self.runs;
        self.runs += 1;

        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let worker = Worker {
            state:    Arc::clone(&self.state),
            faults:   Arc::clone(&self.faults),
            cancel:   cancel.clone(),
            events:   tx,
            interval: self.config.tick_interval(),
            start,
            run,
        };

        let handle = thread::Builder::new()
            .name(format!("sp-lot-run-{run}"))
            .spawn(move || worker.run())
            .map_err(LotError::Spawn)?;

        info!(%start, run, "search started");
        self.run = Some(ActiveRun { cancel, handle });
        Ok(EventStream::new(rx))
    }

    /// Cancel the active run and wait for the worker to stop at its next
    /// tick boundary.
    ///
    /// Returns how the run ended, which is not necessarily `Cancelled` if it
    /// finished first.  `None` if no run was active or the worker failed.
    pub fn cancel_search(&mut self) -> Option<RunOutcome> {
        let run = self.run.as_ref()?;
        run.cancel.cancel();
        match self.wait() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "search worker failed");
                None
            }
        }
    }

    /// Block until the current run ends and return its outcome.
    ///
    /// `Ok(None)` if there is no run to wait for.
    pub fn wait(&mut self) -> LotResult<Option<RunOutcome>> {
        let Some(run) = self.run.take() else {
            return Ok(None);
        };
        let outcome = run.handle.join().map_err(|_| LotError::WorkerPanicked)??;
        info!(?outcome, "search finished");
        Ok(Some(outcome))
    }

    /// Reap a finished run, or reject the call if one is still going.
    fn ensure_idle(&mut self) -> LotResult<()> {
        if self.is_active() {
            warn!("request rejected: search in progress");
            return Err(LotError::Busy);
        }
        if self.run.is_some() {
            if let Err(e) = self.wait() {
                error!(error = %e, "previous search worker failed");
            }
        }
        Ok(())
    }
}

impl<F: FaultSource + 'static> Drop for ParkingLot<F> {
    fn drop(&mut self) {
        self.cancel_search();
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

struct Worker<F: FaultSource> {
    state:    Arc<Mutex<LotState>>,
    faults:   Arc<Mutex<F>>,
    cancel:   CancelToken,
    events:   Sender<ParkingEvent>,
    interval: Duration,
    start:    CellId,
    run:      u64,
}

impl<F: FaultSource> Worker<F> {
    fn run(self) -> LotResult<RunOutcome> {
        let Some(mut reservation) = self.reserve()? else {
            return Ok(RunOutcome::NoReachableSpot { start: self.start });
        };

        loop {
            let cancelled = self.cancel.wait_timeout(self.interval);

            let event = {
                let mut state = self.state.lock();
                let event = if cancelled {
                    reservation.cancel(&mut state.graph)?
                } else {
                    let mut faults = self.faults.lock();
                    reservation.tick(&mut state.graph, &mut *faults)?
                };
                state.vehicle = Some(reservation.position());
                event
            };

            if let ParkingEvent::Faulted { spot, at, .. } = event {
                warn!(%spot, %at, run = self.run, "reservation lost");
            }
            let outcome = event.outcome();
            self.emit(event);
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    /// Select the best spot and reserve it in one critical section.
    ///
    /// `Ok(None)` if no free spot is reachable; that is reported as an
    /// event, not an error.
    fn reserve(&self) -> LotResult<Option<Reservation>> {
        let mut state = self.state.lock();
        let LotState { graph, pathfinder, .. } = &mut *state;

        let route = match select_best_spot(graph, pathfinder, self.start) {
            Ok(route) => route,
            Err(RouteError::NoReachableSpot { start }) => {
                warn!(%start, "no reachable free spot");
                self.emit(ParkingEvent::NoReachableSpot { start });
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        self.faults.lock().begin_run(self.run);
        let spot = route.goal();
        let reservation = Reservation::begin(graph, route.clone())?;
        info!(%spot, cost = route.cost, steps = route.steps(), "spot reserved");
        self.emit(ParkingEvent::Reserved { spot, route });
        Ok(Some(reservation))
    }

    fn emit(&self, event: ParkingEvent) {
        // Nobody listening is fine; the run still completes.
        let _ = self.events.send(event);
    }
}
