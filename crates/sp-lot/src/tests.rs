//! Unit tests for sp-lot.
//!
//! Runs use real worker threads with a 1 ms tick and a scripted or disabled
//! fault source, so the event sequence is deterministic.  Tests that need a
//! run to stay active use a long tick and cancel it.

use std::time::{Duration, Instant};

use sp_core::{CellExtent, CellId, ParkingConfig, PixelPoint};
use sp_grid::{CellMark, GridBuilder, ParkingGraph, SpotStatus};
use sp_reserve::{FaultSource, NeverFault, ParkingEvent, RunOutcome, ScriptedFault};

use crate::{CancelToken, LotError, ParkingLot, ParkingLotBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EXTENT: CellExtent = CellExtent { width: 40, height: 40 };

/// `R10 R10 R10 R10 S`
fn line_graph() -> ParkingGraph {
    GridBuilder::from_codes(&[vec![10, 10, 10, 10, 200]], EXTENT).unwrap()
}

/// ```text
///   R10  R10  R10  S
///   R10  W    R10  R10
///   S    W    R10  S(occupied)
/// ```
fn lot_graph() -> ParkingGraph {
    GridBuilder::from_codes(
        &[vec![10, 10, 10, 200], vec![10, 0, 10, 10], vec![200, 0, 10, 300]],
        EXTENT,
    )
    .unwrap()
}

fn config(tick_ms: u64) -> ParkingConfig {
    ParkingConfig { tick_interval_ms: tick_ms, ..ParkingConfig::default() }
}

fn lot_with<F: FaultSource + 'static>(graph: ParkingGraph, tick_ms: u64, faults: F) -> ParkingLot<F> {
    ParkingLotBuilder::new(config(tick_ms), graph).fault_source(faults).build().unwrap()
}

/// Centre pixel of the cell at `(row, col)`.
fn pixel(row: i32, col: i32) -> PixelPoint {
    PixelPoint::new(col * 40 + 20, row * 40 + 20)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let bad = ParkingConfig { tick_interval_ms: 0, ..ParkingConfig::default() };
        let err = ParkingLotBuilder::new(bad, line_graph()).build().err().unwrap();
        assert!(matches!(err, LotError::Config(_)));

        let bad = ParkingConfig { fault_probability: 1.5, ..ParkingConfig::default() };
        assert!(ParkingLotBuilder::new(bad, line_graph()).build().is_err());
    }

    #[test]
    fn starts_idle_without_vehicle() {
        let lot = ParkingLotBuilder::new(ParkingConfig::default(), line_graph()).build().unwrap();
        assert!(!lot.is_active());
        assert_eq!(lot.vehicle(), None);
        assert_eq!(lot.config().tick_interval_ms, 250);
        assert_eq!(lot.snapshot().count_spots(SpotStatus::Free), 1);
    }
}

// ── Cancel token ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancel_token {
    use super::*;

    #[test]
    fn times_out_when_not_cancelled() {
        let token = CancelToken::new();
        let t0 = Instant::now();
        assert!(!token.wait_timeout(Duration::from_millis(5)));
        assert!(t0.elapsed() >= Duration::from_millis(5));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancelled_token_returns_immediately() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.wait_timeout(Duration::from_secs(60)));
    }

    #[test]
    fn cancel_wakes_a_waiting_thread() {
        let token = CancelToken::new();
        let waiter = {
            let token = token.clone();
            std::thread::spawn(move || token.wait_timeout(Duration::from_secs(60)))
        };
        std::thread::sleep(Duration::from_millis(10));
        let t0 = Instant::now();
        token.cancel();
        assert!(waiter.join().unwrap());
        assert!(t0.elapsed() < Duration::from_secs(30));
    }
}

// ── Start selection ───────────────────────────────────────────────────────────

#[cfg(test)]
mod select_start {
    use super::*;

    #[test]
    fn accepts_road_cells() {
        let mut lot = lot_with(lot_graph(), 1, NeverFault);
        assert_eq!(lot.select_start(pixel(1, 2)).unwrap(), Some(CellId(6)));
        assert_eq!(lot.vehicle(), Some(CellId(6)));
        assert_eq!(lot.snapshot().at(1, 2).unwrap().1, CellMark::Vehicle);
    }

    #[test]
    fn rejects_walls_spots_and_outside() {
        let mut lot = lot_with(lot_graph(), 1, NeverFault);
        assert_eq!(lot.select_start(pixel(1, 1)).unwrap(), None); // wall
        assert_eq!(lot.select_start(pixel(0, 3)).unwrap(), None); // free spot
        assert_eq!(lot.select_start(pixel(2, 3)).unwrap(), None); // occupied spot
        assert_eq!(lot.select_start(pixel(3, 0)).unwrap(), None); // below grid
        assert_eq!(lot.select_start(PixelPoint::new(-1, 5)).unwrap(), None);
        assert_eq!(lot.vehicle(), None);
    }

    #[test]
    fn moving_the_start_restores_the_old_mark() {
        let mut lot = lot_with(lot_graph(), 1, NeverFault);
        lot.select_start(pixel(0, 0)).unwrap();
        lot.select_start(pixel(0, 1)).unwrap();
        let snap = lot.snapshot();
        assert_eq!(snap.at(0, 0).unwrap().1, CellMark::Baseline);
        assert_eq!(snap.at(0, 1).unwrap().1, CellMark::Vehicle);
    }

    #[test]
    fn busy_while_running() {
        let mut lot = lot_with(line_graph(), 60_000, NeverFault);
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let _events = lot.start_search(start).unwrap();
        assert!(matches!(lot.select_start(pixel(0, 1)), Err(LotError::Busy)));
        lot.cancel_search();
    }
}

// ── Search runs ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use super::*;

    #[test]
    fn arrives_with_one_step_per_intermediate_cell() {
        let mut lot = lot_with(line_graph(), 1, NeverFault);
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let events: Vec<ParkingEvent> = lot.start_search(start).unwrap().collect();

        assert_eq!(events.len(), 5);
        match &events[0] {
            ParkingEvent::Reserved { spot, route } => {
                assert_eq!(*spot, CellId(4));
                assert_eq!(route.cells, vec![CellId(0), CellId(1), CellId(2), CellId(3), CellId(4)]);
            }
            other => panic!("expected Reserved, got {other:?}"),
        }
        let stepped: Vec<CellId> = events
            .iter()
            .filter_map(|e| match e {
                ParkingEvent::Stepped { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(stepped, vec![CellId(1), CellId(2), CellId(3)]);
        assert!(matches!(events[4], ParkingEvent::Arrived { spot: CellId(4), .. }));

        assert_eq!(lot.wait().unwrap(), Some(RunOutcome::Arrived { spot: CellId(4) }));
        assert!(!lot.is_active());
        assert_eq!(lot.vehicle(), Some(CellId(4)));
        assert_eq!(lot.spot_status(CellId(4)), Some(SpotStatus::Occupied));
    }

    #[test]
    fn picks_the_cheapest_spot() {
        let mut lot = lot_with(lot_graph(), 1, NeverFault);
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let mut events = lot.start_search(start).unwrap();
        // Down the left column: 40*10 + 40*(10/2) = 600, cheaper than the
        // top row to (0,3) at 1000.
        match events.next() {
            Some(ParkingEvent::Reserved { spot, route }) => {
                assert_eq!(spot, CellId(8));
                assert_eq!(route.cost, 600);
            }
            other => panic!("expected Reserved, got {other:?}"),
        }
        assert_eq!(events.last(), Some(ParkingEvent::Arrived { spot: CellId(8), tick: sp_core::Tick(2) }));
        assert_eq!(lot.spot_status(CellId(3)), Some(SpotStatus::Free));
    }

    #[test]
    fn no_reachable_spot_reserves_nothing() {
        //   R10  W  S
        let g = GridBuilder::from_codes(&[vec![10, 0, 200]], EXTENT).unwrap();
        let mut lot = lot_with(g, 1, NeverFault);
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let events: Vec<ParkingEvent> = lot.start_search(start).unwrap().collect();

        assert_eq!(events, vec![ParkingEvent::NoReachableSpot { start }]);
        assert_eq!(lot.wait().unwrap(), Some(RunOutcome::NoReachableSpot { start }));
        assert_eq!(lot.spot_status(CellId(2)), Some(SpotStatus::Free));
    }

    #[test]
    fn fault_pins_the_vehicle_and_a_new_search_recovers() {
        let mut lot = lot_with(lot_graph(), 1, ScriptedFault::on_tick(2));
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let events: Vec<ParkingEvent> = lot.start_search(start).unwrap().collect();

        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], ParkingEvent::Stepped { cell: CellId(4), .. }));
        assert!(matches!(
            events[2],
            ParkingEvent::Faulted { spot: CellId(8), at: CellId(4), .. }
        ));
        assert_eq!(lot.wait().unwrap(), Some(RunOutcome::Faulted { spot: CellId(8), at: CellId(4) }));
        assert_eq!(lot.vehicle(), Some(CellId(4)));
        assert_eq!(lot.spot_status(CellId(8)), Some(SpotStatus::Occupied));

        // The only free spot left is (0,3).
        let events: Vec<ParkingEvent> = lot.start_search(CellId(4)).unwrap().collect();
        assert!(matches!(events.last(), Some(ParkingEvent::Arrived { spot: CellId(3), .. })));
        assert_eq!(lot.snapshot().count_spots(SpotStatus::Free), 0);
    }

    #[test]
    fn start_search_rejects_walls_and_unknown_cells() {
        let mut lot = lot_with(lot_graph(), 1, NeverFault);
        assert!(matches!(lot.start_search(CellId(5)), Err(LotError::InvalidStart(_))));
        assert!(matches!(lot.start_search(CellId(99)), Err(LotError::InvalidStart(_))));
    }

    #[test]
    fn busy_while_running() {
        let mut lot = lot_with(line_graph(), 60_000, NeverFault);
        let _events = lot.start_search(CellId(0)).unwrap();
        assert!(lot.is_active());
        assert!(matches!(lot.start_search(CellId(1)), Err(LotError::Busy)));
        lot.cancel_search();
        assert!(!lot.is_active());
    }

    #[test]
    fn cancel_restores_the_lot() {
        let mut lot = lot_with(line_graph(), 60_000, NeverFault);
        let start = lot.select_start(pixel(0, 0)).unwrap().unwrap();
        let events = lot.start_search(start).unwrap();

        assert_eq!(lot.cancel_search(), Some(RunOutcome::Cancelled { at: start }));
        let events: Vec<ParkingEvent> = events.collect();
        assert!(matches!(events.last(), Some(ParkingEvent::Cancelled { at, .. }) if *at == start));
        assert_eq!(lot.spot_status(CellId(4)), Some(SpotStatus::Free));

        let snap = lot.snapshot();
        assert_eq!(snap.at(0, 0).unwrap().1, CellMark::Vehicle);
        for col in 1..5 {
            assert_eq!(snap.at(0, col).unwrap().1, CellMark::Baseline);
        }
        assert_eq!(lot.cancel_search(), None);
    }

    #[test]
    fn new_run_clears_the_old_trail() {
        let mut lot = lot_with(line_graph(), 1, NeverFault);
        lot.start_search(CellId(0)).unwrap().for_each(drop);
        lot.wait().unwrap();
        assert_eq!(lot.snapshot().at(0, 1).unwrap().1, CellMark::Trail);

        lot.select_start(pixel(0, 2)).unwrap();
        let snap = lot.snapshot();
        assert_eq!(snap.at(0, 1).unwrap().1, CellMark::Baseline);
        assert_eq!(snap.at(0, 2).unwrap().1, CellMark::Vehicle);
    }

    #[test]
    fn dropping_an_active_lot_stops_the_worker() {
        let mut lot = lot_with(line_graph(), 60_000, NeverFault);
        let events = lot.start_search(CellId(0)).unwrap();
        let t0 = Instant::now();
        drop(lot);
        let events: Vec<ParkingEvent> = events.collect();
        assert!(matches!(events.last(), Some(ParkingEvent::Cancelled { .. })));
        assert!(t0.elapsed() < Duration::from_secs(30));
    }
}

// ── Event stream ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_stream {
    use std::sync::mpsc;

    use super::*;
    use crate::EventStream;

    #[test]
    fn polling_an_idle_run_yields_nothing() {
        let mut lot = lot_with(line_graph(), 60_000, NeverFault);
        let mut events = lot.start_search(CellId(0)).unwrap();

        let first = events.next_timeout(Duration::from_secs(5));
        assert!(matches!(first, Some(ParkingEvent::Reserved { spot, .. }) if spot == CellId(4)));
        assert_eq!(events.next_timeout(Duration::from_millis(20)), None);
        assert_eq!(events.try_next(), None);
        assert!(!events.is_done());

        lot.cancel_search();
        let last = events.next_timeout(Duration::from_secs(5));
        assert!(matches!(last, Some(ParkingEvent::Cancelled { at, .. }) if at == CellId(0)));
        assert!(events.is_done());
    }

    #[test]
    fn nothing_after_the_terminal_event() {
        let mut lot = lot_with(line_graph(), 1, NeverFault);
        let mut events = lot.start_search(CellId(0)).unwrap();
        while let Some(event) = events.next_timeout(Duration::from_secs(5)) {
            if event.is_terminal() {
                break;
            }
        }
        assert!(events.is_done());
        assert_eq!(events.try_next(), None);
        assert_eq!(events.next_timeout(Duration::from_millis(10)), None);
        assert_eq!(events.next(), None);
        lot.wait().unwrap();
    }

    #[test]
    fn a_vanished_worker_ends_the_stream() {
        let (tx, rx) = mpsc::channel::<ParkingEvent>();
        drop(tx);
        let mut events = EventStream::new(rx);
        assert_eq!(events.try_next(), None);
        assert!(events.is_done());

        let (tx, rx) = mpsc::channel::<ParkingEvent>();
        drop(tx);
        let mut events = EventStream::new(rx);
        assert_eq!(events.next_timeout(Duration::from_secs(5)), None);
        assert!(events.is_done());
    }
}
