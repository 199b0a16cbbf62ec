//! The caller's end of a run's event channel.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use sp_reserve::ParkingEvent;

/// Events of one search run, in the order they happened.
///
/// Iteration blocks until the worker produces the next event and ends after
/// the terminal event (`Arrived`, `Faulted`, `Cancelled` or
/// `NoReachableSpot`).  A stream cannot be restarted; start another search
/// for a new one.
#[derive(Debug)]
pub struct EventStream {
    rx:   Receiver<ParkingEvent>,
    done: bool,
}

impl EventStream {
    pub(crate) fn new(rx: Receiver<ParkingEvent>) -> Self {
        Self { rx, done: false }
    }

    /// `true` once the terminal event has been yielded or the worker is gone.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The next event if one is already waiting.
    pub fn try_next(&mut self) -> Option<ParkingEvent> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                None
            }
        }
    }

    /// The next event, waiting at most `timeout`.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<ParkingEvent> {
        if self.done {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(self.observe(event)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.done = true;
                None
            }
        }
    }

    fn observe(&mut self, event: ParkingEvent) -> ParkingEvent {
        if event.is_terminal() {
            self.done = true;
        }
        event
    }
}

impl Iterator for EventStream {
    type Item = ParkingEvent;

    fn next(&mut self) -> Option<ParkingEvent> {
        if self.done {
            return None;
        }
        match self.rx.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(_) => {
                self.done = true;
                None
            }
        }
    }
}
