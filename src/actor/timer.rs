//! Timer Actor: Single-slot delayed-task scheduler.
//!
//! Each [`TimerSlot`] holds at most one pending deadline. Arming a slot
//! replaces its deadline (reset); cancelling clears it; a deadline that
//! elapses without a newer arm fires exactly once as a [`TimerFired`]
//! message. This is the debounce engine: every text change re-arms the
//! `Debounce` slot, so only the last change in a quiet window survives.
//!
//! Dropping the actor stops the thread and discards pending deadlines,
//! which is how the startup timer is cancelled on teardown.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::messages::{TimerCmd, TimerFired, TimerSlot};

const SLOTS: [TimerSlot; 2] = [TimerSlot::Startup, TimerSlot::Debounce];

/// How long the thread sleeps with nothing due, before re-checking shutdown.
const IDLE_WAIT: Duration = Duration::from_millis(25);

const fn slot_index(slot: TimerSlot) -> usize {
    match slot {
        TimerSlot::Startup => 0,
        TimerSlot::Debounce => 1,
    }
}

/// Timer actor managing one-shot deadlines per slot.
pub struct TimerActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    cmd_tx: Sender<TimerCmd>,
}

impl TimerActor {
    /// Spawn the timer actor thread.
    ///
    /// Fired slots are delivered on `fired_tx`.
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(fired_tx: Sender<TimerFired>) -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("typeahead-timer".to_string())
            .spawn(move || {
                Self::run_loop(&cmd_rx, &fired_tx, &shutdown_clone);
            })
            .expect("failed to spawn timer thread");

        Self {
            handle: Some(handle),
            shutdown,
            cmd_tx,
        }
    }

    /// Get a command sender for arming and cancelling slots.
    ///
    /// Widgets hold one of these so they can schedule their own deadlines.
    pub fn commander(&self) -> Sender<TimerCmd> {
        self.cmd_tx.clone()
    }

    /// Arm (or re-arm) a slot to fire after `delay`.
    pub fn arm(&self, slot: TimerSlot, delay: Duration) {
        let _ = self.cmd_tx.send(TimerCmd::Arm { slot, delay });
    }

    /// Clear a slot's pending deadline without firing it.
    pub fn cancel(&self, slot: TimerSlot) {
        let _ = self.cmd_tx.send(TimerCmd::Cancel { slot });
    }

    /// Signal the timer thread to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the timer thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        cmd_rx: &Receiver<TimerCmd>,
        fired_tx: &Sender<TimerFired>,
        shutdown: &Arc<AtomicBool>,
    ) {
        let mut deadlines: [Option<Instant>; 2] = [None; 2];

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Fire everything due before waiting again.
            let now = Instant::now();
            for slot in SLOTS {
                let idx = slot_index(slot);
                if deadlines[idx].is_some_and(|deadline| deadline <= now) {
                    deadlines[idx] = None;
                    if fired_tx.send(TimerFired { slot }).is_err() {
                        // Receiver dropped, exit
                        return;
                    }
                }
            }

            // Wait until the nearest deadline, capped so shutdown is noticed.
            let wait = deadlines
                .iter()
                .flatten()
                .min()
                .map_or(IDLE_WAIT, |deadline| {
                    deadline.saturating_duration_since(now).min(IDLE_WAIT)
                });

            match cmd_rx.recv_timeout(wait) {
                Ok(TimerCmd::Arm { slot, delay }) => {
                    deadlines[slot_index(slot)] = Some(Instant::now() + delay);
                }
                Ok(TimerCmd::Cancel { slot }) => {
                    deadlines[slot_index(slot)] = None;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl Drop for TimerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
