//! # Shutdown
//!
//! A broadcast stop signal shared by the evolution loop and its two timers.
//!
//! The signal is a `crossbeam-channel` channel on which nothing is ever sent.
//! Triggering drops the only sender, which disconnects every receiver at once:
//! a `select!` waiting on the signal wakes immediately and every later check
//! sees it as well. Dropping a sender never blocks, so the deadline can fire
//! whether or not the loop and the annealer are still listening, and a second
//! trigger is a no-op.

use std::{
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{after, bounded, select, Receiver, Sender, TryRecvError};
use tracing::{debug, info};

use crate::error::{QueensError, Result};

#[derive(Debug, Clone)]
pub struct Shutdown {
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(0);
        Self {
            trigger: Arc::new(Mutex::new(Some(sender))),
            signal: receiver,
        }
    }

    /// Signals every observer to stop.
    ///
    /// Returns `true` for the call that actually fired the signal and `false`
    /// for every later one.
    pub fn trigger(&self) -> bool {
        self.trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    /// Returns `true` once [`Shutdown::trigger`] has been called on any clone.
    pub fn is_triggered(&self) -> bool {
        matches!(self.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// The receiver to wait on inside a `select!`. It becomes ready, with a
    /// disconnection error, when the signal fires.
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts the deadline timer.
///
/// The spawned thread triggers `shutdown` once `deadline` has elapsed. If
/// something else triggers it first, the thread exits without waiting out the
/// deadline.
///
/// # Errors
///
/// Returns [`QueensError::Timer`] if the thread cannot be spawned.
pub fn spawn_deadline(shutdown: Shutdown, deadline: Duration) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("deadline".to_string())
        .spawn(move || {
            let timeout = after(deadline);
            select! {
                recv(timeout) -> _ => {
                    if shutdown.trigger() {
                        info!(?deadline, "Time is up, signalling shutdown");
                    }
                }
                recv(shutdown.signal()) -> _ => debug!("Search stopped before the deadline"),
            }
        })
        .map_err(|e| QueensError::Timer(format!("failed to spawn deadline: {}", e)))
}
