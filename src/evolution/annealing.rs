//! # Annealing
//!
//! The fitness threshold is the single knob of the search. A board may breed
//! only while its fitness is at or below the threshold, and a child is mutated
//! with probability `(threshold + 1) / 65`. A background timer halves the
//! threshold on every tick, so the search starts out permissive and grows
//! stricter as time passes.
//!
//! The threshold is shared between the evolution loop and the timer thread
//! through [`FitnessThreshold`], a cloneable handle to a mutex-guarded integer.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{select, tick};
use tracing::{debug, info};

use super::shutdown::Shutdown;
use crate::error::{QueensError, Result};

/// A shared, only-decreasing fitness threshold.
///
/// Every read and every update takes the same lock and releases it before
/// returning.
#[derive(Debug, Clone)]
pub struct FitnessThreshold {
    value: Arc<Mutex<usize>>,
}

impl FitnessThreshold {
    pub fn new(initial: usize) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    /// Returns the current threshold.
    pub fn get(&self) -> usize {
        *self.lock()
    }

    /// Returns `true` if `value` is at or below the current threshold.
    pub fn admits(&self, value: usize) -> bool {
        value <= *self.lock()
    }

    /// Halves the threshold, rounding down, and returns the new value.
    pub fn halve(&self) -> usize {
        let mut value = self.lock();
        *value /= 2;
        *value
    }

    // Poisoning is ignored, the guarded value is a plain integer.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Starts the annealing timer.
///
/// The spawned thread halves `threshold` once per `interval` until `shutdown`
/// is triggered.
///
/// # Errors
///
/// Returns [`QueensError::Timer`] if the thread cannot be spawned.
pub fn spawn_annealer(
    threshold: FitnessThreshold,
    shutdown: Shutdown,
    interval: Duration,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("annealer".to_string())
        .spawn(move || {
            let ticker = tick(interval);
            loop {
                select! {
                    recv(shutdown.signal()) -> _ => break,
                    recv(ticker) -> _ => {
                        let value = threshold.halve();
                        info!(threshold = value, "Reduced fitness threshold");
                    }
                }
            }
            debug!("Annealer stopped");
        })
        .map_err(|e| QueensError::Timer(format!("failed to spawn annealer: {}", e)))
}
