//! Explicit wall-clock timer for the resampling phase

use std::time::{Duration, Instant};

/// Accumulating stopwatch
///
/// Passed by value into a conversion and handed back with its result, so
/// timing never lives in process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// A stopped stopwatch at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) timing; earlier laps are kept
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop timing and return the total elapsed time
    pub fn stop(&mut self) -> Duration {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
        self.accumulated
    }

    /// Whether the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total elapsed time, including a running lap
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    /// Total elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}
