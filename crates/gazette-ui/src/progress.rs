//! Homepage progress-bar demo: a one-shot intersection trigger and a stopwatch.

use std::time::{Duration, Instant};

/// How often the stopwatch label refreshes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Fraction of the bar that must be visible to start the demo.
pub const VISIBILITY_THRESHOLD: f64 = 1.0;

/// Fires once, on the first intersection that meets the threshold.
#[derive(Debug, Clone)]
pub struct ProgressTrigger {
    threshold: f64,
    fired: bool,
}

impl ProgressTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    /// Feed an intersection ratio. Returns `true` exactly once; the observer
    /// is disconnected afterwards.
    pub fn on_intersection(&mut self, ratio: f64) -> bool {
        if self.fired || ratio < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_disconnected(&self) -> bool {
        self.fired
    }
}

impl Default for ProgressTrigger {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

/// Elapsed-time label shown while the progress bar fills.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
    running: bool,
}

impl Stopwatch {
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Label for the given instant, e.g. `"1.5s"`.
    pub fn label(&self, now: Instant) -> String {
        label_for(now.saturating_duration_since(self.started))
    }

    /// Stop on `transitionend` or `transitioncancel`. Returns `false` if
    /// already stopped.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}

/// Seconds with one decimal place.
pub fn label_for(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}
