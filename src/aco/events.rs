//! Run telemetry.
//!
//! The runner reports progress as [`AcoEvent`]s to an [`AcoObserver`].
//! Observing is optional and never changes the outcome of a run.

use super::config::TrailUpdate;

/// Progress report emitted by the runner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcoEvent {
    /// All ants of `iteration` finished.
    IterationCompleted {
        iteration: usize,
        iteration_best: f64,
        best_so_far: f64,
        improved: bool,
    },

    /// The trail was evaporated and reinforced after `iteration`.
    TrailUpdated {
        iteration: usize,
        strategy: TrailUpdate,
        /// Sum of the aggregate added to the trail.
        deposited: f64,
        min_trail: f64,
        max_trail: f64,
    },
}

/// Receives [`AcoEvent`]s during a run.
pub trait AcoObserver {
    fn on_event(&mut self, event: &AcoEvent);
}

impl<F: FnMut(&AcoEvent)> AcoObserver for F {
    fn on_event(&mut self, event: &AcoEvent) {
        self(event)
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AcoObserver for NoopObserver {
    fn on_event(&mut self, _event: &AcoEvent) {}
}
