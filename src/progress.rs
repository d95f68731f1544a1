//! Progress reporting and cooperative cancellation.
//!
//! Long computations report through an injected [`ProgressSink`]. Reports are advisory and never
//! influence results, with one exception: a sink that answers `is_cancelled() == true` stops the
//! computation with [`Error::Cancelled`](crate::Error::Cancelled).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Start nodes processed between two progress reports during cache construction.
pub const PROGRESS_BATCH: usize = 200;

pub trait ProgressSink {
    /// `done` of `total` start nodes processed.
    fn progress(&self, _done: usize, _total: usize) {}

    /// All walks of a cache build are done.
    fn finished(&self, _walks: u64) {}

    /// A subgraph estimate ran `performed` corrective walks where a fresh simulation would have
    /// needed `from_scratch`.
    fn corrections(&self, _performed: u64, _from_scratch: u64) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Reports nothing, never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Shared cancellation switch. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Emits reports through the `log` facade, optionally tied to a [`CancelFlag`].
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    cancel: Option<CancelFlag>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }
}

impl ProgressSink for LogProgress {
    fn progress(&self, done: usize, total: usize) {
        let pct = if total == 0 { 100.0 } else { 100.0 * done as f64 / total as f64 };
        log::info!("progress = {pct:.2}% ({done}/{total} start nodes)");
    }

    fn finished(&self, walks: u64) {
        log::info!("total walks performed: {walks}");
    }

    fn corrections(&self, performed: u64, from_scratch: u64) {
        log::info!("performing {performed} random walks instead of {from_scratch}");
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}
