use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

/// Observer for allocation runs.
pub trait AllocationMetrics: Send + Sync {
    /// Called once per completed committed run.
    fn record_run(&self, latency: Duration, assigned: usize, unmatched: usize);
    /// Called once per completed preview query.
    fn record_preview(&self, latency: Duration, hits: usize);
}

/// Install or clear the global allocation metrics recorder.
pub fn set_allocation_metrics(recorder: Option<Arc<dyn AllocationMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("allocation metrics lock poisoned");
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn AllocationMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn AllocationMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn AllocationMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}
