use std::sync::Mutex;

/// Counters for matching and settlement activity.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub matching_runs: usize,
    pub matches_emitted: usize,
    pub contracts_executed: usize,
    pub contracts_failed: usize,
}

#[derive(Default)]
struct Metrics {
    snapshot: MetricsSnapshot,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_matching_run(&self, emitted: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.snapshot.matching_runs += 1;
            metrics.snapshot.matches_emitted += emitted;
        }
    }

    pub fn record_contract(&self, succeeded: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            if succeeded {
                metrics.snapshot.contracts_executed += 1;
            } else {
                metrics.snapshot.contracts_failed += 1;
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            metrics.snapshot
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_matching_run(3);
        metrics.record_matching_run(0);
        metrics.record_contract(true);
        metrics.record_contract(false);
        let snap = metrics.snapshot();
        assert_eq!(snap.matching_runs, 2);
        assert_eq!(snap.matches_emitted, 3);
        assert_eq!(snap.contracts_executed, 1);
        assert_eq!(snap.contracts_failed, 1);
    }
}
