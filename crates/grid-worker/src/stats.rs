use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use grid_protocol::MessageKind;

/// Per-kind dispatch counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KindStats {
    /// Messages of this kind dispatched.
    pub dispatched: u64,
    /// Dispatches that surfaced a typed failure.
    pub failed: u64,
    /// Total wall-clock time spent in handlers for this kind.
    pub elapsed: Duration,
}

/// Dispatch statistics collector attached to a worker in debug mode.
///
/// Observes every dispatch (kind, success flag, elapsed time) without
/// altering dispatch semantics. Aggregation beyond these counters, and any
/// rendering/export, belongs to the embedder.
pub struct WorkerStats {
    started: Instant,
    per_kind: Mutex<HashMap<MessageKind, KindStats>>,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            per_kind: Mutex::new(HashMap::new()),
        }
    }

    /// Record one dispatch outcome.
    pub fn record(&self, kind: MessageKind, ok: bool, elapsed: Duration) {
        let mut per_kind = self.per_kind.lock().expect("lock poisoned");
        let entry = per_kind.entry(kind).or_default();
        entry.dispatched += 1;
        if !ok {
            entry.failed += 1;
        }
        entry.elapsed += elapsed;
    }

    /// Counters for one kind (zeroed when never dispatched).
    pub fn kind(&self, kind: MessageKind) -> KindStats {
        self.per_kind
            .lock()
            .expect("lock poisoned")
            .get(&kind)
            .copied()
            .unwrap_or_default()
    }

    /// Total messages dispatched across all kinds.
    pub fn total_dispatched(&self) -> u64 {
        self.per_kind
            .lock()
            .expect("lock poisoned")
            .values()
            .map(|s| s.dispatched)
            .sum()
    }

    /// Total dispatches that surfaced a typed failure.
    pub fn total_failed(&self) -> u64 {
        self.per_kind
            .lock()
            .expect("lock poisoned")
            .values()
            .map(|s| s.failed)
            .sum()
    }

    /// Time since the collector was attached.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_kind = self.per_kind.lock().expect("lock poisoned");
        let dispatched: u64 = per_kind.values().map(|s| s.dispatched).sum();
        let failed: u64 = per_kind.values().map(|s| s.failed).sum();
        writeln!(f, "dispatched={dispatched} failed={failed}")?;

        let mut kinds: Vec<(&MessageKind, &KindStats)> = per_kind.iter().collect();
        kinds.sort_by_key(|(kind, _)| kind.name());
        for (kind, stats) in kinds {
            writeln!(
                f,
                "  {}: dispatched={} failed={} elapsed={:?}",
                kind, stats.dispatched, stats.failed, stats.elapsed
            )?;
        }
        Ok(())
    }
}
