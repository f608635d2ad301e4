//! Read-path counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of client activity since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    /// Reads answered with a live payload
    pub hits: u64,
    /// Reads that found nothing in the store
    pub misses: u64,
    /// Reads answered by a negative-cache tombstone
    pub tombstone_hits: u64,
    /// Loader invocations, synchronous and background
    pub loader_calls: u64,
    /// Logical-expiration reads that returned a stale payload
    pub stale_reads: u64,
    /// Lock acquisitions that found the key already locked
    pub lock_contentions: u64,
    /// Background rebuilds accepted by the scheduler
    pub rebuilds_scheduled: u64,
    /// Background rebuilds rejected by the scheduler
    pub rebuilds_rejected: u64,
}

impl ClientStats {
    /// Fraction of positive and negative hits over all classified reads
    pub fn hit_rate(&self) -> f64 {
        let answered = self.hits + self.tombstone_hits + self.stale_reads;
        let total = answered + self.misses;
        if total > 0 {
            answered as f64 / total as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    tombstone_hits: AtomicU64,
    loader_calls: AtomicU64,
    stale_reads: AtomicU64,
    lock_contentions: AtomicU64,
    rebuilds_scheduled: AtomicU64,
    rebuilds_rejected: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn tombstone_hit(&self) {
        self.tombstone_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn loader_call(&self) {
        self.loader_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stale_read(&self) {
        self.stale_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn lock_contention(&self) {
        self.lock_contentions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn rebuild_scheduled(&self) {
        self.rebuilds_scheduled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn rebuild_rejected(&self) {
        self.rebuilds_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ClientStats {
        ClientStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            tombstone_hits: self.tombstone_hits.load(Ordering::Relaxed),
            loader_calls: self.loader_calls.load(Ordering::Relaxed),
            stale_reads: self.stale_reads.load(Ordering::Relaxed),
            lock_contentions: self.lock_contentions.load(Ordering::Relaxed),
            rebuilds_scheduled: self.rebuilds_scheduled.load(Ordering::Relaxed),
            rebuilds_rejected: self.rebuilds_rejected.load(Ordering::Relaxed),
        }
    }
}
