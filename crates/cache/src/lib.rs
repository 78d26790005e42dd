//! Bounded, FIFO-evicting cache of per-block proof bundles.
//!
//! Keyed by block hash; capacity defaults to
//! [`sbw_core::DEFAULT_CACHE_CAPACITY`] and is never grown past what the
//! caller configures. Eviction order is pure insertion order: `store`
//! never reorders an existing key, so repeated overwrites of the same
//! hash do not refresh its position.

mod model;

pub use model::{CacheStats, CachedWitness};

use alloy_primitives::B256;
use sbw_helpers::{dev_trace, update_metrics_counter, update_metrics_gauge};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<B256, CachedWitness>,
    order: VecDeque<B256>,
}

/// A shared, thread-safe cache of [`CachedWitness`] entries.
#[derive(Debug)]
pub struct Cache {
    capacity: usize,
    inner: RwLock<Inner>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Cache {
    /// Creates a cache with the given capacity. A non-positive capacity
    /// falls back to [`sbw_core::DEFAULT_CACHE_CAPACITY`].
    pub fn new(capacity: i64) -> Self {
        let capacity = if capacity <= 0 {
            sbw_core::DEFAULT_CACHE_CAPACITY
        } else {
            capacity as usize
        };
        Self {
            capacity,
            inner: RwLock::new(Inner::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Stores `entry` under `block_hash`.
    ///
    /// A `None` entry is a no-op. If `block_hash` is already present, the
    /// stored entry is overwritten in place without affecting eviction
    /// order. Otherwise, entries are evicted from the front of the
    /// insertion queue until there is room, then `entry` is appended.
    pub fn store(&self, block_hash: B256, entry: Option<CachedWitness>) {
        let Some(entry) = entry else {
            return;
        };
        let mut inner = self.inner.write().unwrap();
        if inner.entries.contains_key(&block_hash) {
            inner.entries.insert(block_hash, entry);
            return;
        }
        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            dev_trace!(hash = %oldest, "cache evicted entry");
            update_metrics_counter!(cache_evictions);
        }
        inner.order.push_back(block_hash);
        inner.entries.insert(block_hash, entry);
        update_metrics_gauge!(cache_entries, inner.entries.len() as i64);
    }

    /// Looks up the entry for `block_hash`, recording a hit or a miss.
    pub fn get(&self, block_hash: &B256) -> Option<CachedWitness> {
        let inner = self.inner.read().unwrap();
        let found = inner.entries.get(block_hash).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            update_metrics_counter!(cache_hits);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            update_metrics_counter!(cache_misses);
        }
        found
    }

    /// Returns whether `block_hash` is present, without affecting hit/miss
    /// counters.
    pub fn has(&self, block_hash: &B256) -> bool {
        self.inner.read().unwrap().entries.contains_key(block_hash)
    }

    /// Removes the entry for `block_hash`, returning whether one was
    /// present.
    pub fn remove(&self, block_hash: &B256) -> bool {
        let mut inner = self.inner.write().unwrap();
        if inner.entries.remove(block_hash).is_none() {
            return false;
        }
        inner.order.retain(|hash| hash != block_hash);
        update_metrics_gauge!(cache_entries, inner.entries.len() as i64);
        true
    }

    /// Removes every entry with `block_number < threshold`, returning the
    /// count removed.
    pub fn prune_before(&self, threshold: u64) -> usize {
        let mut inner = self.inner.write().unwrap();
        let stale: Vec<B256> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.block_number < threshold)
            .map(|(hash, _)| *hash)
            .collect();
        for hash in &stale {
            inner.entries.remove(hash);
        }
        inner.order.retain(|hash| !stale.contains(hash));
        update_metrics_gauge!(cache_entries, inner.entries.len() as i64);
        stale.len()
    }

    /// Sum of `size` across all currently stored entries.
    pub fn total_size(&self) -> usize {
        self.inner.read().unwrap().entries.values().map(|e| e.size).sum()
    }

    /// A snapshot of the cache's current counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read().unwrap();
        CacheStats {
            entries: inner.entries.len(),
            total_size: inner.entries.values().map(|e| e.size).sum(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
