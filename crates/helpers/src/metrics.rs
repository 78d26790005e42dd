//! Minimal counter/gauge surface for the ambient metrics every stateful
//! component in this corpus exposes for its own operation.
//!
//! This is deliberately not a registry: there is no discovery mechanism, no
//! export format, and no `/metrics` endpoint. Callers that want one can wrap
//! [`Counter::get`]/[`Gauge::get`] with whatever exporter they like.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increments the counter by one.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads the current value.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A point-in-time value that can go up or down.
#[derive(Debug, Default)]
pub struct Gauge(AtomicI64);

impl Gauge {
    /// Sets the gauge to an absolute value.
    pub fn set(&self, value: i64) {
        self.0.store(value, Ordering::Relaxed);
    }

    /// Reads the current value.
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

macro_rules! static_counter {
    ($name:ident) => {
        #[doc = concat!("Accessor for the `", stringify!($name), "` counter.")]
        pub fn $name() -> &'static Counter {
            static METRIC: Counter = Counter(AtomicU64::new(0));
            &METRIC
        }
    };
}

macro_rules! static_gauge {
    ($name:ident) => {
        #[doc = concat!("Accessor for the `", stringify!($name), "` gauge.")]
        pub fn $name() -> &'static Gauge {
            static METRIC: Gauge = Gauge(AtomicI64::new(0));
            &METRIC
        }
    };
}

static_counter!(cache_hits);
static_counter!(cache_misses);
static_counter!(cache_evictions);
static_gauge!(cache_entries);
static_counter!(builder_finalized_total);
static_counter!(proof_bundle_rejected_total);
