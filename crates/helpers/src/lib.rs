//! Logging and metrics macros shared by every witness crate.
//!
//! Kept intentionally tiny: the core never depends on a process-wide
//! registry (see the Design Notes on global registries), so `metrics` here
//! is a handful of atomic counters, not a `prometheus`-style registry.

#[cfg(feature = "dev")]
pub use tracing;

#[macro_use]
mod macros;

/// Metrics module
#[cfg(feature = "metrics")]
pub mod metrics;
