//! Witness data model and canonical, thread-safe assembly.
//!
//! A [`Witness`] is the complete pre-state plus state-diffs captured during
//! one block's execution — everything a [`crate::Builder`] accumulates
//! under its mutex is frozen into this immutable form by
//! [`Builder::finalize`]. [`wire`] implements the reference binary
//! encoding used to move a witness between processes.

mod builder;
mod error;
mod model;
pub mod wire;

pub use builder::Builder;
pub use error::WitnessError;
pub use model::{FieldDiff, PreStateAccount, StateDiff, StorageChange, Witness};

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
