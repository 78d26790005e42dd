//! Shared capability traits and constants for the witness subsystem.
//!
//! Everything the collecting shim, the builder, the replay database and the
//! proof generator need in common lives here: the state-reader capability
//! traits themselves, the log type they share, and the numeric constants
//! (proof depth, size ceilings, cache capacity) quoted by more than one
//! downstream crate. There is deliberately no runtime-dispatched `dyn` object
//! anywhere in this crate: the collecting shim and the replay database are
//! both generic over a reader type bound by [`StateReader`], so no
//! downcasting is ever required.

mod constants;
mod log;
mod state;

pub use constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_PROOF_DEPTH, MAX_BUNDLE_SIZE, MAX_ENCODED_WITNESS_SIZE,
    MAX_PROOF_DEPTH, MAX_VALIDATOR_WITNESS_SIZE,
};
pub use log::Log;
pub use state::{ProofStateReader, StateReader};

pub use alloy_primitives::{Address, Bytes, B256, U256};
