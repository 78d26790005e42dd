use alloy_primitives::{Address, B256};

/// Errors produced generating or verifying proofs.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// `generate_bundle` (or a single proof) was called with no witness.
    #[error("witness is nil")]
    NilWitness,
    /// The witness's state root is zero.
    #[error("state root is zero")]
    NilRoot,
    /// The witness recorded zero accounts.
    #[error("witness has no accounts")]
    EmptyWitness,
    /// The requested address is absent from the source witness.
    #[error("address {0} not found in witness")]
    AddressNotFound(Address),
    /// The requested slot is absent from the source witness.
    #[error("slot {1} not found for address {0}")]
    SlotNotFound(Address, B256),
    /// The generated bundle exceeds the configured maximum size.
    #[error("proof bundle size {actual} exceeds maximum {max}")]
    BundleTooLarge {
        /// The size that would have been produced.
        actual: usize,
        /// The configured maximum.
        max: usize,
    },
    /// A verification function was called with no proof to check.
    #[error("proof input is nil")]
    NilProof,
    /// A verification function was called with a proof that has no nodes.
    #[error("proof has no nodes")]
    EmptyNodes,
}
