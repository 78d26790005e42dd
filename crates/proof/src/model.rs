use alloy_primitives::{Address, B256};
use std::collections::BTreeMap;

/// A single step of a simulated Merkle-style inclusion path.
///
/// `hash` is defined to always equal `H(data)` for a well-formed node;
/// verification checks exactly that invariant. See the module docs on
/// [`crate::path`] for how `data` itself is derived — this is a
/// transport-size simulation, not a real trie proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofNode {
    /// Hash of `data` under the configured hash primitive.
    pub hash: B256,
    /// The node's payload.
    pub data: Vec<u8>,
}

/// An inclusion proof for a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProof {
    /// State root this proof is relative to.
    pub state_root: B256,
    /// The proven address.
    pub address: Address,
    /// `H(address)`, the key used to derive the proof path.
    pub address_key: B256,
    /// Whether the address existed in the witness.
    pub exists: bool,
    /// The path nodes, root-to-leaf.
    pub nodes: Vec<ProofNode>,
}

/// An inclusion proof for a single storage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageProof {
    /// The account the slot belongs to.
    pub address: Address,
    /// `H(address || state_root)`, the simulated per-account storage root.
    pub storage_root: B256,
    /// The slot key.
    pub slot_key: B256,
    /// `H(slot_key)`, the key used to derive the proof path.
    pub slot_hash: B256,
    /// The slot's pre-state value.
    pub value: B256,
    /// The path nodes, root-to-leaf.
    pub nodes: Vec<ProofNode>,
}

/// A batched, deduplicated collection of inclusion proofs over one witness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofBundle {
    /// The state root every proof in this bundle is relative to.
    pub state_root: B256,
    /// Per-address account proofs, sorted by address.
    pub account_proofs: Vec<AccountProof>,
    /// Per-slot storage proofs, sorted by address then slot.
    pub storage_proofs: Vec<StorageProof>,
    /// Deduplicated proof-node payloads across every proof, keyed by hash.
    pub shared_nodes: BTreeMap<B256, Vec<u8>>,
    /// Estimated wire size in bytes.
    pub total_size: usize,
}

/// Summary statistics over a [`ProofBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleStats {
    /// Number of account proofs in the bundle.
    pub account_proof_count: usize,
    /// Number of storage proofs in the bundle.
    pub storage_proof_count: usize,
    /// Number of distinct node hashes across every proof.
    pub unique_node_count: usize,
    /// Estimated wire size in bytes.
    pub total_size: usize,
}

/// Computes summary statistics over `bundle`.
pub fn bundle_stats(bundle: &ProofBundle) -> BundleStats {
    BundleStats {
        account_proof_count: bundle.account_proofs.len(),
        storage_proof_count: bundle.storage_proofs.len(),
        unique_node_count: bundle.shared_nodes.len(),
        total_size: bundle.total_size,
    }
}
