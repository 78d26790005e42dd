use alloy_primitives::{Bytes, B256};
use sbw_proof::{AccountProof, StorageProof};

/// A cached set of proofs for a single block, keyed externally by
/// `block_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedWitness {
    /// Hash of the block this entry was produced for.
    pub block_hash: B256,
    /// Number of the block this entry was produced for.
    pub block_number: u64,
    /// State root the contained proofs are relative to.
    pub state_root: B256,
    /// Account proofs carried by this entry.
    pub account_proofs: Vec<AccountProof>,
    /// Storage proofs carried by this entry.
    pub storage_proofs: Vec<StorageProof>,
    /// Bytecode chunks referenced by the entry's account proofs.
    pub code_chunks: Vec<Bytes>,
    /// Caller-supplied size in bytes, summed by [`crate::Cache::total_size`].
    pub size: usize,
}

/// Snapshot of cache counters at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of entries currently stored.
    pub entries: usize,
    /// Sum of `size` across all entries.
    pub total_size: usize,
    /// Cumulative cache hits since construction.
    pub hits: u64,
    /// Cumulative cache misses since construction.
    pub misses: u64,
}
