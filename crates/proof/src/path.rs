//! Simulated Merkle-style proof path construction.
//!
//! This is deliberately not a real trie proof: it exists to exercise the
//! transport-size and determinism properties a real proof would have to
//! satisfy, without implementing a Merkle Patricia or binary trie. A
//! production system would substitute a real trie proof here; verification
//! is defined purely as internal node-hash consistency (`H(node.data) ==
//! node.hash`), and callers should not read anything more into it.

use crate::model::ProofNode;
use alloy_primitives::B256;
use sbw_core::{DEFAULT_PROOF_DEPTH, MAX_PROOF_DEPTH};

/// Configuration for proof generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofConfig {
    /// Path depth; each account or storage proof has exactly this many
    /// nodes.
    pub depth: u32,
    /// Maximum serialized bundle size accepted by `generate_bundle`.
    pub max_bundle_size: usize,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_PROOF_DEPTH,
            max_bundle_size: sbw_core::MAX_BUNDLE_SIZE,
        }
    }
}

impl ProofConfig {
    /// Sets the path depth, capping it at [`MAX_PROOF_DEPTH`].
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.min(MAX_PROOF_DEPTH);
        self
    }

    /// Sets the maximum bundle size.
    pub fn with_max_bundle_size(mut self, max_bundle_size: usize) -> Self {
        self.max_bundle_size = max_bundle_size;
        self
    }
}

/// Builds a `depth`-node proof path for `(root, key)`.
///
/// Step `i` computes `data_i = H(root || key || i_as_8_byte_BE)` and
/// `hash_i = H(data_i)`. Two calls with identical `root` and `key` produce
/// byte-identical node lists.
pub fn build_path(root: B256, key: B256, depth: u32) -> Vec<ProofNode> {
    (0..depth)
        .map(|i| {
            let mut step = sbw_primitives::stream_hasher();
            step.update(root.as_slice());
            step.update(key.as_slice());
            step.update(&(i as u64).to_be_bytes());
            let data = step.finalize();
            let hash = sbw_primitives::keccak256(data.as_slice());
            ProofNode {
                hash,
                data: data.as_slice().to_vec(),
            }
        })
        .collect()
}

/// Returns whether every node in `nodes` satisfies `H(node.data) ==
/// node.hash`.
pub fn nodes_internally_consistent(nodes: &[ProofNode]) -> bool {
    nodes
        .iter()
        .all(|node| sbw_primitives::keccak256(&node.data) == node.hash)
}
