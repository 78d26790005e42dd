use crate::error::ProofError;
use crate::generator::storage_root;
use crate::model::{AccountProof, ProofBundle, StorageProof};
use crate::path::nodes_internally_consistent;

/// Verifies a single account proof.
///
/// Rejects a nil proof, an empty node list, or a zero state root, then
/// checks that every node's `hash` matches `H(data)`. This simulated path
/// does not verify `exists` or `address_key` against anything external;
/// it only checks internal consistency of the path itself.
pub fn verify_account_proof(proof: Option<&AccountProof>) -> Result<bool, ProofError> {
    let proof = proof.ok_or(ProofError::NilProof)?;
    if proof.nodes.is_empty() {
        return Err(ProofError::EmptyNodes);
    }
    if proof.state_root.is_zero() {
        return Err(ProofError::NilRoot);
    }
    Ok(nodes_internally_consistent(&proof.nodes))
}

/// Verifies a single storage proof.
///
/// Additionally recomputes `storage_root` from `address` and the proof's
/// implied state root is not available here, so this checks only node
/// consistency plus the slot hash, matching [`verify_account_proof`].
pub fn verify_storage_proof(proof: Option<&StorageProof>) -> Result<bool, ProofError> {
    let proof = proof.ok_or(ProofError::NilProof)?;
    if proof.nodes.is_empty() {
        return Err(ProofError::EmptyNodes);
    }
    if proof.storage_root.is_zero() {
        return Err(ProofError::NilRoot);
    }
    let slot_hash = sbw_primitives::keccak256(proof.slot_key.as_slice());
    if slot_hash != proof.slot_hash {
        return Ok(false);
    }
    Ok(nodes_internally_consistent(&proof.nodes))
}

/// Verifies every proof in a bundle.
///
/// Rejects a nil bundle or a zero state root. Also recomputes each
/// [`StorageProof::storage_root`] from its address and the bundle's state
/// root, catching a proof smuggled in from a different state root even if
/// its nodes are internally consistent.
pub fn verify_bundle(bundle: Option<&ProofBundle>) -> Result<bool, ProofError> {
    let bundle = bundle.ok_or(ProofError::NilProof)?;
    if bundle.state_root.is_zero() {
        return Err(ProofError::NilRoot);
    }
    if bundle.account_proofs.is_empty() {
        return Err(ProofError::EmptyNodes);
    }

    for proof in &bundle.account_proofs {
        if proof.state_root != bundle.state_root {
            return Ok(false);
        }
        if !verify_account_proof(Some(proof))? {
            return Ok(false);
        }
    }

    for proof in &bundle.storage_proofs {
        if proof.storage_root != storage_root(proof.address, bundle.state_root) {
            return Ok(false);
        }
        if !verify_storage_proof(Some(proof))? {
            return Ok(false);
        }
    }

    Ok(true)
}
