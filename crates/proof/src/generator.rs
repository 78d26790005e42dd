use crate::error::ProofError;
use crate::model::{AccountProof, ProofBundle, StorageProof};
use crate::path::{build_path, ProofConfig};
use alloy_primitives::{Address, B256};
use sbw_helpers::{dev_debug, update_metrics_counter};
use sbw_witness::Witness;
use std::collections::BTreeMap;

/// Derives inclusion proofs, individually or batched, over a finalized
/// witness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofGenerator {
    config: ProofConfig,
}

impl ProofGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: ProofConfig) -> Self {
        Self { config }
    }

    /// Generates the inclusion proof for `address`.
    pub fn generate_account_proof(
        &self,
        witness: &Witness,
        address: Address,
    ) -> Result<AccountProof, ProofError> {
        if witness.state_root.is_zero() {
            return Err(ProofError::NilRoot);
        }
        let account = witness
            .account(&address)
            .ok_or(ProofError::AddressNotFound(address))?;
        let address_key = sbw_primitives::keccak256(address.as_slice());
        let nodes = build_path(witness.state_root, address_key, self.config.depth);
        Ok(AccountProof {
            state_root: witness.state_root,
            address,
            address_key,
            exists: account.exists,
            nodes,
        })
    }

    /// Generates the inclusion proof for `(address, slot)`.
    pub fn generate_storage_proof(
        &self,
        witness: &Witness,
        address: Address,
        slot: B256,
    ) -> Result<StorageProof, ProofError> {
        if witness.state_root.is_zero() {
            return Err(ProofError::NilRoot);
        }
        let account = witness
            .account(&address)
            .ok_or(ProofError::AddressNotFound(address))?;
        let value = *account
            .storage
            .get(&slot)
            .ok_or(ProofError::SlotNotFound(address, slot))?;

        let storage_root = storage_root(address, witness.state_root);
        let slot_hash = sbw_primitives::keccak256(slot.as_slice());
        let nodes = build_path(storage_root, slot_hash, self.config.depth);
        Ok(StorageProof {
            address,
            storage_root,
            slot_key: slot,
            slot_hash,
            value,
            nodes,
        })
    }

    /// Generates a bundle covering every account and storage slot recorded
    /// in `witness`.
    ///
    /// Rejects a nil witness, a zero state root, or a witness with no
    /// accounts. Nodes are deduplicated by hash into `shared_nodes`;
    /// `total_size` is checked against `self.config.max_bundle_size`.
    pub fn generate_bundle(&self, witness: Option<&Witness>) -> Result<ProofBundle, ProofError> {
        let witness = witness.ok_or(ProofError::NilWitness)?;
        if witness.state_root.is_zero() {
            return Err(ProofError::NilRoot);
        }
        if witness.pre_state.is_empty() {
            return Err(ProofError::EmptyWitness);
        }

        let mut shared_nodes: BTreeMap<B256, Vec<u8>> = BTreeMap::new();
        let mut account_proofs = Vec::with_capacity(witness.pre_state.len());

        for &address in witness.pre_state.keys() {
            let proof = self.generate_account_proof(witness, address)?;
            for node in &proof.nodes {
                shared_nodes.entry(node.hash).or_insert_with(|| node.data.clone());
            }
            account_proofs.push(proof);
        }

        let mut storage_proofs = Vec::new();
        for (&address, account) in witness.pre_state.iter() {
            for &slot in account.storage.keys() {
                let proof = self.generate_storage_proof(witness, address, slot)?;
                for node in &proof.nodes {
                    shared_nodes.entry(node.hash).or_insert_with(|| node.data.clone());
                }
                storage_proofs.push(proof);
            }
        }

        let total_size = estimate_bundle_size(&account_proofs, &storage_proofs, &shared_nodes);
        if total_size > self.config.max_bundle_size {
            update_metrics_counter!(proof_bundle_rejected_total);
            return Err(ProofError::BundleTooLarge {
                actual: total_size,
                max: self.config.max_bundle_size,
            });
        }

        dev_debug!(
            accounts = account_proofs.len(),
            slots = storage_proofs.len(),
            total_size,
            "generated proof bundle"
        );

        Ok(ProofBundle {
            state_root: witness.state_root,
            account_proofs,
            storage_proofs,
            shared_nodes,
            total_size,
        })
    }
}

/// `H(address || state_root)`, the simulated per-account storage root.
pub fn storage_root(address: Address, state_root: B256) -> B256 {
    let mut hasher = sbw_primitives::stream_hasher();
    hasher.update(address.as_slice());
    hasher.update(state_root.as_slice());
    hasher.finalize()
}

/// Conservative wire-size estimate: the same fixed per-field contributions
/// used by the builder's `estimate_size` (address 20, hash 32, flag 1),
/// plus the deduplicated node payloads actually carried in `shared_nodes`.
fn estimate_bundle_size(
    account_proofs: &[AccountProof],
    storage_proofs: &[StorageProof],
    shared_nodes: &BTreeMap<B256, Vec<u8>>,
) -> usize {
    let mut size = 0usize;
    size += account_proofs.len() * (20 + 32 + 1);
    size += storage_proofs.len() * (20 + 32 + 32 + 32 + 32);
    for data in shared_nodes.values() {
        size += 32 + data.len();
    }
    size
}
