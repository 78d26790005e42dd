//! Inclusion-proof derivation and verification over a finalized witness.
//!
//! Proof paths in this crate are a deterministic simulation of a
//! Merkle-style inclusion path, not a real trie proof; see
//! [`path::build_path`] for the exact construction and its caveats.

mod error;
mod generator;
mod model;
mod path;
mod verify;

pub use error::ProofError;
pub use generator::{storage_root, ProofGenerator};
pub use model::{bundle_stats, AccountProof, BundleStats, ProofBundle, ProofNode, StorageProof};
pub use path::{build_path, nodes_internally_consistent, ProofConfig};
pub use verify::{verify_account_proof, verify_bundle, verify_storage_proof};

#[cfg(test)]
#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address, B256, U256};
    use sbw_witness::Builder;
    use std::collections::BTreeMap;

    fn witness_with_two_accounts() -> sbw_witness::Witness {
        let builder = Builder::new(B256::repeat_byte(0x01), B256::repeat_byte(0xff), 42);
        let a1: Address = address!("0000000000000000000000000000000000000001");
        let a2: Address = address!("0000000000000000000000000000000000000002");
        let slot1 = B256::repeat_byte(0x11);
        let slot2 = B256::repeat_byte(0x12);
        let slot3 = B256::repeat_byte(0x13);

        builder
            .record_account_access(a1, true, 1, U256::from(100u64), sbw_primitives::EMPTY_CODE_HASH)
            .unwrap();
        builder
            .record_account_access(a2, true, 2, U256::from(200u64), sbw_primitives::EMPTY_CODE_HASH)
            .unwrap();
        builder.record_read(a1, slot1, B256::repeat_byte(0xa1)).unwrap();
        builder.record_read(a1, slot2, B256::repeat_byte(0xa2)).unwrap();
        builder.record_read(a2, slot3, B256::repeat_byte(0xa3)).unwrap();

        builder.finalize().unwrap()
    }

    #[test]
    fn bundle_is_deterministic_and_covers_every_account_and_slot() {
        let witness = witness_with_two_accounts();
        let gen = ProofGenerator::new(ProofConfig::default());

        let bundle1 = gen.generate_bundle(Some(&witness)).unwrap();
        let bundle2 = gen.generate_bundle(Some(&witness)).unwrap();

        assert_eq!(bundle1.account_proofs.len(), 2);
        assert_eq!(bundle1.storage_proofs.len(), 3);

        let hashes1: std::collections::BTreeSet<_> = bundle1.shared_nodes.keys().copied().collect();
        let hashes2: std::collections::BTreeSet<_> = bundle2.shared_nodes.keys().copied().collect();
        assert_eq!(hashes1, hashes2);
        assert_eq!(bundle1, bundle2);

        assert!(verify_bundle(Some(&bundle1)).unwrap());
    }

    #[test]
    fn tampering_with_a_node_payload_fails_verification() {
        let witness = witness_with_two_accounts();
        let gen = ProofGenerator::new(ProofConfig::default());
        let mut bundle = gen.generate_bundle(Some(&witness)).unwrap();

        bundle.account_proofs[0].nodes[0].data = vec![0xba, 0xad];

        assert!(!verify_bundle(Some(&bundle)).unwrap());
    }

    #[test]
    fn generate_bundle_rejects_nil_witness() {
        let gen = ProofGenerator::new(ProofConfig::default());
        assert!(matches!(gen.generate_bundle(None), Err(ProofError::NilWitness)));
    }

    #[test]
    fn generate_bundle_rejects_empty_witness() {
        let witness = sbw_witness::Witness {
            parent_hash: B256::repeat_byte(0x01),
            state_root: B256::repeat_byte(0xff),
            block_number: 42,
            pre_state: BTreeMap::new(),
            codes: BTreeMap::new(),
            state_diffs: Vec::new(),
            witness_hash: B256::ZERO,
        };
        let gen = ProofGenerator::new(ProofConfig::default());
        assert!(matches!(
            gen.generate_bundle(Some(&witness)),
            Err(ProofError::EmptyWitness)
        ));
    }

    #[test]
    fn verify_rejects_nil_and_empty_inputs() {
        assert!(matches!(verify_account_proof(None), Err(ProofError::NilProof)));
        assert!(matches!(verify_bundle(None), Err(ProofError::NilProof)));

        let empty = AccountProof {
            state_root: B256::repeat_byte(1),
            address: Address::ZERO,
            address_key: B256::ZERO,
            exists: false,
            nodes: Vec::new(),
        };
        assert!(matches!(
            verify_account_proof(Some(&empty)),
            Err(ProofError::EmptyNodes)
        ));
    }

    #[test]
    fn account_and_storage_proofs_are_internally_consistent() {
        let witness = witness_with_two_accounts();
        let gen = ProofGenerator::new(ProofConfig::default());
        let a1: Address = address!("0000000000000000000000000000000000000001");
        let slot1 = B256::repeat_byte(0x11);

        let account_proof = gen.generate_account_proof(&witness, a1).unwrap();
        assert!(verify_account_proof(Some(&account_proof)).unwrap());

        let storage_proof = gen.generate_storage_proof(&witness, a1, slot1).unwrap();
        assert!(verify_storage_proof(Some(&storage_proof)).unwrap());
    }

    #[test]
    fn bundle_stats_match_bundle_contents() {
        let witness = witness_with_two_accounts();
        let gen = ProofGenerator::new(ProofConfig::default());
        let bundle = gen.generate_bundle(Some(&witness)).unwrap();
        let stats = bundle_stats(&bundle);
        assert_eq!(stats.account_proof_count, 2);
        assert_eq!(stats.storage_proof_count, 3);
        assert_eq!(stats.unique_node_count, bundle.shared_nodes.len());
    }
}
