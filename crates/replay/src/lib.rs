//! Stateless replay database: a [`sbw_core::StateReader`] implementation
//! served entirely from a finalized [`sbw_witness::Witness`], supporting
//! nested snapshots with full revert.

mod account;
mod db;
mod error;

pub use account::ReplayAccount;
pub use db::Replay;
pub use error::ReplayError;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};
    use sbw_core::StateReader;
    use sbw_witness::Builder;

    fn witness_with_balance_and_slot() -> sbw_witness::Witness {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        let addr = Address::repeat_byte(0x01);
        builder
            .record_account_access(addr, true, 0, U256::from(1000u64), B256::ZERO)
            .unwrap();
        builder
            .record_read(addr, B256::repeat_byte(0x01), B256::repeat_byte(0xff))
            .unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn revert_restores_balance_and_storage_and_committed_state_is_time_invariant() {
        let witness = witness_with_balance_and_slot();
        let addr = Address::repeat_byte(0x01);
        let slot = B256::repeat_byte(0x01);

        let mut replay = Replay::new(&witness).unwrap();
        let snap = replay.snapshot();
        replay.add_balance(addr, U256::from(500u64));
        replay.set_state(addr, slot, B256::repeat_byte(0xdd));
        assert_eq!(replay.get_committed_state(addr, slot), B256::repeat_byte(0xff));

        replay.revert_to_snapshot(snap);

        assert_eq!(replay.get_balance(addr), U256::from(1000u64));
        assert_eq!(replay.get_state(addr, slot), B256::repeat_byte(0xff));
        assert_eq!(replay.get_committed_state(addr, slot), B256::repeat_byte(0xff));
    }

    #[test]
    fn set_nonce_on_absent_address_creates_implicit_non_existent_account() {
        let witness = witness_with_balance_and_slot();
        let mut replay = Replay::new(&witness).unwrap();
        let fresh = Address::repeat_byte(0x99);

        replay.set_nonce(fresh, 7);
        assert!(!replay.exist(fresh));
        assert_eq!(replay.get_nonce(fresh), 0);
    }

    #[test]
    fn add_balance_on_absent_address_creates_existing_account() {
        let witness = witness_with_balance_and_slot();
        let mut replay = Replay::new(&witness).unwrap();
        let fresh = Address::repeat_byte(0x98);

        replay.add_balance(fresh, U256::from(1u64));
        assert!(replay.exist(fresh));
    }

    #[test]
    fn nested_snapshots_invalidate_on_ancestor_revert() {
        let witness = witness_with_balance_and_slot();
        let addr = Address::repeat_byte(0x01);
        let mut replay = Replay::new(&witness).unwrap();

        let outer = replay.snapshot();
        replay.add_balance(addr, U256::from(1u64));
        let inner = replay.snapshot();
        replay.add_balance(addr, U256::from(1u64));

        replay.revert_to_snapshot(outer);
        assert_eq!(replay.get_balance(addr), U256::from(1000u64));

        // `inner` was invalidated by reverting to `outer`; reverting to it
        // again must be a no-op rather than resurrecting stale state.
        replay.add_balance(addr, U256::from(9u64));
        replay.revert_to_snapshot(inner);
        assert_eq!(replay.get_balance(addr), U256::from(1009u64));
    }

    #[test]
    fn self_destruct_is_noop_on_non_existent_account() {
        let witness = witness_with_balance_and_slot();
        let mut replay = Replay::new(&witness).unwrap();
        let dead = Address::repeat_byte(0x77);

        replay.self_destruct(dead);
        assert!(!replay.has_self_destructed(dead));
    }

    #[test]
    fn empty_witness_is_rejected() {
        let empty = sbw_witness::Witness {
            parent_hash: B256::ZERO,
            state_root: B256::ZERO,
            block_number: 0,
            pre_state: Default::default(),
            codes: Default::default(),
            state_diffs: Vec::new(),
            witness_hash: B256::ZERO,
        };
        assert!(matches!(Replay::new(&empty), Err(ReplayError::EmptyWitness)));
    }

    #[test]
    fn new_with_max_size_rejects_oversized_witness() {
        let witness = witness_with_balance_and_slot();
        let size = witness.estimated_size();
        assert!(matches!(
            Replay::new_with_max_size(&witness, size - 1),
            Err(ReplayError::WitnessTooLarge { actual, max }) if actual == size && max == size - 1
        ));
    }
}
