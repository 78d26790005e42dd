use crate::error::WitnessError;
use crate::model::{
    compute_witness_hash, estimate_size as estimate_witness_size, FieldDiff, PreStateAccount, StateDiff,
    StorageChange, Witness,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use sbw_helpers::{dev_trace, update_metrics_counter};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct AccountDiff {
    balance: FieldDiff<U256>,
    nonce: FieldDiff<u64>,
    storage: BTreeMap<B256, (B256, B256)>,
}

#[derive(Debug, Default)]
struct Inner {
    pre_state: BTreeMap<Address, PreStateAccount>,
    codes: BTreeMap<B256, Bytes>,
    diffs: BTreeMap<Address, AccountDiff>,
    finalized: bool,
}

/// Thread-safe accumulator that turns a stream of record calls into a
/// canonical, content-hashed [`Witness`].
///
/// All public methods take the builder's single mutex for the duration of a
/// short, allocation-bounded critical section (map lookups, map inserts,
/// and the bounded copies `finalize` performs once). Record operations
/// observed by different threads are serialized in whatever order they
/// arrive, but the resulting witness is deterministic with respect to the
/// *set* of calls, not their order — see [`Self::finalize`].
#[derive(Debug)]
pub struct Builder {
    parent_hash: B256,
    state_root: B256,
    block_number: u64,
    inner: Mutex<Inner>,
}

impl Builder {
    /// Creates an empty builder for the block with the given header fields.
    pub fn new(parent_hash: B256, state_root: B256, block_number: u64) -> Self {
        Self {
            parent_hash,
            state_root,
            block_number,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Records a storage read. First observation of `(address, slot)` wins;
    /// later reads are no-ops for pre-state capture.
    pub fn record_read(&self, address: Address, slot: B256, value: B256) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        inner
            .pre_state
            .entry(address)
            .or_insert_with(PreStateAccount::absent)
            .storage
            .entry(slot)
            .or_insert(value);
        Ok(())
    }

    /// Records a storage write. The pre-execution value wins first in the
    /// slot pre-state; `new` is overwritten on every call.
    pub fn record_write(
        &self,
        address: Address,
        slot: B256,
        old: B256,
        new: B256,
    ) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        inner
            .pre_state
            .entry(address)
            .or_insert_with(PreStateAccount::absent)
            .storage
            .entry(slot)
            .or_insert(old);
        let entry = inner.diffs.entry(address).or_default();
        entry.storage.entry(slot).or_insert((old, new)).1 = new;
        Ok(())
    }

    /// Records the full account tuple observed on first access to
    /// `address`. First observation wins.
    pub fn record_account_access(
        &self,
        address: Address,
        exists: bool,
        nonce: u64,
        balance: U256,
        code_hash: B256,
    ) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        inner
            .pre_state
            .entry(address)
            .or_insert_with(|| PreStateAccount {
                exists,
                nonce,
                balance,
                code_hash,
                storage: BTreeMap::new(),
            });
        Ok(())
    }

    /// Records a bytecode observed at `address` with hash `code_hash`.
    /// Deduplicated by hash: the first recorded copy of a given hash wins.
    pub fn record_code_access(
        &self,
        address: Address,
        code_hash: B256,
        code: Bytes,
    ) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        inner.codes.entry(code_hash).or_insert(code);
        inner
            .pre_state
            .entry(address)
            .or_insert_with(PreStateAccount::absent);
        Ok(())
    }

    /// Records a balance change. `old` wins first; `new` is overwritten on
    /// every call.
    pub fn record_balance_change(
        &self,
        address: Address,
        old: U256,
        new: U256,
    ) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        let entry = &mut inner.diffs.entry(address).or_default().balance;
        if !entry.changed {
            entry.changed = true;
            entry.old = old;
        }
        entry.new = new;
        Ok(())
    }

    /// Records a nonce change. `old` wins first; `new` is overwritten on
    /// every call.
    pub fn record_nonce_change(&self, address: Address, old: u64, new: u64) -> Result<(), WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        let entry = &mut inner.diffs.entry(address).or_default().nonce;
        if !entry.changed {
            entry.changed = true;
            entry.old = old;
        }
        entry.new = new;
        Ok(())
    }

    /// Freezes the builder and returns the canonical witness, using
    /// [`sbw_core::MAX_ENCODED_WITNESS_SIZE`] as the size ceiling. See
    /// [`Self::finalize_with_max_size`] for the full contract.
    pub fn finalize(&self) -> Result<Witness, WitnessError> {
        self.finalize_with_max_size(sbw_core::MAX_ENCODED_WITNESS_SIZE)
    }

    /// Freezes the builder and returns the canonical witness, rejecting an
    /// accumulator whose [`Self::estimate_size`] exceeds `max_size`.
    ///
    /// Canonicalization sorts the written addresses and, within each, the
    /// written slot keys — both already held in byte order by the
    /// [`std::collections::BTreeMap`] backing the accumulator — then feeds
    /// the hash primitive the pre-state of every observed account, in that
    /// same byte order, to produce `witness_hash`. Two builders that
    /// received the same multiset of record calls in any order produce
    /// byte-identical witnesses.
    pub fn finalize_with_max_size(&self, max_size: usize) -> Result<Witness, WitnessError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_not_finalized(&inner)?;
        if inner.pre_state.is_empty() {
            return Err(WitnessError::EmptyWitness);
        }
        let size = estimate_witness_size(&inner.pre_state, &inner.codes);
        if size > max_size {
            return Err(WitnessError::EncodeTooLarge { actual: size, max: max_size });
        }
        inner.finalized = true;

        let state_diffs: Vec<StateDiff> = inner
            .diffs
            .iter()
            .map(|(address, diff)| StateDiff {
                address: *address,
                balance_diff: diff.balance,
                nonce_diff: diff.nonce,
                storage_changes: diff
                    .storage
                    .iter()
                    .map(|(key, (old, new))| StorageChange {
                        key: *key,
                        old: *old,
                        new: *new,
                    })
                    .collect(),
            })
            .collect();

        let witness_hash = compute_witness_hash(self.state_root, self.block_number, &inner.pre_state);

        dev_trace!(
            accounts = inner.pre_state.len(),
            diffs = state_diffs.len(),
            "finalized witness"
        );
        update_metrics_counter!(builder_finalized_total);

        Ok(Witness {
            parent_hash: self.parent_hash,
            state_root: self.state_root,
            block_number: self.block_number,
            pre_state: inner.pre_state.clone(),
            codes: inner.codes.clone(),
            state_diffs,
            witness_hash,
        })
    }

    /// A conservative pre-finalize byte estimate. See
    /// [`crate::model::estimate_size`] for the exact formula; `finalize`
    /// uses this same computation to short-circuit before ever producing
    /// an oversized witness.
    pub fn estimate_size(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        estimate_witness_size(&inner.pre_state, &inner.codes)
    }

    fn check_not_finalized(inner: &Inner) -> Result<(), WitnessError> {
        if inner.finalized {
            Err(WitnessError::AlreadyFinalized)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::repeat_byte(0xbb)
    }

    #[test]
    fn read_then_write_preserves_pre_state() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        let slot = B256::repeat_byte(0x01);
        let pre = B256::repeat_byte(0xff);
        builder.record_read(addr(), slot, pre).unwrap();
        builder
            .record_write(addr(), slot, pre, B256::repeat_byte(0xdd))
            .unwrap();
        let witness = builder.finalize().unwrap();

        assert_eq!(witness.account(&addr()).unwrap().storage[&slot], pre);
        let diff = witness.diff(&addr()).unwrap();
        assert_eq!(diff.storage_changes.len(), 1);
        assert_eq!(diff.storage_changes[0].old, pre);
        assert_eq!(diff.storage_changes[0].new, B256::repeat_byte(0xdd));
    }

    #[test]
    fn write_without_prior_read_still_captures_pre_state() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        let slot = B256::repeat_byte(0x02);
        let pre = B256::repeat_byte(0xa1);
        builder
            .record_write(addr(), slot, pre, B256::repeat_byte(0xbe))
            .unwrap();
        let witness = builder.finalize().unwrap();

        assert_eq!(witness.account(&addr()).unwrap().storage[&slot], pre);
        let diff = witness.diff(&addr()).unwrap();
        assert_eq!(diff.storage_changes[0].old, pre);
        assert_eq!(diff.storage_changes[0].new, B256::repeat_byte(0xbe));
    }

    #[test]
    fn non_existent_account_is_recorded() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        let dead = Address::repeat_byte(0xde);
        builder
            .record_account_access(dead, false, 0, U256::ZERO, sbw_primitives::EMPTY_CODE_HASH)
            .unwrap();
        let witness = builder.finalize().unwrap();

        let account = witness.account(&dead).unwrap();
        assert!(!account.exists);
        assert_eq!(account.balance, U256::ZERO);
        assert_eq!(account.nonce, 0);
    }

    #[test]
    fn finalize_is_deterministic_regardless_of_record_order() {
        let a = Address::repeat_byte(0x01);
        let b = Address::repeat_byte(0x02);
        let slot_a = B256::repeat_byte(0xa1);
        let slot_b = B256::repeat_byte(0xa2);

        let first = Builder::new(B256::repeat_byte(0xff), B256::repeat_byte(0xff), 42);
        first
            .record_account_access(a, true, 1, U256::from(1u64), B256::ZERO)
            .unwrap();
        first
            .record_account_access(b, true, 2, U256::from(2u64), B256::ZERO)
            .unwrap();
        first
            .record_write(a, slot_a, B256::ZERO, B256::repeat_byte(0xb1))
            .unwrap();
        first
            .record_write(b, slot_b, B256::ZERO, B256::repeat_byte(0xb2))
            .unwrap();

        let second = Builder::new(B256::repeat_byte(0xff), B256::repeat_byte(0xff), 42);
        second
            .record_write(b, slot_b, B256::ZERO, B256::repeat_byte(0xb2))
            .unwrap();
        second
            .record_account_access(b, true, 2, U256::from(2u64), B256::ZERO)
            .unwrap();
        second
            .record_write(a, slot_a, B256::ZERO, B256::repeat_byte(0xb1))
            .unwrap();
        second
            .record_account_access(a, true, 1, U256::from(1u64), B256::ZERO)
            .unwrap();

        assert_eq!(
            first.finalize().unwrap().witness_hash,
            second.finalize().unwrap().witness_hash
        );
    }

    #[test]
    fn record_after_finalize_errors() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        builder
            .record_account_access(addr(), true, 0, U256::ZERO, B256::ZERO)
            .unwrap();
        builder.finalize().unwrap();
        assert!(matches!(
            builder.record_account_access(addr(), true, 1, U256::ZERO, B256::ZERO),
            Err(WitnessError::AlreadyFinalized)
        ));
    }

    #[test]
    fn finalize_on_empty_builder_errors() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        assert!(matches!(builder.finalize(), Err(WitnessError::EmptyWitness)));
    }

    #[test]
    fn finalize_rejects_witness_over_max_size() {
        let builder = Builder::new(B256::ZERO, B256::ZERO, 1);
        builder
            .record_account_access(addr(), true, 0, U256::ZERO, B256::ZERO)
            .unwrap();
        let size = builder.estimate_size();
        assert!(matches!(
            builder.finalize_with_max_size(size - 1),
            Err(WitnessError::EncodeTooLarge { actual, max }) if actual == size && max == size - 1
        ));
    }
}
