use crate::Log;
use alloy_primitives::{Address, Bytes, B256, U256};
use auto_impl::auto_impl;

/// Full state-reader capability set consumed by the collecting shim and
/// implemented by the replay database.
///
/// Expressed as a generic trait bound rather than a boxed `dyn` object: the
/// collecting shim is `CollectingReader<R: StateReader>`, and the replay
/// database implements this same trait directly, so neither side needs to
/// downcast to recover a concrete type.
#[auto_impl(&mut, Box)]
pub trait StateReader {
    /// Returns the current balance of `address`, or zero if it does not exist.
    fn get_balance(&mut self, address: Address) -> U256;
    /// Returns the current nonce of `address`, or zero if it does not exist.
    fn get_nonce(&mut self, address: Address) -> u64;
    /// Returns the current bytecode of `address`, or empty if it has none.
    fn get_code(&mut self, address: Address) -> Bytes;
    /// Returns the code hash of `address`, or the empty-code sentinel.
    fn get_code_hash(&mut self, address: Address) -> B256;
    /// Returns the length of the bytecode at `address`.
    fn get_code_size(&mut self, address: Address) -> usize;
    /// Returns the current value of `slot` under `address`.
    fn get_state(&mut self, address: Address, slot: B256) -> B256;
    /// Returns the value of `slot` as observed at the start of the
    /// transaction, independent of any writes made since.
    fn get_committed_state(&mut self, address: Address, slot: B256) -> B256;
    /// Returns whether `address` exists.
    fn exist(&mut self, address: Address) -> bool;
    /// Returns whether `address` exists and is empty (zero balance, zero
    /// nonce, no code).
    fn empty(&mut self, address: Address) -> bool;
    /// Returns whether `address` has self-destructed in this execution.
    fn has_self_destructed(&mut self, address: Address) -> bool;

    /// Creates `address`, resetting its balance, nonce, code and storage.
    fn create_account(&mut self, address: Address);
    /// Adds `amount` to the balance of `address`.
    fn add_balance(&mut self, address: Address, amount: U256);
    /// Subtracts `amount` from the balance of `address`.
    fn sub_balance(&mut self, address: Address, amount: U256);
    /// Sets the nonce of `address`.
    fn set_nonce(&mut self, address: Address, nonce: u64);
    /// Sets the bytecode (and its hash) of `address`.
    fn set_code(&mut self, address: Address, code: Bytes, code_hash: B256);
    /// Sets `slot` under `address` to `value`.
    fn set_state(&mut self, address: Address, slot: B256, value: B256);
    /// Marks `address` as self-destructed, zeroing its balance.
    fn self_destruct(&mut self, address: Address);

    /// Reads a transient-storage slot. Transient storage is never part of
    /// the witness.
    fn get_transient_state(&mut self, address: Address, slot: B256) -> B256;
    /// Writes a transient-storage slot.
    fn set_transient_state(&mut self, address: Address, slot: B256, value: B256);
    /// Drops the entire transient-storage map.
    fn clear_transient_storage(&mut self);

    /// Marks `address` as warm for the access list. Returns whether it was
    /// already warm.
    fn access_address(&mut self, address: Address) -> bool;
    /// Marks `(address, slot)` as warm, implicitly warming `address` too.
    /// Returns whether the slot was already warm.
    fn access_slot(&mut self, address: Address, slot: B256) -> bool;

    /// Increases the gas refund counter.
    fn add_refund(&mut self, amount: u64);
    /// Decreases the gas refund counter.
    fn sub_refund(&mut self, amount: u64);
    /// Returns the current refund counter.
    fn refund(&mut self) -> u64;

    /// Appends `log` to the ordered log sink.
    fn log(&mut self, log: Log);

    /// Captures a snapshot of all mutable state, returning a monotonically
    /// increasing identifier.
    fn snapshot(&mut self) -> u64;
    /// Restores the state captured by `snapshot`, invalidating every
    /// snapshot identifier greater than or equal to it. A no-op if `id` is
    /// unknown.
    fn revert_to_snapshot(&mut self, id: u64);
}

/// Lighter, read-only capability set consumed by the proof generator.
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait ProofStateReader {
    /// Returns the current balance of `address`.
    fn get_balance(&self, address: Address) -> U256;
    /// Returns the current nonce of `address`.
    fn get_nonce(&self, address: Address) -> u64;
    /// Returns the current bytecode of `address`.
    fn get_code(&self, address: Address) -> Bytes;
    /// Returns the code hash of `address`.
    fn get_code_hash(&self, address: Address) -> B256;
    /// Returns whether `address` exists.
    fn exist(&self, address: Address) -> bool;
    /// Returns the state root this reader is proving against.
    fn get_root(&self) -> B256;
}
