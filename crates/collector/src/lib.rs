//! Collecting shim: a transparent wrapper around a live state reader that
//! records first-observed pre-state into a [`Builder`] as execution
//! proceeds.
//!
//! [`CollectingReader`] is generic over the wrapped reader type rather than
//! boxing it behind a `dyn` object, so it composes with any
//! [`sbw_core::StateReader`] implementation — including another
//! `CollectingReader`, and the replay database in `sbw-replay` — with no
//! downcasting anywhere in the stack.

use alloy_primitives::{Address, Bytes, B256, U256};
use sbw_core::{Log, StateReader};
use sbw_helpers::dev_warn;
use sbw_primitives::EMPTY_CODE_HASH;
use sbw_witness::Builder;
use std::collections::HashSet;
use std::sync::Arc;

/// Wraps `R`, forwarding every operation while side-recording first
/// observations into a shared [`Builder`].
#[derive(Debug)]
pub struct CollectingReader<R> {
    inner: R,
    builder: Arc<Builder>,
    seen: HashSet<Address>,
}

impl<R> CollectingReader<R> {
    /// Wraps `inner`, recording into `builder`.
    pub fn new(inner: R, builder: Arc<Builder>) -> Self {
        Self {
            inner,
            builder,
            seen: HashSet::new(),
        }
    }

    /// Unwraps the shim, discarding the reference to its builder.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: StateReader> CollectingReader<R> {
    /// Captures the full account tuple (and, if present, the bytecode) on
    /// first observation of `address`. A no-op on subsequent calls for the
    /// same address, both because the builder itself is first-wins and
    /// because `self.seen` avoids re-querying the inner reader.
    fn capture_account(&mut self, address: Address) {
        if !self.seen.insert(address) {
            return;
        }
        let exists = self.inner.exist(address);
        let nonce = self.inner.get_nonce(address);
        let balance = self.inner.get_balance(address);
        let code_hash = self.inner.get_code_hash(address);
        if let Err(err) = self
            .builder
            .record_account_access(address, exists, nonce, balance, code_hash)
        {
            dev_warn!(?err, %address, "builder rejected account capture");
        }
        if code_hash != EMPTY_CODE_HASH {
            let code = self.inner.get_code(address);
            if let Err(err) = self.builder.record_code_access(address, code_hash, code) {
                dev_warn!(?err, %address, "builder rejected code capture");
            }
        }
    }
}

impl<R: StateReader> StateReader for CollectingReader<R> {
    fn get_balance(&mut self, address: Address) -> U256 {
        self.capture_account(address);
        self.inner.get_balance(address)
    }

    fn get_nonce(&mut self, address: Address) -> u64 {
        self.capture_account(address);
        self.inner.get_nonce(address)
    }

    fn get_code(&mut self, address: Address) -> Bytes {
        self.capture_account(address);
        self.inner.get_code(address)
    }

    fn get_code_hash(&mut self, address: Address) -> B256 {
        self.capture_account(address);
        self.inner.get_code_hash(address)
    }

    fn get_code_size(&mut self, address: Address) -> usize {
        self.capture_account(address);
        self.inner.get_code_size(address)
    }

    fn get_state(&mut self, address: Address, slot: B256) -> B256 {
        self.capture_account(address);
        let value = self.inner.get_state(address, slot);
        if let Err(err) = self.builder.record_read(address, slot, value) {
            dev_warn!(?err, %address, "builder rejected slot capture");
        }
        value
    }

    fn get_committed_state(&mut self, address: Address, slot: B256) -> B256 {
        self.capture_account(address);
        let value = self.inner.get_committed_state(address, slot);
        if let Err(err) = self.builder.record_read(address, slot, value) {
            dev_warn!(?err, %address, "builder rejected slot capture");
        }
        value
    }

    fn exist(&mut self, address: Address) -> bool {
        self.capture_account(address);
        self.inner.exist(address)
    }

    fn empty(&mut self, address: Address) -> bool {
        self.capture_account(address);
        self.inner.empty(address)
    }

    fn has_self_destructed(&mut self, address: Address) -> bool {
        self.capture_account(address);
        self.inner.has_self_destructed(address)
    }

    fn create_account(&mut self, address: Address) {
        // Pre-state is captured before the mutation, deliberately keeping
        // whatever `exists` value was true before creation (commonly
        // `false`, for a brand-new address).
        self.capture_account(address);
        self.inner.create_account(address);
    }

    fn add_balance(&mut self, address: Address, amount: U256) {
        self.capture_account(address);
        let old = self.inner.get_balance(address);
        let new = old.saturating_add(amount);
        if let Err(err) = self.builder.record_balance_change(address, old, new) {
            dev_warn!(?err, %address, "builder rejected balance capture");
        }
        self.inner.add_balance(address, amount);
    }

    fn sub_balance(&mut self, address: Address, amount: U256) {
        self.capture_account(address);
        let old = self.inner.get_balance(address);
        let new = old.saturating_sub(amount);
        if let Err(err) = self.builder.record_balance_change(address, old, new) {
            dev_warn!(?err, %address, "builder rejected balance capture");
        }
        self.inner.sub_balance(address, amount);
    }

    fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.capture_account(address);
        let old = self.inner.get_nonce(address);
        if let Err(err) = self.builder.record_nonce_change(address, old, nonce) {
            dev_warn!(?err, %address, "builder rejected nonce capture");
        }
        self.inner.set_nonce(address, nonce);
    }

    fn set_code(&mut self, address: Address, code: Bytes, code_hash: B256) {
        self.capture_account(address);
        self.inner.set_code(address, code, code_hash);
    }

    fn set_state(&mut self, address: Address, slot: B256, value: B256) {
        self.capture_account(address);
        let old = self.inner.get_state(address, slot);
        if let Err(err) = self.builder.record_write(address, slot, old, value) {
            dev_warn!(?err, %address, "builder rejected slot write capture");
        }
        self.inner.set_state(address, slot, value);
    }

    fn self_destruct(&mut self, address: Address) {
        self.capture_account(address);
        self.inner.self_destruct(address);
    }

    fn get_transient_state(&mut self, address: Address, slot: B256) -> B256 {
        self.inner.get_transient_state(address, slot)
    }

    fn set_transient_state(&mut self, address: Address, slot: B256, value: B256) {
        self.inner.set_transient_state(address, slot, value);
    }

    fn clear_transient_storage(&mut self) {
        self.inner.clear_transient_storage();
    }

    fn access_address(&mut self, address: Address) -> bool {
        self.inner.access_address(address)
    }

    fn access_slot(&mut self, address: Address, slot: B256) -> bool {
        self.inner.access_slot(address, slot)
    }

    fn add_refund(&mut self, amount: u64) {
        self.inner.add_refund(amount);
    }

    fn sub_refund(&mut self, amount: u64) {
        self.inner.sub_refund(amount);
    }

    fn refund(&mut self) -> u64 {
        self.inner.refund()
    }

    fn log(&mut self, log: Log) {
        self.inner.log(log);
    }

    fn snapshot(&mut self) -> u64 {
        self.inner.snapshot()
    }

    fn revert_to_snapshot(&mut self, id: u64) {
        // Deliberately does not touch the witness: if the EVM read a slot
        // and then reverted, the verifier still needs that pre-state to
        // replay the revert faithfully.
        self.inner.revert_to_snapshot(id);
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
