use alloy_primitives::{Address, Bytes, B256, U256};
use sbw_primitives::EMPTY_CODE_HASH;
use std::collections::BTreeMap;

/// Pre-execution snapshot of a single account, as observed on first access.
///
/// `Address` and `B256` are both lexicographically ordered `FixedBytes`, so
/// storing accounts and slots in a [`BTreeMap`] gives byte-order iteration
/// for free — this is what the builder's canonicalization relies on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreStateAccount {
    /// Whether the account existed at first observation.
    pub exists: bool,
    /// Nonce at first observation; zero if the account did not exist.
    pub nonce: u64,
    /// Balance at first observation; zero if the account did not exist.
    pub balance: U256,
    /// Code hash at first observation; the empty-code sentinel if none.
    pub code_hash: B256,
    /// Slot values as observed on first read, keyed by slot.
    pub storage: BTreeMap<B256, B256>,
}

impl PreStateAccount {
    /// Returns the pre-state of an account that has never been observed:
    /// non-existent, zero balance and nonce, empty code.
    pub fn absent() -> Self {
        Self {
            exists: false,
            nonce: 0,
            balance: U256::ZERO,
            code_hash: EMPTY_CODE_HASH,
            storage: BTreeMap::new(),
        }
    }
}

/// An (old, new) pair for a field that may or may not have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDiff<T> {
    /// Whether this field was ever written.
    pub changed: bool,
    /// Value at first write.
    pub old: T,
    /// Value after the last write observed.
    pub new: T,
}

/// An (old, new) pair for a single storage slot that was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageChange {
    /// Slot key.
    pub key: B256,
    /// Value before the first write.
    pub old: B256,
    /// Value after the last write.
    pub new: B256,
}

/// The state changes recorded for a single written address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDiff {
    /// The address this diff belongs to.
    pub address: Address,
    /// Balance before/after, if it changed.
    pub balance_diff: FieldDiff<U256>,
    /// Nonce before/after, if it changed.
    pub nonce_diff: FieldDiff<u64>,
    /// Per-slot changes, sorted ascending by key bytes.
    pub storage_changes: Vec<StorageChange>,
}

/// A frozen, deterministically-ordered witness produced by a
/// [`crate::Builder`].
///
/// Immutable once constructed. Consumers receive deep copies from the
/// builder's accessors, so mutating a `Witness` in place never affects the
/// builder that produced it or any other holder of the same witness.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Witness {
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// State root this witness's pre-state was read against.
    pub state_root: B256,
    /// Block number this witness was collected for.
    pub block_number: u64,
    /// Pre-state of every address observed during collection.
    pub pre_state: BTreeMap<Address, PreStateAccount>,
    /// One copy of every bytecode accessed, keyed by its hash.
    pub codes: BTreeMap<B256, Bytes>,
    /// Per-address diffs, sorted ascending by address bytes.
    pub state_diffs: Vec<StateDiff>,
    /// Deterministic content hash computed at `finalize`.
    pub witness_hash: B256,
}

/// Computes the deterministic content hash of a witness from its state
/// root, block number, and canonical (address-sorted) pre-state.
///
/// Shared between [`crate::Builder::finalize`] and [`crate::wire::decode`]
/// so that finalize → encode → decode → re-finalize reproduces the same
/// hash, per the round-trip law the wire format is defined by.
pub(crate) fn compute_witness_hash(
    state_root: B256,
    block_number: u64,
    pre_state: &BTreeMap<Address, PreStateAccount>,
) -> B256 {
    let mut hasher = sbw_primitives::stream_hasher();
    hasher.update(state_root.as_slice());
    hasher.update(&block_number.to_be_bytes());
    for (address, account) in pre_state.iter() {
        hasher.update(address.as_slice());
        hasher.update(&account.nonce.to_be_bytes());
        hasher.update(account.code_hash.as_slice());
        hasher.update(&sbw_primitives::encode_be_bytes(account.balance));
        hasher.update(&[account.exists as u8]);
        for (key, value) in account.storage.iter() {
            hasher.update(key.as_slice());
            hasher.update(value.as_slice());
        }
    }
    hasher.finalize()
}

impl Witness {
    /// Looks up the recorded pre-state of `address`, if it was observed.
    pub fn account(&self, address: &Address) -> Option<&PreStateAccount> {
        self.pre_state.get(address)
    }

    /// Looks up the recorded bytecode for `code_hash`, if it was observed.
    pub fn code(&self, code_hash: &B256) -> Option<&Bytes> {
        self.codes.get(code_hash)
    }

    /// Looks up the diff recorded for `address`, if it was written.
    pub fn diff(&self, address: &Address) -> Option<&StateDiff> {
        self.state_diffs
            .iter()
            .find(|diff| &diff.address == address)
    }

    /// A conservative byte-size estimate of this witness's pre-state and
    /// code table. See [`estimate_size`] for the formula.
    pub fn estimated_size(&self) -> usize {
        estimate_size(&self.pre_state, &self.codes)
    }
}

/// A conservative pre-finalize byte estimate, using fixed per-field
/// contributions: address (20), hash (32), nonce (8), balance (32), flag
/// (1), and `32 + 32` per storage slot, plus a code overhead of 36 bytes
/// plus length per entry in `codes`.
///
/// Shared between [`crate::Builder::estimate_size`]/`finalize` and
/// [`Witness::estimated_size`], so the validator-path size check in
/// `sbw-replay` sees the same numbers the builder used to short-circuit
/// before ever emitting the witness.
pub fn estimate_size(pre_state: &BTreeMap<Address, PreStateAccount>, codes: &BTreeMap<B256, Bytes>) -> usize {
    let mut size = 0usize;
    for account in pre_state.values() {
        size += 20 + 8 + 32 + 1 + 32;
        size += account.storage.len() * (32 + 32);
    }
    for code in codes.values() {
        size += 36 + code.len();
    }
    size
}
