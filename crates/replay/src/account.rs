use alloy_primitives::{Bytes, B256, U256};
use sbw_primitives::EMPTY_CODE_HASH;
use std::collections::BTreeMap;

/// A live, mutable account inside a [`crate::Replay`] database.
///
/// Initial state is copied from the source witness's pre-state entry;
/// everything here except `storage`'s role as *current* value (as opposed
/// to the witness's pre-execution snapshot) may be mutated during replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayAccount {
    /// Whether the account currently exists.
    pub exists: bool,
    /// Current balance.
    pub balance: U256,
    /// Current nonce.
    pub nonce: u64,
    /// Current bytecode.
    pub code: Bytes,
    /// Current code hash.
    pub code_hash: B256,
    /// Current slot values, seeded from the witness pre-state and mutated
    /// by `set_state`.
    pub storage: BTreeMap<B256, B256>,
    /// Whether `self_destruct` has been called on this account.
    pub self_destructed: bool,
    /// Whether `create_account` has been called on this account.
    pub created: bool,
}

impl ReplayAccount {
    /// An account that does not exist: all fields at their zero value.
    pub fn absent() -> Self {
        Self {
            exists: false,
            balance: U256::ZERO,
            nonce: 0,
            code: Bytes::new(),
            code_hash: EMPTY_CODE_HASH,
            storage: BTreeMap::new(),
            self_destructed: false,
            created: false,
        }
    }
}
