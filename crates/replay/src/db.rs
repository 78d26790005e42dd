use crate::account::ReplayAccount;
use crate::error::ReplayError;
use alloy_primitives::{Address, Bytes, B256, U256};
use sbw_core::{Log, StateReader, MAX_VALIDATOR_WITNESS_SIZE};
use sbw_helpers::dev_trace;
use sbw_witness::{PreStateAccount, Witness};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct Snapshot {
    accounts: BTreeMap<Address, ReplayAccount>,
    transient: BTreeMap<(Address, B256), B256>,
    access_addresses: BTreeSet<Address>,
    access_slots: BTreeSet<(Address, B256)>,
    refund: u64,
    logs_len: usize,
}

/// A state-database implementation served entirely from a [`Witness`].
///
/// Every public operation observes or mutates in-memory state seeded from
/// the witness at construction time; nothing here ever reads back into the
/// witness's own maps except [`Self::get_committed_state`], which is
/// defined to always return the pre-execution value regardless of any
/// writes made during replay.
#[derive(Debug)]
pub struct Replay {
    pre_state: BTreeMap<Address, PreStateAccount>,
    accounts: BTreeMap<Address, ReplayAccount>,
    transient: BTreeMap<(Address, B256), B256>,
    access_addresses: BTreeSet<Address>,
    access_slots: BTreeSet<(Address, B256)>,
    refund: u64,
    logs: Vec<Log>,
    next_snapshot_id: u64,
    snapshots: BTreeMap<u64, Snapshot>,
}

impl Replay {
    /// Builds a replay database from `witness`, rejecting anything over
    /// [`MAX_VALIDATOR_WITNESS_SIZE`]. See [`Self::new_with_max_size`] for
    /// the full contract.
    pub fn new(witness: &Witness) -> Result<Self, ReplayError> {
        Self::new_with_max_size(witness, MAX_VALIDATOR_WITNESS_SIZE)
    }

    /// Builds a replay database from `witness`, deep-copying its pre-state
    /// into mutable in-memory accounts. Multiple `Replay`s may be built
    /// from the same witness concurrently; each performs its own copy.
    ///
    /// Rejects a witness whose [`Witness::estimated_size`] exceeds
    /// `max_size` before copying anything into memory.
    pub fn new_with_max_size(witness: &Witness, max_size: usize) -> Result<Self, ReplayError> {
        if witness.pre_state.is_empty() {
            return Err(ReplayError::EmptyWitness);
        }
        let size = witness.estimated_size();
        if size > max_size {
            return Err(ReplayError::WitnessTooLarge { actual: size, max: max_size });
        }
        let accounts = witness
            .pre_state
            .iter()
            .map(|(address, pre)| {
                let code = if pre.code_hash == sbw_primitives::EMPTY_CODE_HASH {
                    Bytes::new()
                } else {
                    witness.codes.get(&pre.code_hash).cloned().unwrap_or_default()
                };
                (
                    *address,
                    ReplayAccount {
                        exists: pre.exists,
                        balance: pre.balance,
                        nonce: pre.nonce,
                        code,
                        code_hash: pre.code_hash,
                        storage: pre.storage.clone(),
                        self_destructed: false,
                        created: false,
                    },
                )
            })
            .collect();

        Ok(Self {
            pre_state: witness.pre_state.clone(),
            accounts,
            transient: BTreeMap::new(),
            access_addresses: BTreeSet::new(),
            access_slots: BTreeSet::new(),
            refund: 0,
            logs: Vec::new(),
            next_snapshot_id: 0,
            snapshots: BTreeMap::new(),
        })
    }

    /// The logs emitted so far, in emission order.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Returns the account entry for `address`, if any exists in memory
    /// (implicit or otherwise).
    pub fn account(&self, address: &Address) -> Option<&ReplayAccount> {
        self.accounts.get(address)
    }

    fn snapshot_state(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.clone(),
            transient: self.transient.clone(),
            access_addresses: self.access_addresses.clone(),
            access_slots: self.access_slots.clone(),
            refund: self.refund,
            logs_len: self.logs.len(),
        }
    }
}

impl StateReader for Replay {
    fn get_balance(&mut self, address: Address) -> U256 {
        self.accounts.get(&address).map(|a| a.balance).unwrap_or_default()
    }

    fn get_nonce(&mut self, address: Address) -> u64 {
        self.accounts.get(&address).map(|a| a.nonce).unwrap_or_default()
    }

    fn get_code(&mut self, address: Address) -> Bytes {
        self.accounts
            .get(&address)
            .map(|a| a.code.clone())
            .unwrap_or_default()
    }

    fn get_code_hash(&mut self, address: Address) -> B256 {
        self.accounts
            .get(&address)
            .map(|a| a.code_hash)
            .unwrap_or(sbw_primitives::EMPTY_CODE_HASH)
    }

    fn get_code_size(&mut self, address: Address) -> usize {
        self.accounts.get(&address).map(|a| a.code.len()).unwrap_or(0)
    }

    fn get_state(&mut self, address: Address, slot: B256) -> B256 {
        self.accounts
            .get(&address)
            .and_then(|a| a.storage.get(&slot))
            .copied()
            .unwrap_or_default()
    }

    fn get_committed_state(&mut self, address: Address, slot: B256) -> B256 {
        self.pre_state
            .get(&address)
            .and_then(|a| a.storage.get(&slot))
            .copied()
            .unwrap_or_default()
    }

    fn exist(&mut self, address: Address) -> bool {
        self.accounts.get(&address).map(|a| a.exists).unwrap_or(false)
    }

    fn empty(&mut self, address: Address) -> bool {
        match self.accounts.get(&address) {
            Some(a) => a.exists && a.balance.is_zero() && a.nonce == 0 && a.code.is_empty(),
            None => false,
        }
    }

    fn has_self_destructed(&mut self, address: Address) -> bool {
        self.accounts
            .get(&address)
            .map(|a| a.self_destructed)
            .unwrap_or(false)
    }

    fn create_account(&mut self, address: Address) {
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        *account = ReplayAccount {
            exists: true,
            created: true,
            balance: U256::ZERO,
            nonce: 0,
            code: Bytes::new(),
            code_hash: sbw_primitives::EMPTY_CODE_HASH,
            storage: BTreeMap::new(),
            self_destructed: false,
        };
    }

    fn add_balance(&mut self, address: Address, amount: U256) {
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        account.exists = true;
        account.balance = account.balance.saturating_add(amount);
    }

    fn sub_balance(&mut self, address: Address, amount: U256) {
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        account.balance = account.balance.saturating_sub(amount);
    }

    fn set_nonce(&mut self, address: Address, nonce: u64) {
        // Implicit-account asymmetry: unlike `add_balance`, this does not
        // flip `exists` to true when the account was not already present.
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        account.nonce = nonce;
    }

    fn set_code(&mut self, address: Address, code: Bytes, code_hash: B256) {
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        account.code = code;
        account.code_hash = code_hash;
    }

    fn set_state(&mut self, address: Address, slot: B256, value: B256) {
        let account = self.accounts.entry(address).or_insert_with(ReplayAccount::absent);
        account.storage.insert(slot, value);
    }

    fn self_destruct(&mut self, address: Address) {
        if let Some(account) = self.accounts.get_mut(&address) {
            if account.exists {
                account.self_destructed = true;
                account.balance = U256::ZERO;
            }
        }
    }

    fn get_transient_state(&mut self, address: Address, slot: B256) -> B256 {
        self.transient.get(&(address, slot)).copied().unwrap_or_default()
    }

    fn set_transient_state(&mut self, address: Address, slot: B256, value: B256) {
        self.transient.insert((address, slot), value);
    }

    fn clear_transient_storage(&mut self) {
        self.transient.clear();
    }

    fn access_address(&mut self, address: Address) -> bool {
        !self.access_addresses.insert(address)
    }

    fn access_slot(&mut self, address: Address, slot: B256) -> bool {
        self.access_addresses.insert(address);
        !self.access_slots.insert((address, slot))
    }

    fn add_refund(&mut self, amount: u64) {
        self.refund = self.refund.saturating_add(amount);
    }

    fn sub_refund(&mut self, amount: u64) {
        self.refund = self.refund.saturating_sub(amount);
    }

    fn refund(&mut self) -> u64 {
        self.refund
    }

    fn log(&mut self, log: Log) {
        self.logs.push(log);
    }

    fn snapshot(&mut self) -> u64 {
        let id = self.next_snapshot_id;
        self.next_snapshot_id += 1;
        self.snapshots.insert(id, self.snapshot_state());
        dev_trace!(id, "replay snapshot taken");
        id
    }

    fn revert_to_snapshot(&mut self, id: u64) {
        let Some(snapshot) = self.snapshots.get(&id).cloned() else {
            return;
        };
        self.accounts = snapshot.accounts;
        self.transient = snapshot.transient;
        self.access_addresses = snapshot.access_addresses;
        self.access_slots = snapshot.access_slots;
        self.refund = snapshot.refund;
        self.logs.truncate(snapshot.logs_len);
        self.snapshots.retain(|&snap_id, _| snap_id < id);
        dev_trace!(id, "replay snapshot reverted");
    }
}
