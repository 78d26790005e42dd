//! Black-box coverage of the facade crate: collect -> finalize -> replay ->
//! proof-bundle -> verify -> cache, end to end, the way a block verifier
//! would actually use these crates together.

use sbw::cache::{Cache, CachedWitness};
use sbw::collector::CollectingReader;
use sbw::core::{Log, StateReader};
use sbw::proof::{verify_bundle, ProofConfig, ProofGenerator};
use sbw::replay::Replay;
use sbw::witness::Builder;
use sbw::witness::wire;
use alloy_primitives::{Address, Bytes, B256, U256};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Default)]
struct MemoryState {
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    storage: HashMap<(Address, B256), B256>,
    exists: HashSet<Address>,
}

impl StateReader for MemoryState {
    fn get_balance(&mut self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }
    fn get_nonce(&mut self, address: Address) -> u64 {
        self.nonces.get(&address).copied().unwrap_or_default()
    }
    fn get_code(&mut self, _address: Address) -> Bytes {
        Bytes::new()
    }
    fn get_code_hash(&mut self, _address: Address) -> B256 {
        sbw::primitives::EMPTY_CODE_HASH
    }
    fn get_code_size(&mut self, _address: Address) -> usize {
        0
    }
    fn get_state(&mut self, address: Address, slot: B256) -> B256 {
        self.storage.get(&(address, slot)).copied().unwrap_or_default()
    }
    fn get_committed_state(&mut self, address: Address, slot: B256) -> B256 {
        self.get_state(address, slot)
    }
    fn exist(&mut self, address: Address) -> bool {
        self.exists.contains(&address)
    }
    fn empty(&mut self, address: Address) -> bool {
        !self.exist(address)
    }
    fn has_self_destructed(&mut self, _address: Address) -> bool {
        false
    }
    fn create_account(&mut self, address: Address) {
        self.exists.insert(address);
    }
    fn add_balance(&mut self, address: Address, amount: U256) {
        let entry = self.balances.entry(address).or_default();
        *entry = entry.saturating_add(amount);
    }
    fn sub_balance(&mut self, address: Address, amount: U256) {
        let entry = self.balances.entry(address).or_default();
        *entry = entry.saturating_sub(amount);
    }
    fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.nonces.insert(address, nonce);
    }
    fn set_code(&mut self, _address: Address, _code: Bytes, _code_hash: B256) {}
    fn set_state(&mut self, address: Address, slot: B256, value: B256) {
        self.storage.insert((address, slot), value);
    }
    fn self_destruct(&mut self, _address: Address) {}
    fn get_transient_state(&mut self, _address: Address, _slot: B256) -> B256 {
        B256::ZERO
    }
    fn set_transient_state(&mut self, _address: Address, _slot: B256, _value: B256) {}
    fn clear_transient_storage(&mut self) {}
    fn access_address(&mut self, _address: Address) -> bool {
        false
    }
    fn access_slot(&mut self, _address: Address, _slot: B256) -> bool {
        false
    }
    fn add_refund(&mut self, _amount: u64) {}
    fn sub_refund(&mut self, _amount: u64) {}
    fn refund(&mut self) -> u64 {
        0
    }
    fn log(&mut self, _log: Log) {}
    fn snapshot(&mut self) -> u64 {
        0
    }
    fn revert_to_snapshot(&mut self, _id: u64) {}
}

#[test]
fn collect_finalize_replay_prove_and_cache_round_trip() {
    let block_hash = B256::repeat_byte(0xb1);
    let state_root = B256::repeat_byte(0xaa);
    let addr = Address::repeat_byte(0x01);
    let slot = B256::repeat_byte(0x01);

    let mut backing = MemoryState::default();
    backing.exists.insert(addr);
    backing.balances.insert(addr, U256::from(1_000u64));
    backing.storage.insert((addr, slot), B256::repeat_byte(0xff));

    let builder = Arc::new(Builder::new(B256::repeat_byte(0x02), state_root, 42));
    let mut shim = CollectingReader::new(backing, builder.clone());

    assert_eq!(shim.get_state(addr, slot), B256::repeat_byte(0xff));
    shim.set_state(addr, slot, B256::repeat_byte(0xdd));
    shim.add_balance(addr, U256::from(1u64));

    let witness = builder.finalize().unwrap();
    assert_eq!(witness.account(&addr).unwrap().balance, U256::from(1_000u64));

    let encoded = wire::encode(&witness).unwrap();
    let decoded = wire::decode(&encoded).unwrap();
    assert_eq!(decoded.witness_hash, witness.witness_hash);

    let mut replay = Replay::new(&decoded).unwrap();
    assert_eq!(replay.get_balance(addr), U256::from(1_000u64));
    assert_eq!(replay.get_state(addr, slot), B256::repeat_byte(0xff));

    let generator = ProofGenerator::new(ProofConfig::default());
    let bundle = generator.generate_bundle(Some(&decoded)).unwrap();
    assert!(verify_bundle(Some(&bundle)).unwrap());

    let cache = Cache::new(8);
    cache.store(
        block_hash,
        Some(CachedWitness {
            block_hash,
            block_number: decoded.block_number,
            state_root: bundle.state_root,
            account_proofs: bundle.account_proofs.clone(),
            storage_proofs: bundle.storage_proofs.clone(),
            code_chunks: decoded.codes.values().cloned().collect(),
            size: bundle.total_size,
        }),
    );
    assert!(cache.has(&block_hash));
    let cached = cache.get(&block_hash).unwrap();
    assert_eq!(cached.state_root, bundle.state_root);
    assert_eq!(cache.stats().hits, 1);
}
