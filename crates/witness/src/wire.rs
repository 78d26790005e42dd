//! Reference binary encoding for a [`Witness`].
//!
//! Compatibility is defined by the round-trip law, not by this exact byte
//! schema: any encoding is acceptable provided
//! `finalize → encode → decode → re-finalize` yields an identical content
//! hash. This module is the reference implementation used by the rest of
//! the workspace and by the integration tests.
//!
//! Layout: magic `"WTNS"` (4 bytes), version (1 byte), then
//! `parent_hash(32) | state_root(32) | block_num(8 BE) | pre_state_len(4 BE)`
//! followed by each pre-state entry, then the code table, then the diff
//! table. See the field-level comments below for the exact shape of each.

use crate::error::WitnessError;
use crate::model::{compute_witness_hash, FieldDiff, PreStateAccount, StateDiff, StorageChange, Witness};
use alloy_primitives::{Address, Bytes, B256, U256};
use sbw_core::MAX_ENCODED_WITNESS_SIZE;
use std::collections::BTreeMap;

const MAGIC: &[u8; 4] = b"WTNS";
const VERSION: u8 = 1;

/// Encodes `witness` using the reference binary layout.
///
/// Returns [`WitnessError::EncodeTooLarge`] if the result would exceed
/// [`MAX_ENCODED_WITNESS_SIZE`].
pub fn encode(witness: &Witness) -> Result<Vec<u8>, WitnessError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(witness.parent_hash.as_slice());
    buf.extend_from_slice(witness.state_root.as_slice());
    buf.extend_from_slice(&witness.block_number.to_be_bytes());
    buf.extend_from_slice(&(witness.pre_state.len() as u32).to_be_bytes());

    for (address, account) in witness.pre_state.iter() {
        buf.extend_from_slice(address.as_slice());
        buf.extend_from_slice(&account.nonce.to_be_bytes());
        let balance = sbw_primitives::encode_be_bytes(account.balance);
        buf.extend_from_slice(&(balance.len() as u16).to_be_bytes());
        buf.extend_from_slice(&balance);
        buf.extend_from_slice(account.code_hash.as_slice());
        buf.push(account.exists as u8);
        buf.extend_from_slice(&(account.storage.len() as u32).to_be_bytes());
        for (key, value) in account.storage.iter() {
            buf.extend_from_slice(key.as_slice());
            buf.extend_from_slice(value.as_slice());
        }
    }

    buf.extend_from_slice(&(witness.codes.len() as u32).to_be_bytes());
    for (code_hash, code) in witness.codes.iter() {
        buf.extend_from_slice(code_hash.as_slice());
        buf.extend_from_slice(&(code.len() as u32).to_be_bytes());
        buf.extend_from_slice(code);
    }

    buf.extend_from_slice(&(witness.state_diffs.len() as u32).to_be_bytes());
    for diff in witness.state_diffs.iter() {
        buf.extend_from_slice(diff.address.as_slice());
        buf.push(diff.balance_diff.changed as u8);
        let balance_old = sbw_primitives::encode_be_bytes(diff.balance_diff.old);
        buf.extend_from_slice(&(balance_old.len() as u16).to_be_bytes());
        buf.extend_from_slice(&balance_old);
        let balance_new = sbw_primitives::encode_be_bytes(diff.balance_diff.new);
        buf.extend_from_slice(&(balance_new.len() as u16).to_be_bytes());
        buf.extend_from_slice(&balance_new);
        buf.push(diff.nonce_diff.changed as u8);
        buf.extend_from_slice(&diff.nonce_diff.old.to_be_bytes());
        buf.extend_from_slice(&diff.nonce_diff.new.to_be_bytes());
        buf.extend_from_slice(&(diff.storage_changes.len() as u32).to_be_bytes());
        for change in diff.storage_changes.iter() {
            buf.extend_from_slice(change.key.as_slice());
            buf.extend_from_slice(change.old.as_slice());
            buf.extend_from_slice(change.new.as_slice());
        }
    }

    if buf.len() > MAX_ENCODED_WITNESS_SIZE {
        return Err(WitnessError::EncodeTooLarge {
            actual: buf.len(),
            max: MAX_ENCODED_WITNESS_SIZE,
        });
    }
    Ok(buf)
}

/// Decodes a witness previously produced by [`encode`].
///
/// `witness_hash` is not carried on the wire: it is recomputed from the
/// decoded state root, block number and pre-state, exactly as
/// [`crate::Builder::finalize`] would, so a decoded witness's hash always
/// matches the hash of the witness that was encoded.
pub fn decode(bytes: &[u8]) -> Result<Witness, WitnessError> {
    let mut r = Reader::new(bytes);

    let magic = r.take(4)?;
    if magic != MAGIC.as_slice() {
        return Err(WitnessError::DecodeBadMagic);
    }
    let version = r.take(1)?[0];
    if version != VERSION {
        return Err(WitnessError::DecodeUnsupportedVersion(version));
    }

    let parent_hash = B256::from_slice(r.take(32)?);
    let state_root = B256::from_slice(r.take(32)?);
    let block_number = u64::from_be_bytes(r.take(8)?.try_into().unwrap());
    let pre_state_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;

    let mut pre_state = BTreeMap::new();
    for _ in 0..pre_state_len {
        let address = Address::from_slice(r.take(20)?);
        let nonce = u64::from_be_bytes(r.take(8)?.try_into().unwrap());
        let balance_len = u16::from_be_bytes(r.take(2)?.try_into().unwrap()) as usize;
        let balance = sbw_primitives::decode_be_bytes(r.take(balance_len)?);
        let code_hash = B256::from_slice(r.take(32)?);
        let exists = r.take(1)?[0] != 0;
        let storage_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;
        let mut storage = BTreeMap::new();
        for _ in 0..storage_len {
            let key = B256::from_slice(r.take(32)?);
            let value = B256::from_slice(r.take(32)?);
            storage.insert(key, value);
        }
        pre_state.insert(
            address,
            PreStateAccount {
                exists,
                nonce,
                balance,
                code_hash,
                storage,
            },
        );
    }

    let codes_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;
    let mut codes = BTreeMap::new();
    for _ in 0..codes_len {
        let code_hash = B256::from_slice(r.take(32)?);
        let code_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;
        let code = Bytes::copy_from_slice(r.take(code_len)?);
        codes.insert(code_hash, code);
    }

    let diffs_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;
    let mut state_diffs = Vec::with_capacity(diffs_len);
    for _ in 0..diffs_len {
        let address = Address::from_slice(r.take(20)?);
        let balance_changed = r.take(1)?[0] != 0;
        let balance_old_len = u16::from_be_bytes(r.take(2)?.try_into().unwrap()) as usize;
        let balance_old = sbw_primitives::decode_be_bytes(r.take(balance_old_len)?);
        let balance_new_len = u16::from_be_bytes(r.take(2)?.try_into().unwrap()) as usize;
        let balance_new = sbw_primitives::decode_be_bytes(r.take(balance_new_len)?);
        let nonce_changed = r.take(1)?[0] != 0;
        let nonce_old = u64::from_be_bytes(r.take(8)?.try_into().unwrap());
        let nonce_new = u64::from_be_bytes(r.take(8)?.try_into().unwrap());
        let storage_changes_len = u32::from_be_bytes(r.take(4)?.try_into().unwrap()) as usize;
        let mut storage_changes = Vec::with_capacity(storage_changes_len);
        for _ in 0..storage_changes_len {
            let key = B256::from_slice(r.take(32)?);
            let old = B256::from_slice(r.take(32)?);
            let new = B256::from_slice(r.take(32)?);
            storage_changes.push(StorageChange { key, old, new });
        }
        state_diffs.push(StateDiff {
            address,
            balance_diff: FieldDiff {
                changed: balance_changed,
                old: balance_old,
                new: balance_new,
            },
            nonce_diff: FieldDiff {
                changed: nonce_changed,
                old: nonce_old,
                new: nonce_new,
            },
            storage_changes,
        });
    }

    let witness_hash = compute_witness_hash(state_root, block_number, &pre_state);

    Ok(Witness {
        parent_hash,
        state_root,
        block_number,
        pre_state,
        codes,
        state_diffs,
        witness_hash,
    })
}

/// Minimal byte-slice cursor used only by [`decode`].
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WitnessError> {
        if self.bytes.len() - self.pos < n {
            return Err(WitnessError::DecodeShort {
                expected: n,
                actual: self.bytes.len() - self.pos,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builder;

    fn sample_witness() -> Witness {
        let builder = Builder::new(B256::ZERO, B256::repeat_byte(0xaa), 42);
        let addr = Address::repeat_byte(0x01);
        builder
            .record_account_access(addr, true, 7, U256::from(1000u64), B256::ZERO)
            .unwrap();
        builder
            .record_write(addr, B256::repeat_byte(0x02), B256::ZERO, B256::repeat_byte(0x03))
            .unwrap();
        builder
            .record_code_access(addr, B256::repeat_byte(0x04), Bytes::from_static(b"\x60\x00"))
            .unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn round_trip_preserves_content_hash() {
        let witness = sample_witness();
        let encoded = encode(&witness).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.witness_hash, witness.witness_hash);
        assert_eq!(decoded.pre_state, witness.pre_state);
        assert_eq!(decoded.state_diffs, witness.state_diffs);
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let mut encoded = encode(&sample_witness()).unwrap();
        encoded[0] = b'X';
        assert!(matches!(decode(&encoded), Err(WitnessError::DecodeBadMagic)));
    }

    #[test]
    fn decode_rejects_truncated_input() {
        let mut encoded = encode(&sample_witness()).unwrap();
        encoded.truncate(10);
        assert!(matches!(decode(&encoded), Err(WitnessError::DecodeShort { .. })));
    }
}
