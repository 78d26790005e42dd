//! Core value types shared by every witness crate.
//!
//! This crate carries no behavior beyond what the data model in the witness
//! subsystem needs: address/hash/stem newtypes (re-exported from
//! [`alloy_primitives`], the value-type foundation every crate in this corpus
//! builds on), the canonical big-endian "no leading zeros" balance encoding,
//! and the single Keccak-256 hash primitive the rest of the subsystem treats
//! as opaque.

pub use alloy_primitives::{Address, B256, U256};

mod bigint;
pub use bigint::{decode_be_bytes, encode_be_bytes};

mod hash;
pub use hash::{keccak256, stream_hasher, StreamHasher, EMPTY_CODE_HASH};

mod stem;
pub use stem::Stem;
