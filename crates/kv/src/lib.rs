//! Abstract key-value store interface.
//!
//! Ambient infrastructure carried over from the reference store layer: a
//! generic `KeyValueStore` trait plus a handful of backing implementations
//! (a plain [`std::collections::HashMap`], a size-bounded [`small::SmallMap`],
//! a [`imps::null::NullProvider`] for control-flow-only tests). None of the
//! witness-accumulating crates in this workspace (the collecting shim, the
//! builder, the replay database) are generic over it today; they all use
//! concrete [`std::collections::BTreeMap`]s directly instead.

use auto_impl::auto_impl;
use std::borrow::{Borrow, Cow};
use std::hash::Hash;

pub mod imps;

pub use imps::nohash::{self, NoHashMap};
pub use imps::null::NullProvider;
pub use imps::small::SmallMap;

/// A [`std::collections::HashMap`] keyed by the fast, non-cryptographic
/// `rustc-hash` hasher, for stores whose keys are already hashes or
/// otherwise don't need DoS-resistant hashing.
pub type FxHashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

/// Marker trait for values storable in a [`KeyValueStore`].
///
/// Blanket-implemented for every `Clone` type: unlike the on-disk store this
/// trait originally abstracted over, none of this subsystem's backing stores
/// need a custom (de)serialization hook.
pub trait Value: ToOwned<Owned = Self> {}

impl<T: Clone> Value for T {}

/// Key-Value store insert trait.
#[auto_impl(&mut, Box)]
pub trait KeyValueStoreInsert<K: Ord + Hash + Eq + AsRef<[u8]>, V: Value> {
    /// Inserts a key-value pair, overwriting any existing value.
    fn insert(&mut self, k: K, v: V);

    /// Inserts `default()` only if `k` is not already present.
    fn or_insert_with<F: FnOnce() -> V>(&mut self, k: K, default: F);
}

/// Key-Value store read trait.
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait KeyValueStoreGet<K: Ord + Hash + Eq + AsRef<[u8]>, V: Value> {
    /// Gets a value by key.
    fn get<Q: ?Sized>(&self, k: &Q) -> Option<Cow<'_, V>>
    where
        K: Borrow<Q>,
        Q: Ord + Hash + Eq + AsRef<[u8]>;
}

/// Key-Value store trait: the union of read and insert capabilities.
///
/// Blanket-implemented for any type that already has both halves, so
/// concrete stores only need to implement [`KeyValueStoreInsert`] and
/// [`KeyValueStoreGet`].
pub trait KeyValueStore<K: Ord + Hash + Eq + AsRef<[u8]>, V: Value>:
    KeyValueStoreInsert<K, V> + KeyValueStoreGet<K, V>
{
}

impl<K: Ord + Hash + Eq + AsRef<[u8]>, V: Value, T> KeyValueStore<K, V> for T where
    T: KeyValueStoreInsert<K, V> + KeyValueStoreGet<K, V>
{
}
