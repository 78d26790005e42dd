//! Concrete [`crate::KeyValueStore`] implementations.
//!
//! Reference-type impls (`&S`, `&mut S`, `Box<S>`, `Rc<S>`, `Arc<S>`) are
//! generated by `#[auto_impl]` on the trait declarations in the crate root,
//! so this module only holds owned backing stores.

mod std_collections;

pub mod nohash;
pub mod null;
pub mod small;
