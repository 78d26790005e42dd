//! Umbrella crate for the stateless witness library.

pub use sbw_cache as cache;
pub use sbw_collector as collector;
pub use sbw_core as core;
pub use sbw_helpers as helpers;
pub use sbw_kv as kv;
pub use sbw_primitives as primitives;
pub use sbw_proof as proof;
pub use sbw_replay as replay;
pub use sbw_witness as witness;

pub use sbw_helpers::{dev_debug, dev_error, dev_info, dev_trace, dev_warn, update_metrics_counter, update_metrics_gauge};

