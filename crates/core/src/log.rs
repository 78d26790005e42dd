use alloy_primitives::{Address, Bytes, B256};

/// An EVM log emitted during execution.
///
/// Logs are pure pass-throughs for the collecting shim and the replay
/// database alike: neither witness collection nor stateless replay needs to
/// inspect their contents, only accumulate them in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Log {
    /// Address that emitted the log.
    pub address: Address,
    /// Indexed topics, in emission order.
    pub topics: Vec<B256>,
    /// Non-indexed data.
    pub data: Bytes,
}

impl Log {
    /// Creates a new log entry.
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self {
            address,
            topics,
            data,
        }
    }
}
