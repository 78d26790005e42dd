/// Errors produced constructing or operating a [`crate::Replay`] database.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The source witness recorded zero accounts.
    #[error("cannot replay an empty witness")]
    EmptyWitness,

    /// The source witness exceeds the configured maximum size for the
    /// validator path.
    #[error("witness size {actual} exceeds validator-path maximum {max}")]
    WitnessTooLarge { actual: usize, max: usize },
}
