/// Errors produced while assembling or encoding a witness.
#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    /// A record operation was attempted on a builder that already finalized.
    #[error("builder already finalized")]
    AlreadyFinalized,
    /// `finalize` was called without a single account having been recorded.
    #[error("witness is empty: no accounts were recorded")]
    EmptyWitness,
    /// Encoding a witness exceeded the maximum wire size.
    #[error("encoded witness size {actual} exceeds maximum {max}")]
    EncodeTooLarge {
        /// The size that would have been produced.
        actual: usize,
        /// The configured maximum.
        max: usize,
    },
    /// Decoding failed because the input was shorter than expected.
    #[error("truncated witness: expected at least {expected} bytes, got {actual}")]
    DecodeShort {
        /// Minimum number of bytes required to continue decoding.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
    /// Decoding failed because the magic bytes did not match.
    #[error("bad magic bytes in encoded witness")]
    DecodeBadMagic,
    /// Decoding failed because the version byte is not supported.
    #[error("unsupported witness encoding version {0}")]
    DecodeUnsupportedVersion(u8),
}
