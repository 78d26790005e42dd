use crate::B256;
use tiny_keccak::{Hasher, Keccak};

/// Hashes a single byte slice with the hash primitive this subsystem is
/// pinned to (Keccak-256). Treated as an opaque cryptographic primitive by
/// every other crate: nothing outside this module calls into `tiny_keccak`
/// directly.
pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    B256::from(out)
}

/// An incremental hasher for feeding a hash primitive from several
/// non-contiguous buffers, e.g. the ordered field-by-field digest the
/// witness builder computes on finalize.
#[derive(Debug)]
pub struct StreamHasher(Keccak);

/// Starts a new incremental Keccak-256 hash.
pub fn stream_hasher() -> StreamHasher {
    StreamHasher(Keccak::v256())
}

impl StreamHasher {
    /// Feeds more bytes into the hash.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.0.update(data);
        self
    }

    /// Consumes the hasher, returning the final digest.
    pub fn finalize(self) -> B256 {
        let mut out = [0u8; 32];
        self.0.finalize(&mut out);
        B256::from(out)
    }
}

/// The keccak256 hash of the empty byte string, the sentinel code hash for
/// accounts with no code.
pub const EMPTY_CODE_HASH: B256 = B256::new([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x7b,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_hash_matches_keccak_of_empty() {
        assert_eq!(keccak256(&[]), EMPTY_CODE_HASH);
    }

    #[test]
    fn stream_hasher_matches_one_shot() {
        let one_shot = keccak256(b"hello world");
        let mut streamed = stream_hasher();
        streamed.update(b"hello ").update(b"world");
        assert_eq!(streamed.finalize(), one_shot);
    }
}
