use crate::U256;

/// Encodes a balance-like value as big-endian bytes with no leading zeros.
///
/// Zero encodes to the empty slice, matching the wire rule every witness
/// consumer of this crate relies on (§4.C `Balance encoding`).
pub fn encode_be_bytes(value: U256) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_be_bytes_trimmed_vec()
    }
}

/// Decodes a balance-like value from its canonical big-endian encoding.
///
/// An empty slice decodes to zero. This is the inverse of [`encode_be_bytes`]
/// and does not reject non-canonical (zero-padded) input, since witnesses are
/// produced by this crate's own encoder and never read from an untrusted wire
/// without a surrounding format that already bounds their length.
pub fn decode_be_bytes(bytes: &[u8]) -> U256 {
    U256::from_be_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_empty() {
        assert_eq!(encode_be_bytes(U256::ZERO), Vec::<u8>::new());
        assert_eq!(decode_be_bytes(&[]), U256::ZERO);
    }

    #[test]
    fn round_trips_nonzero() {
        let value = U256::from(123456789u64);
        let encoded = encode_be_bytes(value);
        assert!(!encoded.is_empty());
        assert_eq!(encoded[0], 0x07); // no leading zero byte
        assert_eq!(decode_be_bytes(&encoded), value);
    }

    #[test]
    fn round_trips_max() {
        let value = U256::MAX;
        let encoded = encode_be_bytes(value);
        assert_eq!(encoded.len(), 32);
        assert_eq!(decode_be_bytes(&encoded), value);
    }
}
