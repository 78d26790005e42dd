use std::fmt;

/// A 31-byte verkle-trie key prefix.
///
/// Nothing in the current operation set derives a [`Stem`] from a live
/// state access; it exists in the data model so a verkle-based proof path
/// can replace the simulated one in the proof generator without reshaping
/// the rest of the witness (see `DESIGN.md`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stem([u8; 31]);

impl Stem {
    /// Builds a stem from raw bytes.
    pub const fn new(bytes: [u8; 31]) -> Self {
        Self(bytes)
    }

    /// Returns the stem's bytes.
    pub const fn as_bytes(&self) -> &[u8; 31] {
        &self.0
    }
}

impl From<[u8; 31]> for Stem {
    fn from(bytes: [u8; 31]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Stem {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stem(0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
