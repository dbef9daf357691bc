// Tue Jan 20 2026 - Alex

use std::fmt;

/// Absolute field position in bits from the start of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    bits: u64,
}

impl Offset {
    pub fn new(bits: u64) -> Self {
        Self { bits }
    }

    /// Folds a byte-granular offset and its bit remainder into one bit position.
    /// Returns `None` on overflow.
    pub fn from_parts(byte_offset: u64, bit_offset: u64) -> Option<Self> {
        byte_offset
            .checked_mul(8)
            .and_then(|bits| bits.checked_add(bit_offset))
            .map(Self::new)
    }

    pub fn as_bits(&self) -> u64 {
        self.bits
    }

    pub fn byte_part(&self) -> u64 {
        self.bits / 8
    }

    pub fn bit_part(&self) -> u64 {
        self.bits % 8
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_part() == 0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl From<u64> for Offset {
    fn from(bits: u64) -> Self {
        Self::new(bits)
    }
}
