// Tue Jan 20 2026 - Alex

use std::fmt;

/// Storage size in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size {
    bits: u64,
}

impl Size {
    pub fn new(bits: u64) -> Self {
        Self { bits }
    }

    pub fn as_bits(&self) -> u64 {
        self.bits
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl From<u64> for Size {
    fn from(bits: u64) -> Self {
        Self::new(bits)
    }
}
