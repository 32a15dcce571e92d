//! A single flat address type.
//!
//! There is no MMU in this machine: every stage deals in one 32-bit address
//! space, so unlike a privileged-mode simulator there is no virtual/physical
//! split to keep apart at the type level.

/// An address into the flat byte-addressable memory image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u32);

impl Address {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub fn val(self) -> u32 {
        self.0
    }

    /// Returns the address advanced by `bytes`, wrapping on overflow.
    #[inline(always)]
    pub fn wrapping_add(self, bytes: u32) -> Self {
        Self(self.0.wrapping_add(bytes))
    }
}

impl From<u32> for Address {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
