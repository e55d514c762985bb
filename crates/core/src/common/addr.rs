//! Cache geometry and address decomposition.
//!
//! Every cache level slices a byte address into a tag and a set index. This module
//! provides:
//! 1. **Geometry:** Byte sizes derived from the power-of-two configuration exponents.
//! 2. **Decomposition:** Arithmetic tag/index extraction that matches bit slicing.

/// Power-of-two geometry of a single cache level.
///
/// All sizes are derived as `2^exponent` from the configuration. The derived
/// values are fixed for the lifetime of the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Total data capacity in bytes (`2^c`).
    pub cache_size: u64,
    /// Bytes per block (`2^b`).
    pub block_size: u64,
    /// Blocks per set (`2^s`).
    pub associativity: u64,
    /// Associativity exponent `s`, kept for the hit-time model.
    pub assoc_bits: u64,
}

impl Geometry {
    /// Builds a geometry from the `(c, b, s)` exponents.
    ///
    /// No validation is performed; an exponent of 64 or more, or `c < b + s`,
    /// produces a geometry that cannot be indexed.
    pub const fn from_exponents(c: u64, b: u64, s: u64) -> Self {
        Self {
            cache_size: 1 << c,
            block_size: 1 << b,
            associativity: 1 << s,
            assoc_bits: s,
        }
    }

    /// Number of sets: `cache_size / block_size / associativity`.
    #[inline(always)]
    pub const fn num_sets(&self) -> u64 {
        self.cache_size / self.block_size / self.associativity
    }

    /// Block address: the byte address with the block offset stripped.
    #[inline(always)]
    pub const fn block_address(&self, address: u64) -> u64 {
        address / self.block_size
    }

    /// Tag bits of `address` for this level.
    #[inline(always)]
    pub const fn tag(&self, address: u64) -> u64 {
        self.block_address(address) / self.num_sets()
    }

    /// Set index of `address` for this level.
    #[inline(always)]
    pub const fn index(&self, address: u64) -> usize {
        (self.block_address(address) % self.num_sets()) as usize
    }

    /// Splits `address` into `(tag, index)`.
    #[inline(always)]
    pub const fn split(&self, address: u64) -> (u64, usize) {
        (self.tag(address), self.index(address))
    }
}
