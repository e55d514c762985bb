//! Cache block (line) state.

/// A cached line: validity, dirtiness, tag, and the byte address it was filled from.
///
/// The address is not part of the line's identity. It is kept so that a dirty
/// eviction knows where to write the line back in the next level.
#[derive(Clone, Copy, Debug, Default)]
pub struct Block {
    /// Line holds real data.
    pub valid: bool,
    /// Line was written since it was filled.
    pub dirty: bool,
    /// Tag bits for the owning level (or block address in the victim cache).
    pub tag: u64,
    /// Original byte address of the access that filled the line.
    pub address: u64,
}

impl Block {
    /// An invalid placeholder block.
    pub const INVALID: Self = Self {
        valid: false,
        dirty: false,
        tag: 0,
        address: 0,
    };

    /// A freshly filled, valid block.
    pub const fn filled(tag: u64, address: u64, dirty: bool) -> Self {
        Self {
            valid: true,
            dirty,
            tag,
            address,
        }
    }

    /// Returns `true` if this block is valid and holds `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Two blocks are the same line iff both are valid and their tags match.
    pub const fn same_line(&self, other: &Self) -> bool {
        self.valid && other.matches(self.tag)
    }
}
