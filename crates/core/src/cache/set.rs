//! LRU-ordered cache set.
//!
//! A set keeps its blocks in recency order: the front is the most recently
//! used block and the back is the next victim. The set size is fixed at
//! construction; eviction and installation happen together so the size never
//! changes.
//!
//! # Performance
//!
//! - `find()`: O(W) where W is the associativity
//! - `touch()`: O(W) (remove + push front)
//! - `replace_lru()`: O(1)

use std::collections::VecDeque;

use super::block::Block;

/// One set of a cache level. Index 0 is MRU, last index is LRU.
#[derive(Clone, Debug)]
pub struct Set {
    blocks: VecDeque<Block>,
}

impl Set {
    /// Creates a set of `ways` invalid placeholder blocks.
    pub fn new(ways: usize) -> Self {
        Self {
            blocks: std::iter::repeat_n(Block::INVALID, ways).collect(),
        }
    }

    /// Position of the valid block holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.blocks.iter().position(|b| b.matches(tag))
    }

    /// Moves the block at `pos` to the MRU position and returns it.
    ///
    /// Returns `None` if `pos` is out of range.
    pub fn touch(&mut self, pos: usize) -> Option<&mut Block> {
        let block = self.blocks.remove(pos)?;
        self.blocks.push_front(block);
        self.blocks.front_mut()
    }

    /// Evicts the LRU block and installs `incoming` at the MRU position.
    ///
    /// Returns the evicted block, which may be an invalid placeholder.
    pub fn replace_lru(&mut self, incoming: Block) -> Block {
        let evicted = self.blocks.pop_back().unwrap_or(Block::INVALID);
        self.blocks.push_front(incoming);
        evicted
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks in recency order, MRU first.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// The block that would be evicted next.
    pub fn lru(&self) -> Option<&Block> {
        self.blocks.back()
    }
}
