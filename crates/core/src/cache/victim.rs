//! Victim cache.
//!
//! A small fully-associative buffer holding blocks recently evicted from L1.
//! A miss in L1 probes it before going to L2; a hit promotes the block back
//! into L1. Entries are kept in insertion order (front = newest) and the
//! oldest entry is discarded when the buffer is full. Probing never reorders
//! entries, it only removes the matching one.
//!
//! Invalid placeholders stand in for never-filled L1 blocks that were evicted,
//! so the buffer's slot count matches the modeled hardware before it warms up.

use std::collections::VecDeque;

use super::block::Block;
use crate::stats::VictimStats;

/// Fully-associative victim buffer of at most `capacity` blocks.
#[derive(Clone, Debug)]
pub struct VictimCache {
    capacity: usize,
    block_size: u64,
    blocks: VecDeque<Block>,
}

impl VictimCache {
    /// Creates a victim cache with `capacity` invalid placeholder slots.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of blocks (`v`).
    /// * `block_size` - Block size in bytes of the owning level.
    pub fn new(capacity: usize, block_size: u64) -> Self {
        Self {
            capacity,
            block_size,
            blocks: std::iter::repeat_n(Block::INVALID, capacity).collect(),
        }
    }

    /// Looks up the line holding `address`.
    ///
    /// Every probe counts as a victim access. On a hit the entry is removed
    /// (it is being promoted into L1) and a victim hit is counted.
    pub fn probe(&mut self, address: u64, stats: &mut VictimStats) -> bool {
        stats.accesses += 1;
        let tag = address / self.block_size;
        let Some(pos) = self.blocks.iter().position(|b| b.matches(tag)) else {
            return false;
        };
        let _ = self.blocks.remove(pos);
        stats.hits += 1;
        tracing::trace!(address, tag, "victim cache hit");
        true
    }

    /// Inserts the line holding `address` as the newest entry.
    ///
    /// Discards the oldest entry first if the buffer is full.
    pub fn insert(&mut self, address: u64) {
        let tag = address / self.block_size;
        if self.blocks.len() == self.capacity {
            if let Some(dropped) = self.blocks.pop_back() {
                tracing::trace!(tag = dropped.tag, valid = dropped.valid, "victim cache drop");
            }
        }
        self.blocks.push_front(Block::filled(tag, address, false));
    }

    /// Appends an invalid placeholder if the buffer is not yet full.
    pub fn insert_invalid(&mut self) {
        if self.blocks.len() < self.capacity {
            self.blocks.push_back(Block::INVALID);
        }
    }

    /// Returns `true` if the line holding `address` is buffered. Does not count an access.
    pub fn contains(&self, address: u64) -> bool {
        let tag = address / self.block_size;
        self.blocks.iter().any(|b| b.matches(tag))
    }

    /// Current number of entries, placeholders included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Maximum number of entries (`v`).
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}
