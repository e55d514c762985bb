//! Set-associative, write-back cache levels.
//!
//! This module implements the cache hierarchy engine. It provides:
//! 1. **Data model:** Blocks, LRU sets, and the L1 victim cache.
//! 2. **Levels:** Lookup, LRU replacement, write-allocate on write miss, and
//!    dirty write-back into the next level.
//! 3. **Hierarchy:** L1 (optional victim cache) → L2 → backing memory.
//!
//! A level owns the level below it. The chain is acyclic and short, so every
//! access runs to completion through at most two recursive calls.

/// Cache block state.
pub mod block;

/// Two-level hierarchy wiring and the event entry point.
pub mod hierarchy;

/// LRU-ordered set.
pub mod set;

/// L1 victim cache.
pub mod victim;

use std::fmt;

pub use self::block::Block;
pub use self::hierarchy::Hierarchy;
pub use self::set::Set;
pub use self::victim::VictimCache;

use crate::common::Geometry;
use crate::stats::{CacheStats, LevelStats};

/// Position of a level in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelId {
    /// First level, closest to the core.
    L1,
    /// Second level, backed by memory.
    L2,
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L1 => f.write_str("L1"),
            Self::L2 => f.write_str("L2"),
        }
    }
}

/// Where a demand access was finally satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Hit in L1.
    L1Hit,
    /// Missed L1, rescued by the victim cache.
    VictimHit,
    /// Missed L1 (and victim cache), hit in L2.
    L2Hit,
    /// Missed every level; filled from memory.
    L2Miss,
}

impl AccessOutcome {
    /// Short outcome code, `M`/`H` per level with `V` for the victim cache.
    ///
    /// Codes are padded with `*` to the width of the longest code for the
    /// hierarchy shape, so traces with and without a victim cache line up.
    pub const fn code(self, victim_enabled: bool) -> &'static str {
        match (self, victim_enabled) {
            (Self::L1Hit, false) => "H1**",
            (Self::L1Hit, true) => "H1****",
            (Self::VictimHit, _) => "M1HV**",
            (Self::L2Hit, false) => "M1H2",
            (Self::L2Hit, true) => "M1MVH2",
            (Self::L2Miss, false) => "M1M2",
            (Self::L2Miss, true) => "M1MVM2",
        }
    }

    const fn hit_at(id: LevelId) -> Self {
        match id {
            LevelId::L1 => Self::L1Hit,
            LevelId::L2 => Self::L2Hit,
        }
    }
}

/// One level of the cache hierarchy.
///
/// Owns its sets, its victim cache (if any) and the next slower level (if any).
/// The last level has no next level: reads below it always succeed and
/// write-backs below it are absorbed by memory.
#[derive(Debug)]
pub struct CacheLevel {
    id: LevelId,
    geometry: Geometry,
    sets: Vec<Set>,
    victim: Option<VictimCache>,
    next: Option<Box<CacheLevel>>,
}

impl CacheLevel {
    /// Creates a level with all blocks invalid.
    ///
    /// # Arguments
    ///
    /// * `id` - Which statistics counters this level writes.
    /// * `geometry` - Size, block size and associativity.
    /// * `victim_blocks` - Victim cache capacity; 0 disables it.
    /// * `next` - The next slower level, or `None` for the last level.
    pub fn new(
        id: LevelId,
        geometry: Geometry,
        victim_blocks: usize,
        next: Option<Box<Self>>,
    ) -> Self {
        let num_sets = geometry.num_sets() as usize;
        let ways = geometry.associativity as usize;
        let victim =
            (victim_blocks > 0).then(|| VictimCache::new(victim_blocks, geometry.block_size));

        tracing::info!(
            level = %id,
            size = geometry.cache_size,
            block = geometry.block_size,
            ways,
            sets = num_sets,
            victim_blocks,
            "cache level configured"
        );

        Self {
            id,
            geometry,
            sets: vec![Set::new(ways); num_sets],
            victim,
            next,
        }
    }

    /// Services a read of `address`.
    ///
    /// On a miss the victim cache is probed, then the next level is read.
    /// The fetched line is installed clean at the MRU position.
    pub fn read(&mut self, address: u64, stats: &mut CacheStats) -> AccessOutcome {
        self.level_stats(stats).accesses += 1;
        let (tag, index) = self.geometry.split(address);

        if let Some(pos) = self.sets[index].find(tag) {
            let _ = self.sets[index].touch(pos);
            tracing::trace!(level = %self.id, address, "read hit");
            return AccessOutcome::hit_at(self.id);
        }

        self.level_stats(stats).read_misses += 1;
        tracing::trace!(level = %self.id, address, "read miss");
        self.allocate(tag, index, address, false, stats)
    }

    /// Services a write of `address`.
    ///
    /// Writes are write-back and write-allocate: a miss fetches the line with a
    /// read from below and installs it dirty. `is_write_back` marks writes
    /// issued by an upper level's dirty eviction; they update state and
    /// counters exactly like demand writes but are not reported as demand
    /// outcomes.
    pub fn write(
        &mut self,
        address: u64,
        is_write_back: bool,
        stats: &mut CacheStats,
    ) -> AccessOutcome {
        self.level_stats(stats).accesses += 1;
        let (tag, index) = self.geometry.split(address);

        if let Some(pos) = self.sets[index].find(tag) {
            if let Some(block) = self.sets[index].touch(pos) {
                block.dirty = true;
            }
            if !is_write_back {
                tracing::trace!(level = %self.id, address, "write hit");
            }
            return AccessOutcome::hit_at(self.id);
        }

        self.level_stats(stats).write_misses += 1;
        if !is_write_back {
            tracing::trace!(level = %self.id, address, "write miss");
        }
        self.allocate(tag, index, address, true, stats)
    }

    /// Miss path shared by reads and writes.
    ///
    /// Tries the victim cache first, otherwise reads the line from the next
    /// level. Either way the LRU block of the set is replaced.
    fn allocate(
        &mut self,
        tag: u64,
        index: usize,
        address: u64,
        dirty: bool,
        stats: &mut CacheStats,
    ) -> AccessOutcome {
        let incoming = Block::filled(tag, address, dirty);

        if let Some(victim) = self.victim.as_mut() {
            if victim.probe(address, &mut stats.victim) {
                self.replace(index, incoming, stats);
                return AccessOutcome::VictimHit;
            }
        }

        // The fetch from below precedes the eviction write-back.
        let outcome = match self.next.as_deref_mut() {
            Some(next) => next.read(address, stats),
            None => AccessOutcome::L2Miss,
        };
        self.replace(index, incoming, stats);
        outcome
    }

    /// Installs `incoming` in set `index`, writing back and stashing the LRU block.
    fn replace(&mut self, index: usize, incoming: Block, stats: &mut CacheStats) {
        let evicted = self.sets[index].replace_lru(incoming);

        if evicted.dirty {
            self.level_stats(stats).write_backs += 1;
            tracing::debug!(level = %self.id, address = evicted.address, "dirty write-back");
            if let Some(next) = self.next.as_deref_mut() {
                let _ = next.write(evicted.address, true, stats);
            }
        }

        if let Some(victim) = self.victim.as_mut() {
            if evicted.valid {
                victim.insert(evicted.address);
            } else {
                victim.insert_invalid();
            }
        }
    }

    fn level_stats<'a>(&self, stats: &'a mut CacheStats) -> &'a mut LevelStats {
        stats.level_mut(self.id)
    }

    /// Returns `true` if the line holding `address` is resident in this level's sets.
    ///
    /// Does not touch LRU state or counters.
    pub fn contains(&self, address: u64) -> bool {
        let (tag, index) = self.geometry.split(address);
        self.sets[index].find(tag).is_some()
    }

    /// Returns `true` if the line holding `address` is resident and dirty.
    pub fn is_dirty(&self, address: u64) -> bool {
        let (tag, index) = self.geometry.split(address);
        self.sets[index].iter().any(|b| b.matches(tag) && b.dirty)
    }

    /// The set that `address` maps to.
    pub fn set_for(&self, address: u64) -> &Set {
        &self.sets[self.geometry.index(address)]
    }

    /// This level's position in the hierarchy.
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// This level's geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The attached victim cache, if enabled.
    pub const fn victim(&self) -> Option<&VictimCache> {
        self.victim.as_ref()
    }

    /// The next slower level, if any.
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}
