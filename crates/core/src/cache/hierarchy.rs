//! Two-level cache hierarchy.
//!
//! Wires L1 (with an optional victim cache) on top of L2. L2 is the last level:
//! memory beneath it always satisfies reads and absorbs write-backs. The
//! hierarchy is the single entry point for trace events; it counts the event
//! by kind and routes it through L1.
//!
//! The engine assumes `c2 >= c1`, `b2 >= b1` and `s2 >= s1` and does not check
//! it; see [`SimConfig::validate`](crate::config::SimConfig::validate).

use super::{AccessOutcome, CacheLevel, LevelId};
use crate::common::{AccessType, Geometry};
use crate::config::SimConfig;
use crate::stats::CacheStats;

/// L1 → L2 → memory.
#[derive(Debug)]
pub struct Hierarchy {
    l1: CacheLevel,
}

impl Hierarchy {
    /// Builds the hierarchy from explicit geometries.
    ///
    /// # Arguments
    ///
    /// * `l1` - L1 geometry.
    /// * `victim_blocks` - L1 victim cache capacity; 0 disables it.
    /// * `l2` - L2 geometry.
    pub fn new(l1: Geometry, victim_blocks: usize, l2: Geometry) -> Self {
        let l2 = CacheLevel::new(LevelId::L2, l2, 0, None);
        let l1 = CacheLevel::new(LevelId::L1, l1, victim_blocks, Some(Box::new(l2)));
        Self { l1 }
    }

    /// Builds the hierarchy described by `config`. The configuration is not validated.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.l1.geometry(),
            config.victim_blocks as usize,
            config.l2.geometry(),
        )
    }

    /// Processes one trace event.
    ///
    /// Counts the event as a read or write, then sends it through L1.
    pub fn access(
        &mut self,
        kind: AccessType,
        address: u64,
        stats: &mut CacheStats,
    ) -> AccessOutcome {
        let outcome = match kind {
            AccessType::Read => {
                stats.reads += 1;
                self.l1.read(address, stats)
            }
            AccessType::Write => {
                stats.writes += 1;
                self.l1.write(address, false, stats)
            }
        };
        tracing::trace!(
            ?kind,
            address,
            code = outcome.code(self.victim_enabled()),
            "access"
        );
        outcome
    }

    /// Reads `address` through L1.
    pub fn read(&mut self, address: u64, stats: &mut CacheStats) -> AccessOutcome {
        self.access(AccessType::Read, address, stats)
    }

    /// Writes `address` through L1.
    pub fn write(&mut self, address: u64, stats: &mut CacheStats) -> AccessOutcome {
        self.access(AccessType::Write, address, stats)
    }

    /// The first level.
    pub const fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// The second level.
    pub fn l2(&self) -> Option<&CacheLevel> {
        self.l1.next()
    }

    /// Returns `true` if L1 has a victim cache.
    pub const fn victim_enabled(&self) -> bool {
        self.l1.victim().is_some()
    }
}
