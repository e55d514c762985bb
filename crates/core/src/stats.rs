//! Simulation statistics collection and reporting.
//!
//! This module holds the counters the cache engine writes. It provides:
//! 1. **Event mix:** Read and write event counts.
//! 2. **Per-level counters:** Accesses, read/write misses and write-backs for L1 and L2.
//! 3. **Victim cache:** Probe and hit counts.
//! 4. **Finalize:** Average access time derived from the counters and a latency model.

use serde::Serialize;

use crate::cache::LevelId;
use crate::config::LatencyModel;

/// Counters for one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Reads and writes serviced by this level, write-backs from above included.
    pub accesses: u64,
    /// Reads that missed this level.
    pub read_misses: u64,
    /// Writes that missed this level.
    pub write_misses: u64,
    /// Dirty blocks evicted from this level.
    pub write_backs: u64,
}

impl LevelStats {
    /// Total misses.
    pub const fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Accesses that hit.
    pub const fn hits(&self) -> u64 {
        self.accesses - self.misses()
    }

    /// Miss rate, or 0 when the level was never accessed.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses(), self.accesses).unwrap_or(0.0)
    }
}

/// Counters for the L1 victim cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VictimStats {
    /// Probes after an L1 miss.
    pub accesses: u64,
    /// Probes that found the line.
    pub hits: u64,
}

/// All counters produced by a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Read events.
    pub reads: u64,
    /// Write events.
    pub writes: u64,
    /// L1 counters.
    pub l1: LevelStats,
    /// L2 counters.
    pub l2: LevelStats,
    /// Victim cache counters.
    pub victim: VictimStats,
    /// L1 average access time in cycles, set by [`CacheStats::finalize`].
    pub avg_access_time_l1: f64,
}

/// Returns `num / den`, or `None` when `den` is zero.
fn ratio(num: u64, den: u64) -> Option<f64> {
    (den != 0).then(|| num as f64 / den as f64)
}

impl CacheStats {
    /// Counters for level `id`.
    pub const fn level(&self, id: LevelId) -> &LevelStats {
        match id {
            LevelId::L1 => &self.l1,
            LevelId::L2 => &self.l2,
        }
    }

    /// Mutable counters for level `id`.
    pub fn level_mut(&mut self, id: LevelId) -> &mut LevelStats {
        match id {
            LevelId::L1 => &mut self.l1,
            LevelId::L2 => &mut self.l2,
        }
    }

    /// Total trace events.
    pub const fn events(&self) -> u64 {
        self.reads + self.writes
    }

    /// Computes and stores the L1 average access time.
    ///
    /// ```text
    /// AAT2 = HT2 + MR2 * MP2
    /// MP1  = AAT2                                   (no victim cache)
    ///      = (VC misses / VC accesses) * AAT2       (victim cache)
    /// AAT1 = HT1 + MR1 * MP1
    /// ```
    ///
    /// where the hit times are linear in each level's associativity exponent.
    /// A level with no accesses has a miss rate of 0, and a victim cache that
    /// was never probed forwards every miss to L2.
    ///
    /// # Arguments
    ///
    /// * `s1` - L1 associativity exponent.
    /// * `s2` - L2 associativity exponent.
    /// * `victim_blocks` - Victim cache capacity (`v`).
    /// * `latency` - Hit-time and miss-penalty constants.
    pub fn finalize(
        &mut self,
        s1: u64,
        s2: u64,
        victim_blocks: u64,
        latency: &LatencyModel,
    ) -> f64 {
        let ht2 = latency.l2_hit_base + latency.l2_hit_per_way_bit * s2 as f64;
        let aat2 = ht2 + self.l2.miss_rate() * latency.l2_miss_penalty;

        let mp1 = if victim_blocks == 0 {
            aat2
        } else {
            let vc_misses = self.victim.accesses - self.victim.hits;
            ratio(vc_misses, self.victim.accesses).unwrap_or(1.0) * aat2
        };
        let ht1 = latency.l1_hit_base + latency.l1_hit_per_way_bit * s1 as f64;
        let aat1 = ht1 + self.l1.miss_rate() * mp1;

        self.avg_access_time_l1 = aat1;
        tracing::debug!(aat2, mp1, aat1, "average access time");
        aat1
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        let level = |name: &str, s: &LevelStats| {
            println!(
                "  {:<3} accesses: {:<10} | read_misses: {:<10} | write_misses: {:<10} | write_backs: {:<10} | miss_rate: {:.2}%",
                name,
                s.accesses,
                s.read_misses,
                s.write_misses,
                s.write_backs,
                s.miss_rate() * 100.0
            );
        };

        println!("\n==========================================================");
        println!("CACHE HIERARCHY SIMULATION STATISTICS");
        println!("==========================================================");
        println!("events                   {}", self.events());
        println!("reads                    {}", self.reads);
        println!("writes                   {}", self.writes);
        println!("----------------------------------------------------------");
        println!("MEMORY HIERARCHY");
        level("L1", &self.l1);
        level("L2", &self.l2);
        println!("----------------------------------------------------------");
        println!("VICTIM CACHE");
        println!("  vc.accesses            {}", self.victim.accesses);
        println!("  vc.hits                {}", self.victim.hits);
        println!("----------------------------------------------------------");
        println!("avg_access_time_l1       {:.3}", self.avg_access_time_l1);
        println!("==========================================================");
    }
}
