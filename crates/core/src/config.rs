//! Configuration system for the cache simulator.
//!
//! This module defines the configuration consumed once when the hierarchy is
//! built. It provides:
//! 1. **Defaults:** Baseline geometry exponents and latency model constants.
//! 2. **Structures:** Per-level geometry, victim cache size and latency model.
//! 3. **Validation:** Caller-side geometry checks; the engine itself never validates.
//!
//! Configuration is supplied as JSON, or use `SimConfig::default()` for the CLI.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{ConfigError, Geometry};

/// Default configuration constants for the simulator.
mod defaults {
    /// L1 size exponent (4 KiB).
    pub const C1: u64 = 12;
    /// L1 block exponent (32 bytes).
    pub const B1: u64 = 5;
    /// L1 associativity exponent (8-way).
    pub const S1: u64 = 3;
    /// Victim cache blocks.
    pub const V: u64 = 3;
    /// L2 size exponent (32 KiB).
    pub const C2: u64 = 15;
    /// L2 block exponent (64 bytes).
    pub const B2: u64 = 6;
    /// L2 associativity exponent (32-way).
    pub const S2: u64 = 5;

    /// Largest supported victim cache.
    pub const MAX_VICTIM_BLOCKS: u64 = 4;

    /// Cycles to service an L2 miss from memory.
    pub const L2_MISS_PENALTY: f64 = 500.0;
    /// L1 hit time for a direct-mapped L1.
    pub const L1_HIT_BASE: f64 = 2.0;
    /// Extra L1 hit time per associativity exponent step.
    pub const L1_HIT_PER_WAY_BIT: f64 = 0.2;
    /// L2 hit time for a direct-mapped L2.
    pub const L2_HIT_BASE: f64 = 4.0;
    /// Extra L2 hit time per associativity exponent step.
    pub const L2_HIT_PER_WAY_BIT: f64 = 0.4;
}

/// Geometry exponents for one cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LevelConfig {
    /// Total size is `2^c` bytes.
    pub c: u64,
    /// Block size is `2^b` bytes.
    pub b: u64,
    /// Associativity is `2^s` blocks per set.
    pub s: u64,
}

impl LevelConfig {
    /// Derived byte geometry.
    pub const fn geometry(&self) -> Geometry {
        Geometry::from_exponents(self.c, self.b, self.s)
    }

    fn validate(&self, level: &'static str) -> Result<(), ConfigError> {
        for (name, value) in [("c", self.c), ("b", self.b), ("s", self.s)] {
            if value >= 64 {
                return Err(ConfigError::ExponentOutOfRange { level, name, value });
            }
        }
        if self.c < self.b + self.s {
            return Err(ConfigError::NoSets {
                level,
                c: self.c,
                b: self.b,
                s: self.s,
            });
        }
        Ok(())
    }

    const fn default_l1() -> Self {
        Self {
            c: defaults::C1,
            b: defaults::B1,
            s: defaults::S1,
        }
    }

    const fn default_l2() -> Self {
        Self {
            c: defaults::C2,
            b: defaults::B2,
            s: defaults::S2,
        }
    }
}

/// Latency model used by the finalize step.
///
/// Hit times are linear in the associativity exponent:
/// `HT = base + per_way_bit * s`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatencyModel {
    /// Cycles to service an L2 miss from memory.
    #[serde(default = "LatencyModel::default_l2_miss_penalty")]
    pub l2_miss_penalty: f64,

    /// L1 hit time at `s1 = 0`.
    #[serde(default = "LatencyModel::default_l1_hit_base")]
    pub l1_hit_base: f64,

    /// L1 hit time added per unit of `s1`.
    #[serde(default = "LatencyModel::default_l1_hit_per_way_bit")]
    pub l1_hit_per_way_bit: f64,

    /// L2 hit time at `s2 = 0`.
    #[serde(default = "LatencyModel::default_l2_hit_base")]
    pub l2_hit_base: f64,

    /// L2 hit time added per unit of `s2`.
    #[serde(default = "LatencyModel::default_l2_hit_per_way_bit")]
    pub l2_hit_per_way_bit: f64,
}

impl LatencyModel {
    const fn default_l2_miss_penalty() -> f64 {
        defaults::L2_MISS_PENALTY
    }

    const fn default_l1_hit_base() -> f64 {
        defaults::L1_HIT_BASE
    }

    const fn default_l1_hit_per_way_bit() -> f64 {
        defaults::L1_HIT_PER_WAY_BIT
    }

    const fn default_l2_hit_base() -> f64 {
        defaults::L2_HIT_BASE
    }

    const fn default_l2_hit_per_way_bit() -> f64 {
        defaults::L2_HIT_PER_WAY_BIT
    }
}

impl Default for LatencyModel {
    fn default() -> Self {
        Self {
            l2_miss_penalty: defaults::L2_MISS_PENALTY,
            l1_hit_base: defaults::L1_HIT_BASE,
            l1_hit_per_way_bit: defaults::L1_HIT_PER_WAY_BIT,
            l2_hit_base: defaults::L2_HIT_BASE,
            l2_hit_per_way_bit: defaults::L2_HIT_PER_WAY_BIT,
        }
    }
}

/// Root configuration: L1 geometry, victim cache size, L2 geometry, latency model.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.l1.c, 12);
/// assert_eq!(config.victim_blocks, 3);
/// ```
///
/// Deserializing from JSON; omitted fields take their defaults:
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let json = r#"{
///     "l1": { "c": 10, "b": 6, "s": 0 },
///     "victim_blocks": 1,
///     "latency": { "l2_miss_penalty": 200.0 }
/// }"#;
///
/// let config = SimConfig::from_json(json).unwrap();
/// assert_eq!(config.l1.s, 0);
/// assert_eq!(config.l2.c, 15);
/// assert_eq!(config.latency.l2_miss_penalty, 200.0);
/// assert_eq!(config.latency.l1_hit_base, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimConfig {
    /// L1 geometry exponents.
    #[serde(default = "LevelConfig::default_l1")]
    pub l1: LevelConfig,

    /// Victim cache blocks at L1 (0 disables it).
    #[serde(default = "SimConfig::default_victim_blocks")]
    pub victim_blocks: u64,

    /// L2 geometry exponents.
    #[serde(default = "LevelConfig::default_l2")]
    pub l2: LevelConfig,

    /// Latency model for the average access time.
    #[serde(default)]
    pub latency: LatencyModel,
}

impl SimConfig {
    const fn default_victim_blocks() -> u64 {
        defaults::V
    }

    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that the configuration describes a buildable hierarchy.
    ///
    /// Each level must have exponents below 64 and at least one set, L2 must be
    /// at least as large as L1 in size, block size and associativity, and the
    /// victim cache must hold at most four blocks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1.validate("L1")?;
        self.l2.validate("L2")?;

        for (name, l1, l2) in [
            ("c", self.l1.c, self.l2.c),
            ("b", self.l1.b, self.l2.b),
            ("s", self.l1.s, self.l2.s),
        ] {
            if l2 < l1 {
                return Err(ConfigError::L2SmallerThanL1 { name, l1, l2 });
            }
        }

        if self.victim_blocks > defaults::MAX_VICTIM_BLOCKS {
            return Err(ConfigError::VictimOutOfRange(self.victim_blocks));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            l1: LevelConfig::default_l1(),
            victim_blocks: defaults::V,
            l2: LevelConfig::default_l2(),
            latency: LatencyModel::default(),
        }
    }
}
