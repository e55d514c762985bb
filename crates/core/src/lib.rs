//! Trace-driven cache hierarchy simulator library.
//!
//! This crate models a two-level, write-back, write-allocate cache hierarchy:
//! 1. **Cache:** Set-associative levels with strict LRU replacement and an optional
//!    fully-associative victim cache at L1.
//! 2. **Simulation:** Trace parsing and the event driver.
//! 3. **Configuration:** Geometry exponents and the latency model.
//! 4. **Statistics:** Per-level counters and the average access time.

/// Cache engine (blocks, sets, victim cache, levels, hierarchy).
pub mod cache;
/// Common types (geometry, access types, errors).
pub mod common;
/// Simulator configuration (defaults, geometry exponents, latency model).
pub mod config;
/// Trace input and the simulation driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Two-level cache hierarchy.
pub use crate::cache::Hierarchy;
/// Event driver owning the hierarchy and its statistics.
pub use crate::sim::Simulator;
/// Counters written by the hierarchy.
pub use crate::stats::CacheStats;
