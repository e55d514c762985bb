//! Simulator: owns the hierarchy, its statistics and the configuration side-by-side.
//!
//! The latency model travels with the configuration and is handed to the
//! finalize step explicitly; there is no global geometry state.

use std::io::BufRead;

use super::trace::{TraceEvent, TraceReader};
use crate::cache::{AccessOutcome, Hierarchy};
use crate::common::TraceError;
use crate::config::SimConfig;
use crate::stats::CacheStats;

/// Top-level simulator: cache hierarchy + statistics sink.
#[derive(Debug)]
pub struct Simulator {
    /// The L1 → L2 hierarchy.
    pub hierarchy: Hierarchy,
    /// Counters written by the hierarchy.
    pub stats: CacheStats,
    config: SimConfig,
}

impl Simulator {
    /// Builds a simulator for `config`. The configuration is not validated.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            hierarchy: Hierarchy::from_config(config),
            stats: CacheStats::default(),
            config: config.clone(),
        }
    }

    /// Processes one event.
    pub fn access(&mut self, event: TraceEvent) -> AccessOutcome {
        self.hierarchy
            .access(event.kind, event.address, &mut self.stats)
    }

    /// Processes every event of `events`, stopping at the first error.
    ///
    /// `observe` is called with each event and its outcome.
    ///
    /// # Returns
    ///
    /// The number of events processed.
    pub fn run<I, F>(&mut self, events: I, mut observe: F) -> Result<u64, TraceError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
        F: FnMut(&TraceEvent, AccessOutcome),
    {
        let mut count = 0;
        for event in events {
            let event = event?;
            let outcome = self.access(event);
            observe(&event, outcome);
            count += 1;
        }
        Ok(count)
    }

    /// Processes a whole text trace.
    pub fn run_trace<R: BufRead>(&mut self, reader: R) -> Result<u64, TraceError> {
        let count = self.run(TraceReader::new(reader), |_, _| {})?;
        tracing::info!(events = count, "trace complete");
        Ok(count)
    }

    /// The configuration this simulator was built from.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Finalizes the statistics and consumes the simulator.
    pub fn finish(mut self) -> CacheStats {
        let _ = self.stats.finalize(
            self.config.l1.s,
            self.config.l2.s,
            self.config.victim_blocks,
            &self.config.latency,
        );
        self.stats
    }
}
