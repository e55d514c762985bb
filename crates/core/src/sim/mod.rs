//! Trace input and the simulation driver.
//!
//! Decodes text traces into read/write events and feeds them through the cache
//! hierarchy, collecting statistics.

/// Simulator owning the hierarchy and its statistics.
pub mod simulator;

/// Text trace parsing.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceEvent, TraceReader, parse_line};
