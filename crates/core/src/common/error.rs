//! Error types for configuration and trace input.
//!
//! The simulation engine itself has no error paths; these errors cover the
//! layers around it:
//! 1. **Configuration:** Geometry combinations the engine cannot index, and JSON/IO failures.
//! 2. **Trace input:** Malformed event lines and reader failures.

use thiserror::Error;

/// Invalid or unreadable simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size exponent does not fit in a 64-bit address.
    #[error("{level}: exponent {name}={value} is out of range (must be < 64)")]
    ExponentOutOfRange {
        /// Level name (`L1` or `L2`).
        level: &'static str,
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: u64,
    },

    /// `c < b + s`: the level would have fewer than one set.
    #[error("{level}: c={c} is smaller than b+s={b}+{s}, leaving no sets")]
    NoSets {
        /// Level name (`L1` or `L2`).
        level: &'static str,
        /// Size exponent.
        c: u64,
        /// Block exponent.
        b: u64,
        /// Associativity exponent.
        s: u64,
    },

    /// An L2 parameter is smaller than the matching L1 parameter.
    #[error("L2 {name}={l2} must be at least L1 {name}={l1}")]
    L2SmallerThanL1 {
        /// Parameter name.
        name: &'static str,
        /// L1 value.
        l1: u64,
        /// L2 value.
        l2: u64,
    },

    /// Victim cache block count outside the supported range.
    #[error("victim cache size v={0} is out of range (0..=4)")]
    VictimOutOfRange(u64),

    /// Malformed JSON configuration.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed trace input.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The access kind is neither read nor write.
    #[error("line {line}: unknown access kind '{kind}'")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        kind: String,
    },

    /// The line has an access kind but no address.
    #[error("line {line}: missing address")]
    MissingAddress {
        /// 1-based line number.
        line: usize,
    },

    /// The address is not valid hexadecimal.
    #[error("line {line}: invalid address '{text}'")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        text: String,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure surfaced by a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace input failure.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
