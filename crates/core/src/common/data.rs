//! Memory access types.
//!
//! Trace events and the statistics sink both classify accesses by kind.

/// Kind of a trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read.
    Read,
    /// Data write.
    Write,
}

impl AccessType {
    /// Parses the trace-file discriminator (`r`/`R` or `w`/`W`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "r" | "R" => Some(Self::Read),
            "w" | "W" => Some(Self::Write),
            _ => None,
        }
    }
}
