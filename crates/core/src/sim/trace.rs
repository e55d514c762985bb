//! Trace input.
//!
//! A trace is a text stream with one memory event per line:
//!
//! ```text
//! r 7fffed80
//! w 0x10004a28
//! ```
//!
//! The first token is the access kind (`r`/`R` or `w`/`W`), the second a
//! hexadecimal address with an optional `0x` prefix. Blank lines and lines
//! starting with `#` are skipped. Trailing tokens are ignored.

use std::io::BufRead;

use crate::common::{AccessType, TraceError};

/// One decoded trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Read or write.
    pub kind: AccessType,
    /// Target byte address.
    pub address: u64,
}

impl TraceEvent {
    /// A read of `address`.
    pub const fn read(address: u64) -> Self {
        Self {
            kind: AccessType::Read,
            address,
        }
    }

    /// A write of `address`.
    pub const fn write(address: u64) -> Self {
        Self {
            kind: AccessType::Write,
            address,
        }
    }
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Arguments
///
/// * `text` - The line, without its terminator.
/// * `line` - 1-based line number for error reporting.
pub fn parse_line(text: &str, line: usize) -> Result<Option<TraceEvent>, TraceError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = text.split_whitespace();
    let kind_token = tokens.next().unwrap_or_default();
    let kind = AccessType::from_token(kind_token).ok_or_else(|| TraceError::UnknownKind {
        line,
        kind: kind_token.to_owned(),
    })?;

    let addr_token = tokens.next().ok_or(TraceError::MissingAddress { line })?;
    let digits = addr_token
        .strip_prefix("0x")
        .or_else(|| addr_token.strip_prefix("0X"))
        .unwrap_or(addr_token);
    let address = u64::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidAddress {
        line,
        text: addr_token.to_owned(),
    })?;

    Ok(Some(TraceEvent { kind, address }))
}

/// Iterator over the events of a buffered trace reader.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;
            match parse_line(&self.buf, self.line) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
