//! Common types shared by the cache engine and its drivers.
//!
//! 1. **Geometry:** Power-of-two level sizes and tag/index decomposition.
//! 2. **Access types:** Read/write classification of trace events.
//! 3. **Errors:** Configuration and trace input failures.

/// Cache geometry and address decomposition.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::Geometry;
pub use data::AccessType;
pub use error::{ConfigError, SimError, TraceError};
