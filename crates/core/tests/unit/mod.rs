//! # Unit Components
//!
//! Tests for the cache engine and the layers around it.


/// Configuration defaults, deserialization and validation.
pub mod config;
