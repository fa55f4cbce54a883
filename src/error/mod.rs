//! Error handling
//!
//! Defines domain-specific error types for each module of the crate.

pub mod types;

pub use types::*;
