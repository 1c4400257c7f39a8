//! Core types shared by the shift-scan crates
//!
//! Provides the unified error type used across the series and detector
//! crates, together with a `Result` alias.

pub mod error;

pub use error::{Error, Result};
