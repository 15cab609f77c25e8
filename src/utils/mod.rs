//! Utility functions and helpers
//!
//! Formatters and logging setup used throughout the crate.

pub mod format;
pub mod logging;
