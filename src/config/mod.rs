//! Configuration module
//!
//! Endpoint, editor and logging settings, loaded from TOML.

pub mod config;

pub use config::Config;
