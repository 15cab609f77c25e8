pub mod api;
pub mod config;
pub mod error;
pub mod ui;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{DomError, QueryError};
