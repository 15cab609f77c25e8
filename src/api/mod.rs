//! External API client and models
//!
//! This module handles communication with the remote query endpoint
//! and defines the data models for its requests/responses.

pub mod client;
pub mod models;

pub use client::{ApiClient, QueryBackend};
pub use models::{ColumnInfo, QueryResponse, StatementResult};
