//! PostgreSQL database integration
//!
//! This module provides the production catalog backend: a pooled client
//! and a store implementing the repository traits.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;
