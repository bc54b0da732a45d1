// GenoSentinel - Genomics catalog service
// Copyright (c) 2025 GenoSentinel Contributors
// Licensed under the MIT License

//! # GenoSentinel - Genomics Catalog Service
//!
//! GenoSentinel keeps a catalog of oncological genes, the genetic variants
//! known for each gene, and the variants detected in individual patients.
//! Patient demographics live in an external clinical service and are joined
//! into reports at read time.
//!
//! ## Overview
//!
//! The library provides:
//! - **Gene catalog** with symbol search and statistics
//! - **Variant catalog** with chromosome and impact filters
//! - **Patient variant reports** with per-patient summaries
//! - **Clinical data adapter** that never fails a request
//!
//! ## Architecture
//!
//! GenoSentinel follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - Axum router, handlers and error responses
//! - [`core`] - Catalog operations and business rules
//! - [`dto`] / [`mappers`] - Transfer objects and their conversion to domain records
//! - [`adapters`] - Storage backends (PostgreSQL, in-memory) and the clinical client
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genosentinel::adapters::clinical::ClinicalDataAdapter;
//! use genosentinel::adapters::memory::MemoryStore;
//! use genosentinel::api::{build_router, AppState};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(Arc::new(MemoryStore::new()), ClinicalDataAdapter::pending());
//! let app = build_router(state, Duration::from_secs(30));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::GenoSentinelError`]. The HTTP
//! layer renders it as `{"error": "..."}` with 400, 404 or 500.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod dto;
pub mod logging;
pub mod mappers;
