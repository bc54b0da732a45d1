//! External system adapters
//!
//! - [`database`]: storage traits and the backend factory
//! - [`postgresql`]: production catalog store
//! - [`memory`]: in-process catalog store
//! - [`clinical`]: clinical-data service integration

pub mod clinical;
pub mod database;
pub mod memory;
pub mod postgresql;
