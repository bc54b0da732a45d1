//! In-memory catalog backend
//!
//! Used for local development and tests; selected with
//! `database_target = "memory"`.

pub mod store;

pub use store::MemoryStore;
