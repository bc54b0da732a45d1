//! Gene domain model

use super::ids::GeneId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stored length of a gene symbol
pub const SYMBOL_MAX_LEN: usize = 50;

/// Maximum stored length of a gene's full name
pub const FULL_NAME_MAX_LEN: usize = 255;

/// Persisted gene record
///
/// The symbol is unique across the catalog, always uppercase, and never
/// changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub id: GeneId,
    pub symbol: String,
    pub full_name: String,
    pub function_summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gene together with the number of variants it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneWithCount {
    pub gene: Gene,
    pub variants_count: i64,
}

/// Outcome of a guarded gene deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneDeletion {
    /// Gene was removed
    Deleted,
    /// No gene with that identifier
    Missing,
    /// Gene still owns variants and was left in place
    Referenced { variants_count: i64 },
}
