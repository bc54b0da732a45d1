//! Gene transfer objects

use super::{non_blank, Violations};
use crate::domain::gene::{FULL_NAME_MAX_LEN, SYMBOL_MAX_LEN};
use crate::domain::{GeneId, GenoSentinelError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw body of `POST /genes/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenePayload {
    pub symbol: Option<String>,
    pub full_name: Option<String>,
    pub function_summary: Option<String>,
}

/// Raw body of `PUT`/`PATCH /genes/{id}`
///
/// A `symbol` key is accepted and ignored; symbols never change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneUpdatePayload {
    pub full_name: Option<String>,
    pub function_summary: Option<String>,
}

/// Validated gene creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneCreate {
    symbol: String,
    full_name: String,
    function_summary: String,
}

impl GeneCreate {
    /// Validates a creation payload
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error listing every violated rule.
    pub fn new(payload: GenePayload) -> Result<Self> {
        let mut violations = Violations::new();

        let symbol = violations.require(non_blank(payload.symbol), "symbol");
        if let Some(ref symbol) = symbol {
            check_symbol(symbol, &mut violations);
        }

        let full_name = violations.require(non_blank(payload.full_name), "full_name");
        if let Some(ref name) = full_name {
            check_full_name(name, &mut violations);
        }

        let function_summary =
            violations.require(non_blank(payload.function_summary), "function_summary");

        violations.into_result()?;

        let (Some(symbol), Some(full_name), Some(function_summary)) =
            (symbol, full_name, function_summary)
        else {
            return Err(GenoSentinelError::Validation(
                "gene payload is incomplete".to_string(),
            ));
        };

        Ok(Self {
            symbol,
            full_name,
            function_summary,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn function_summary(&self) -> &str {
        &self.function_summary
    }
}

/// Validated partial gene update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneUpdate {
    full_name: Option<String>,
    function_summary: Option<String>,
}

impl GeneUpdate {
    /// Validates the fields present in an update payload
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if a provided field breaks a creation rule.
    pub fn new(payload: GeneUpdatePayload) -> Result<Self> {
        let mut violations = Violations::new();

        let full_name = payload.full_name.map(|n| n.trim().to_string());
        if let Some(ref name) = full_name {
            violations.check(!name.is_empty(), "full_name cannot be empty");
            check_full_name(name, &mut violations);
        }

        let function_summary = payload.function_summary.map(|s| s.trim().to_string());
        if let Some(ref summary) = function_summary {
            violations.check(!summary.is_empty(), "function_summary cannot be empty");
        }

        violations.into_result()?;
        Ok(Self {
            full_name,
            function_summary,
        })
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn function_summary(&self) -> Option<&str> {
        self.function_summary.as_deref()
    }
}

/// Uppercase in the sense of "has letters, none of them lowercase"
fn is_uppercase_symbol(symbol: &str) -> bool {
    symbol.chars().any(char::is_uppercase) && !symbol.chars().any(char::is_lowercase)
}

fn check_symbol(symbol: &str, violations: &mut Violations) {
    violations.check(
        symbol.chars().count() <= SYMBOL_MAX_LEN,
        format!("symbol must be at most {SYMBOL_MAX_LEN} characters"),
    );
    violations.check(is_uppercase_symbol(symbol), "symbol must be uppercase");
}

fn check_full_name(name: &str, violations: &mut Violations) {
    violations.check(
        name.chars().count() <= FULL_NAME_MAX_LEN,
        format!("full_name must be at most {FULL_NAME_MAX_LEN} characters"),
    );
}

/// Full gene representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneDto {
    pub id: GeneId,
    pub symbol: String,
    pub full_name: String,
    pub function_summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gene row in list and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneListItem {
    pub id: GeneId,
    pub symbol: String,
    pub full_name: String,
    pub variants_count: i64,
}

/// Body of `GET /genes/search`
#[derive(Debug, Clone, Serialize)]
pub struct GeneSearchResult {
    pub query: String,
    pub count: usize,
    pub results: Vec<GeneListItem>,
}
