//! Configuration options for the preprocessing pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Type value whose amounts keep their sign in `raw_amount`.
pub const DEFAULT_CREDIT_LABEL: &str = "CREDIT";

/// Row ordering applied before per-account day deltas are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Use rows in the order they were read. Each account's rows must
    /// already be chronological.
    #[default]
    AsGiven,
    /// Stable sort by `(account_id, date)` before computing deltas.
    SortByAccountDate,
}

impl OrderingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingMode::AsGiven => "as_given",
            OrderingMode::SortByAccountDate => "sort_by_account_date",
        }
    }
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "as_given" => Ok(OrderingMode::AsGiven),
            "sort_by_account_date" => Ok(OrderingMode::SortByAccountDate),
            _ => Err(ModelError::UnknownOrderingMode(s.to_string())),
        }
    }
}

/// Options controlling the preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Transaction type whose amounts are positive in `raw_amount`.
    pub credit_label: String,
    /// Row ordering before day deltas.
    pub ordering: OrderingMode,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            credit_label: DEFAULT_CREDIT_LABEL.to_string(),
            ordering: OrderingMode::AsGiven,
        }
    }
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credit_label(mut self, label: impl Into<String>) -> Self {
        self.credit_label = label.into();
        self
    }

    pub fn with_ordering(mut self, ordering: OrderingMode) -> Self {
        self.ordering = ordering;
        self
    }
}
