//! Transaction log ingestion.
//!
//! Loads raw transaction CSV files into Polars DataFrames and checks the
//! required column set before preprocessing.

mod csv;
mod error;
pub mod polars_utils;

pub use csv::{REQUIRED_COLUMNS, read_transactions_csv, require_columns};
pub use error::{IngestError, Result};
pub use polars_utils::{any_to_string, format_numeric};
