//! Error types for the preprocessing pass.

use thiserror::Error;

/// Errors that abort a preprocessing pass.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Date not in `yyMMdd` form or not a real calendar date.
    #[error("invalid date '{value}' at row {row}: expected yyMMdd")]
    InvalidDate { row: usize, value: String },

    /// Required column absent from the input table.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// Null or unparseable value in a required non-categorical column.
    #[error("invalid value in column '{column}' at row {row}: {value}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// Standard deviation is zero or not finite, so the column cannot be scaled.
    #[error("cannot scale '{column}': standard deviation is {value}")]
    DegenerateScale { column: String, value: f64 },

    /// Input table has no rows.
    #[error("transaction table is empty")]
    EmptyInput,

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PreprocessError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<txseq_ingest::IngestError> for PreprocessError {
    fn from(err: txseq_ingest::IngestError) -> Self {
        match err {
            txseq_ingest::IngestError::MissingColumn { column } => Self::MissingColumn { column },
            other => Self::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
