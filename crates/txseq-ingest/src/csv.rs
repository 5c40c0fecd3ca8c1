//! Transaction log CSV loading.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Columns every transaction log must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "account_id",
    "date",
    "amount",
    "type",
    "operation",
    "k_symbol",
    "age",
];

/// Reads a transaction log CSV into a Polars DataFrame.
///
/// The file must have a single header row. Column types are inferred; the
/// preprocessor accepts integer, float or string representations of each
/// required column.
pub fn read_transactions_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    require_columns(&df)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded transaction log"
    );
    Ok(df)
}

/// Checks that every required column is present.
pub fn require_columns(df: &DataFrame) -> Result<()> {
    let names = df.get_column_names();
    for column in REQUIRED_COLUMNS {
        if !names.iter().any(|name| name.as_str() == column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
