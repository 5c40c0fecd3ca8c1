//! Raw transaction rows and the typed input frame.

use chrono::NaiveDate;
use polars::prelude::*;
use txseq_ingest::{any_to_string, require_columns};

use crate::calendar::{CalendarFields, calendar_columns, calendar_fields, parse_compact_date};
use crate::error::{PreprocessError, Result};

/// One raw transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub account_id: i64,
    /// `yyMMdd` date as it appeared in the source.
    pub date: String,
    pub amount: f64,
    pub type_: Option<String>,
    pub operation: Option<String>,
    pub k_symbol: Option<String>,
    pub age: f64,
}

impl TransactionRecord {
    pub fn new(
        account_id: i64,
        date: impl Into<String>,
        amount: f64,
        type_: &str,
        operation: &str,
        k_symbol: &str,
        age: f64,
    ) -> Self {
        Self {
            account_id,
            date: date.into(),
            amount,
            type_: Some(type_.to_string()),
            operation: Some(operation.to_string()),
            k_symbol: Some(k_symbol.to_string()),
            age,
        }
    }
}

/// Builds a raw transaction table from rows.
pub fn transactions_frame(records: &[TransactionRecord]) -> Result<DataFrame> {
    fn column<T, F>(records: &[TransactionRecord], name: &str, f: F) -> Column
    where
        F: Fn(&TransactionRecord) -> T,
        Series: NamedFrom<Vec<T>, [T]>,
    {
        Series::new(name.into(), records.iter().map(f).collect::<Vec<T>>()).into_column()
    }

    Ok(DataFrame::new(vec![
        column(records, "account_id", |r| r.account_id),
        column(records, "date", |r| r.date.clone()),
        column(records, "amount", |r| r.amount),
        column(records, "type", |r| r.type_.clone()),
        column(records, "operation", |r| r.operation.clone()),
        column(records, "k_symbol", |r| r.k_symbol.clone()),
        column(records, "age", |r| r.age),
    ])?)
}

/// Casts the required columns to their working types and appends the
/// calendar columns.
///
/// Integer-typed date columns are zero-padded back to six digits, since CSV
/// type inference drops the leading zero of years 2000–2009. Extra input
/// columns are dropped.
pub fn input_frame(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df)?;
    let (date, calendar) = compact_dates(df)?;

    let mut columns = vec![
        typed_column(df, "account_id", &DataType::Int64)?,
        date,
        typed_column(df, "amount", &DataType::Float64)?,
    ];
    for name in ["type", "operation", "k_symbol"] {
        columns.push(df.column(name)?.cast(&DataType::String)?);
    }
    columns.push(typed_column(df, "age", &DataType::Float64)?);
    columns.extend(calendar_columns(&calendar)?);
    Ok(DataFrame::new(columns)?)
}

/// Casts `name` to `dtype`; a null or unconvertible cell is an error.
fn typed_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column> {
    let source = df.column(name)?;
    let typed = source.cast(dtype)?;
    if typed.null_count() == 0 {
        return Ok(typed);
    }
    let nulls = typed.is_null();
    let row = nulls
        .into_iter()
        .position(|is_null| is_null == Some(true))
        .unwrap_or_default();
    let value = source
        .get(row)
        .ok()
        .and_then(any_to_string)
        .unwrap_or_else(|| "null".to_string());
    Err(PreprocessError::InvalidValue {
        column: name.to_string(),
        row,
        value,
    })
}

/// Padded `date` column plus the parsed date and calendar fields of each row.
fn compact_dates(df: &DataFrame) -> Result<(Column, Vec<(NaiveDate, CalendarFields)>)> {
    let source = df.column("date")?;
    let pad = source.dtype().is_integer();
    let text = source.cast(&DataType::String)?;

    let mut padded = StringChunkedBuilder::new("date".into(), df.height());
    let mut rows = Vec::with_capacity(df.height());
    for (row, value) in text.str()?.into_iter().enumerate() {
        let value = match value {
            Some(v) if pad => format!("{v:0>6}"),
            Some(v) => v.to_string(),
            None => String::new(),
        };
        let dated = parse_compact_date(&value)
            .and_then(|date| calendar_fields(date).map(|fields| (date, fields)))
            .ok_or_else(|| PreprocessError::InvalidDate {
                row,
                value: value.clone(),
            })?;
        padded.append_value(&value);
        rows.push(dated);
    }
    Ok((padded.finish().into_column(), rows))
}
