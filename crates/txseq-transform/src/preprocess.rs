//! Single-pass transaction preprocessing.
//!
//! Turns a raw transaction table into an enriched table carrying calendar
//! fields, per-account day deltas, signed amounts, compound transaction
//! codes, scaled numeric columns and integer category codes. Scales and
//! vocabularies are computed once over the whole input and returned next to
//! the table; nothing is cached between passes.
//!
//! The pass is all-or-nothing: the first bad date, unusable value or
//! degenerate scale aborts it.

use std::borrow::Cow;

use polars::prelude::*;
use tracing::{debug, info};
use txseq_model::{
    CategoricalField, MISSING_CATEGORY, OrderingMode, PreprocessOptions, ScaleParameters,
    Vocabularies, category_or_sentinel,
};

use crate::deltas::{account_count, day_delta_expr, sort_chronologically};
use crate::error::{PreprocessError, Result};
use crate::records::{TransactionRecord, input_frame, transactions_frame};
use crate::scaling::{compute_scales, scaled_columns};

/// Separator between the parts of a compound transaction code.
pub const TCODE_SEP: &str = "__";

/// Columns of the enriched table, in order: the seven input columns
/// (categories with the missing-value sentinel applied) followed by every
/// derived column.
pub const ENRICHED_COLUMNS: [&str; 24] = [
    "account_id",
    "date",
    "amount",
    "type",
    "operation",
    "k_symbol",
    "age",
    "datetime",
    "month",
    "day",
    "dow",
    "year",
    "td",
    "dtme",
    "raw_amount",
    "tcode",
    "age_sc",
    "log_amount",
    "log_amount_sc",
    "td_sc",
    "type_num",
    "operation_num",
    "k_symbol_num",
    "tcode_num",
];

/// Output of [`preprocess`]: the enriched DataFrame with scales and vocabularies.
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub frame: DataFrame,
    pub scales: ScaleParameters,
    pub vocabularies: Vocabularies,
}

/// Builds the compound transaction code.
///
/// # Examples
///
/// ```
/// use txseq_transform::compound_tcode;
///
/// assert_eq!(compound_tcode("CREDIT", "X", "Y"), "CREDIT__X__Y");
/// ```
pub fn compound_tcode(type_: &str, operation: &str, k_symbol: &str) -> String {
    [type_, operation, k_symbol].join(TCODE_SEP)
}

/// Preprocesses raw transaction rows.
pub fn preprocess_records(
    records: &[TransactionRecord],
    options: &PreprocessOptions,
) -> Result<PreprocessOutput> {
    preprocess(&transactions_frame(records)?, options)
}

/// Preprocesses a raw transaction table.
pub fn preprocess(df: &DataFrame, options: &PreprocessOptions) -> Result<PreprocessOutput> {
    if df.height() == 0 {
        return Err(PreprocessError::EmptyInput);
    }

    let derived = input_frame(df)?
        .lazy()
        .with_columns(
            [CategoricalField::Type, CategoricalField::Operation, CategoricalField::KSymbol]
                .map(|field| category_expr(field.column())),
        )
        .with_columns([
            log_amount_expr(),
            raw_amount_expr(&options.credit_label),
        ])
        .collect()?;
    check_log_amounts(&derived)?;

    let derived = match options.ordering {
        OrderingMode::AsGiven => derived,
        OrderingMode::SortByAccountDate => sort_chronologically(&derived)?,
    };
    let mut derived = derived.lazy().with_column(day_delta_expr()).collect()?;

    let scales = compute_scales(&derived)?;
    let vocabularies = encode_categories(&mut derived)?;
    let accounts = account_count(&derived)?;

    let frame = derived
        .lazy()
        .with_columns(scaled_columns(&scales))
        .with_column(col("datetime").cast(DataType::String))
        .select(ENRICHED_COLUMNS.map(col))
        .collect()?;

    info!(
        rows = frame.height(),
        accounts,
        log_amount_scale = scales.log_amount_scale,
        td_scale = scales.td_scale,
        attr_scale = scales.attr_scale,
        start_date = %scales.start_date,
        "preprocessed transaction log"
    );
    for field in CategoricalField::ALL {
        debug!(
            field = field.column(),
            categories = vocabularies.get(field).len(),
            "built vocabulary"
        );
    }

    Ok(PreprocessOutput {
        frame,
        scales,
        vocabularies,
    })
}

/// Replaces blank or null categories with the missing-value sentinel.
fn category_expr(name: &str) -> Expr {
    col(name)
        .map(
            |c: Column| {
                let ca = c.str()?;
                let out: StringChunked =
                    ca.apply_values(|s| Cow::Owned(category_or_sentinel(Some(s))));
                Ok(out.into_column())
            },
            |_, field| Ok(Field::new(field.name().clone(), DataType::String)),
        )
        .fill_null(lit(MISSING_CATEGORY))
        .alias(name)
}

/// `log10(amount + 1)`
fn log_amount_expr() -> Expr {
    (col("amount") + lit(1.0))
        .map(
            |c: Column| Ok(c.f64()?.apply_values(f64::log10).into_column()),
            |_, field| Ok(Field::new(field.name().clone(), DataType::Float64)),
        )
        .alias("log_amount")
}

/// Signed amount: positive for credits, negative otherwise.
fn raw_amount_expr(credit_label: &str) -> Expr {
    when(col("type").eq(lit(credit_label)))
        .then(col("amount"))
        .otherwise(col("amount") * lit(-1.0))
        .alias("raw_amount")
}

/// Rejects amounts whose log is not finite (amount ≤ -1).
fn check_log_amounts(df: &DataFrame) -> Result<()> {
    let log_amount = df.column("log_amount")?.f64()?;
    let bad_row = log_amount
        .into_iter()
        .position(|value| !value.is_some_and(f64::is_finite));
    match bad_row {
        Some(row) => Err(PreprocessError::InvalidValue {
            column: "amount".to_string(),
            row,
            value: df
                .column("amount")?
                .f64()?
                .get(row)
                .map_or_else(|| "null".to_string(), |amount| amount.to_string()),
        }),
        None => Ok(()),
    }
}

/// Adds `tcode` and the `*_num` columns, interning categories in row order.
fn encode_categories(df: &mut DataFrame) -> Result<Vocabularies> {
    let mut vocabularies = Vocabularies::default();
    let columns = {
        let type_ = df.column("type")?.str()?;
        let operation = df.column("operation")?.str()?;
        let k_symbol = df.column("k_symbol")?.str()?;

        let mut tcode = StringChunkedBuilder::new("tcode".into(), df.height());
        let mut ids: [Vec<u32>; 4] = Default::default();
        for ((t, o), k) in type_.into_iter().zip(operation).zip(k_symbol) {
            let parts = [t, o, k].map(|part| part.unwrap_or(MISSING_CATEGORY));
            let code = compound_tcode(parts[0], parts[1], parts[2]);
            for (field, category) in CategoricalField::ALL.into_iter().zip(parts) {
                ids[field as usize].push(vocabularies.get_mut(field).intern(category));
            }
            ids[CategoricalField::Tcode as usize]
                .push(vocabularies.get_mut(CategoricalField::Tcode).intern(&code));
            tcode.append_value(&code);
        }

        let mut columns = vec![tcode.finish().into_series()];
        for (field, ids) in CategoricalField::ALL.into_iter().zip(ids) {
            columns.push(Series::new(format!("{}_num", field.column()).into(), ids));
        }
        columns
    };
    for column in columns {
        df.with_column(column)?;
    }
    Ok(vocabularies)
}
