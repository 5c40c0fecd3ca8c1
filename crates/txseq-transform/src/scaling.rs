//! Standard-deviation scales.

use polars::prelude::*;
use txseq_model::ScaleParameters;

use crate::calendar::date_from_epoch_days;
use crate::error::{PreprocessError, Result};

/// Computes the dataset scales in one pass over `df`.
///
/// Standard deviations use one delta degree of freedom. A column with fewer
/// than two rows, zero spread or a non-finite spread cannot be scaled.
pub fn compute_scales(df: &DataFrame) -> Result<ScaleParameters> {
    let stats = df
        .clone()
        .lazy()
        .select([
            col("log_amount").std(1).alias("log_amount"),
            col("td").cast(DataType::Float64).std(1).alias("td"),
            col("age").std(1).alias("age"),
            col("datetime")
                .cast(DataType::Int32)
                .min()
                .alias("start_date"),
        ])
        .collect()?;

    let start_date = stats
        .column("start_date")?
        .i32()?
        .get(0)
        .and_then(date_from_epoch_days)
        .ok_or(PreprocessError::EmptyInput)?;

    Ok(ScaleParameters {
        log_amount_scale: checked_scale(&stats, "log_amount")?,
        td_scale: checked_scale(&stats, "td")?,
        attr_scale: checked_scale(&stats, "age")?,
        start_date,
    })
}

fn checked_scale(stats: &DataFrame, column: &str) -> Result<f64> {
    let scale = stats.column(column)?.f64()?.get(0).unwrap_or(f64::NAN);
    if !scale.is_finite() || scale == 0.0 {
        return Err(PreprocessError::DegenerateScale {
            column: column.to_string(),
            value: scale,
        });
    }
    Ok(scale)
}

/// `age_sc`, `log_amount_sc` and `td_sc`.
pub fn scaled_columns(scales: &ScaleParameters) -> [Expr; 3] {
    [
        (col("age") / lit(scales.attr_scale)).alias("age_sc"),
        (col("log_amount") / lit(scales.log_amount_scale)).alias("log_amount_sc"),
        (col("td").cast(DataType::Float64) / lit(scales.td_scale)).alias("td_sc"),
    ]
}
