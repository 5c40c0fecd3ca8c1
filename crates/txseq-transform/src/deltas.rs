//! Per-account day deltas and explicit chronological ordering.

use polars::prelude::*;

use crate::error::Result;

/// `td`: days since the previous row of the same account, in row order.
///
/// The first row of every account gets 0. Rows are taken exactly as given:
/// when an account's rows are not chronological the delta can be negative.
/// Use [`sort_chronologically`] first when the input order is not trusted.
pub fn day_delta_expr() -> Expr {
    let day = col("datetime").cast(DataType::Int64);
    (day.clone() - day.shift(lit(1)))
        .over([col("account_id")])
        .fill_null(lit(0i64))
        .alias("td")
}

/// Stable sort by `(account_id, datetime)`.
///
/// Rows with the same account and date keep their relative input order.
pub fn sort_chronologically(df: &DataFrame) -> Result<DataFrame> {
    let options = SortMultipleOptions::default().with_maintain_order(true);
    Ok(df.sort(["account_id", "datetime"], options)?)
}

/// Number of distinct accounts.
pub fn account_count(df: &DataFrame) -> Result<usize> {
    Ok(df.column("account_id")?.n_unique()?)
}
