//! Dataset-wide scale parameters.
//!
//! Scales are computed once by the preprocessor and are frozen afterwards:
//! every later scaling or unscaling step must go through the same value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Standard deviations used to scale numeric columns, plus the dataset's
/// earliest transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParameters {
    /// Standard deviation of `log10(amount + 1)`.
    pub log_amount_scale: f64,
    /// Standard deviation of the per-account day deltas.
    pub td_scale: f64,
    /// Standard deviation of the account holder's age.
    pub attr_scale: f64,
    /// Earliest transaction date in the dataset.
    pub start_date: NaiveDate,
}

impl ScaleParameters {
    pub fn scale_age(&self, age: f64) -> f64 {
        age / self.attr_scale
    }

    pub fn unscale_age(&self, age_sc: f64) -> f64 {
        age_sc * self.attr_scale
    }

    pub fn scale_log_amount(&self, log_amount: f64) -> f64 {
        log_amount / self.log_amount_scale
    }

    pub fn unscale_log_amount(&self, log_amount_sc: f64) -> f64 {
        log_amount_sc * self.log_amount_scale
    }

    pub fn scale_td(&self, td: f64) -> f64 {
        td / self.td_scale
    }

    pub fn unscale_td(&self, td_sc: f64) -> f64 {
        td_sc * self.td_scale
    }

    /// Recovers the absolute amount from a scaled log-amount.
    ///
    /// Inverse of `log10(amount + 1) / log_amount_scale`.
    pub fn amount_from_log_amount_sc(&self, log_amount_sc: f64) -> f64 {
        10f64.powf(self.unscale_log_amount(log_amount_sc)) - 1.0
    }
}
