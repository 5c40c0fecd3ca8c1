//! Semantic fields that can be packed into a tensor layout.
//!
//! Field names are the column names the preprocessor writes into the
//! enriched table, so a layout can be resolved against a frame by name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// A derived column that participates in tensor layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Day of month, folded so day 31 becomes 0.
    Day,
    /// Days till month end.
    Dtme,
    /// Day of week, Monday = 0.
    Dow,
    /// Month, folded so December becomes 0.
    Month,
    /// Scaled days since the previous transaction of the account.
    TdSc,
    /// Scaled `log10(amount + 1)`.
    LogAmountSc,
    /// Integer code of the compound transaction code.
    TcodeNum,
    TypeNum,
    OperationNum,
    KSymbolNum,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Day,
        Field::Dtme,
        Field::Dow,
        Field::Month,
        Field::TdSc,
        Field::LogAmountSc,
        Field::TcodeNum,
        Field::TypeNum,
        Field::OperationNum,
        Field::KSymbolNum,
    ];

    /// Calendar fields, in the order the encoding tables list them.
    pub const CALENDAR: [Field; 4] = [Field::Day, Field::Dtme, Field::Dow, Field::Month];

    /// Column name in the enriched table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Dtme => "dtme",
            Field::Dow => "dow",
            Field::Month => "month",
            Field::TdSc => "td_sc",
            Field::LogAmountSc => "log_amount_sc",
            Field::TcodeNum => "tcode_num",
            Field::TypeNum => "type_num",
            Field::OperationNum => "operation_num",
            Field::KSymbolNum => "k_symbol_num",
        }
    }

    /// Period of a calendar field (number of distinct folded values).
    pub fn clock_period(&self) -> Option<usize> {
        match self {
            Field::Day | Field::Dtme => Some(31),
            Field::Dow => Some(7),
            Field::Month => Some(12),
            _ => None,
        }
    }

    /// Returns true for integer-coded categorical fields.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            Field::TcodeNum | Field::TypeNum | Field::OperationNum | Field::KSymbolNum
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == trimmed)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
