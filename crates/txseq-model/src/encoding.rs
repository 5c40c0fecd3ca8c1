//! Encoding codes, tensor spaces and loss/activation kinds.
//!
//! Codes are written in their short string form in configuration files and
//! exported layouts (`cl`, `cl-i`, `raw`, `rbf`, `dist_cont`, `oh_*`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Category set a one-hot code indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OneHotKind {
    Tcode,
    Type,
    Operation,
    Symbol,
    Day,
    Month,
    Dtme,
    Dow,
}

/// Representation of a field inside one tensor space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EncodingCode {
    /// Two-dimensional sine/cosine clock encoding.
    Clock,
    /// Clock integer: `[1, 2, ..., n]` becomes `[1, 2, ..., n-1, 0]`.
    ClockInteger,
    /// Unencoded scalar.
    Raw,
    /// Radial-basis expansion.
    Rbf,
    /// Location and spread of a continuous distribution.
    DistCont,
    /// Indicator vector over a category set.
    OneHot(OneHotKind),
}

impl EncodingCode {
    pub const ALL: [EncodingCode; 13] = [
        EncodingCode::Clock,
        EncodingCode::ClockInteger,
        EncodingCode::Raw,
        EncodingCode::Rbf,
        EncodingCode::DistCont,
        EncodingCode::OneHot(OneHotKind::Tcode),
        EncodingCode::OneHot(OneHotKind::Type),
        EncodingCode::OneHot(OneHotKind::Operation),
        EncodingCode::OneHot(OneHotKind::Symbol),
        EncodingCode::OneHot(OneHotKind::Day),
        EncodingCode::OneHot(OneHotKind::Month),
        EncodingCode::OneHot(OneHotKind::Dtme),
        EncodingCode::OneHot(OneHotKind::Dow),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingCode::Clock => "cl",
            EncodingCode::ClockInteger => "cl-i",
            EncodingCode::Raw => "raw",
            EncodingCode::Rbf => "rbf",
            EncodingCode::DistCont => "dist_cont",
            EncodingCode::OneHot(OneHotKind::Tcode) => "oh_tcode",
            EncodingCode::OneHot(OneHotKind::Type) => "oh_type",
            EncodingCode::OneHot(OneHotKind::Operation) => "oh_operation",
            EncodingCode::OneHot(OneHotKind::Symbol) => "oh_symbol",
            EncodingCode::OneHot(OneHotKind::Day) => "oh_day",
            EncodingCode::OneHot(OneHotKind::Month) => "oh_month",
            EncodingCode::OneHot(OneHotKind::Dtme) => "oh_dtme",
            EncodingCode::OneHot(OneHotKind::Dow) => "oh_dow",
        }
    }

    pub fn is_one_hot(&self) -> bool {
        matches!(self, EncodingCode::OneHot(_))
    }

    /// One-hot code over the period of a calendar field.
    pub fn calendar_one_hot(field: crate::Field) -> Option<Self> {
        use crate::Field;
        let kind = match field {
            Field::Day => OneHotKind::Day,
            Field::Dtme => OneHotKind::Dtme,
            Field::Dow => OneHotKind::Dow,
            Field::Month => OneHotKind::Month,
            _ => return None,
        };
        Some(EncodingCode::OneHot(kind))
    }
}

impl fmt::Display for EncodingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EncodingCode::ALL
            .into_iter()
            .find(|code| code.as_str() == trimmed)
            .ok_or_else(|| ModelError::UnknownEncodingCode(s.to_string()))
    }
}

impl Serialize for EncodingCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EncodingCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One of the three flat vectors a record is packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorSpace {
    /// Model input.
    Input,
    /// Training target.
    Target,
    /// Network output head.
    Network,
}

impl TensorSpace {
    pub const ALL: [TensorSpace; 3] = [
        TensorSpace::Input,
        TensorSpace::Target,
        TensorSpace::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TensorSpace::Input => "input",
            TensorSpace::Target => "target",
            TensorSpace::Network => "network",
        }
    }

    /// Suffix used by exported layout keys (`FIELD_DIMS_IN`, ...).
    pub fn key_suffix(&self) -> &'static str {
        match self {
            TensorSpace::Input => "IN",
            TensorSpace::Target => "TAR",
            TensorSpace::Network => "NET",
        }
    }
}

impl fmt::Display for TensorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TensorSpace {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "input" | "in" | "inp" => Ok(TensorSpace::Input),
            "target" | "tar" => Ok(TensorSpace::Target),
            "network" | "net" => Ok(TensorSpace::Network),
            _ => Err(ModelError::UnknownTensorSpace(s.to_string())),
        }
    }
}

/// Training loss attached to a network-output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossKind {
    /// Sparse categorical cross-entropy over a one-hot head.
    #[serde(rename = "scce")]
    CategoricalCrossEntropy,
    /// Negative log-likelihood of a continuous distribution.
    #[serde(rename = "pdf")]
    DistributionNll,
    /// Squared error.
    #[serde(rename = "mse")]
    SquaredError,
}

impl LossKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LossKind::CategoricalCrossEntropy => "scce",
            LossKind::DistributionNll => "pdf",
            LossKind::SquaredError => "mse",
        }
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation applied to part of a network-output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Keeps the spread parameter of a distribution head non-negative.
    Relu,
}

impl Activation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
