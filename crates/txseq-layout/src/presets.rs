//! Named field orders with their encoding maps.

use std::fmt;

use txseq_model::{EncodingCode, Field, OneHotKind, TensorSpace};

use crate::error::{LayoutError, Result};
use crate::layout::{FieldInfo, build_field_info};
use crate::scheme::EncodingScheme;
use crate::strategy::EncodingStrategy;
use crate::widths::WidthTable;

/// Field order of the full scenario layout.
pub const FULL_ORDER: [Field; 7] = [
    Field::TcodeNum,
    Field::Dow,
    Field::Month,
    Field::Day,
    Field::Dtme,
    Field::TdSc,
    Field::LogAmountSc,
];

/// A field order plus input, target and network maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPreset {
    /// Transaction code only.
    Tcode,
    /// The three categorical parts of the transaction code.
    CatField,
    /// Transaction code with day delta and amount.
    Type2,
    /// Every scenario field under a chosen scenario.
    Full(EncodingStrategy),
}

impl Default for LayoutPreset {
    fn default() -> Self {
        LayoutPreset::Full(EncodingStrategy::default())
    }
}

/// Rows of `(field, input, target, network)` codes.
type PresetRow = (Field, EncodingCode, EncodingCode, EncodingCode);

const OH_TCODE: EncodingCode = EncodingCode::OneHot(OneHotKind::Tcode);

const TCODE_ROWS: &[PresetRow] = &[(Field::TcodeNum, OH_TCODE, EncodingCode::Raw, OH_TCODE)];

const CATFIELD_ROWS: &[PresetRow] = &[
    (
        Field::KSymbolNum,
        EncodingCode::OneHot(OneHotKind::Symbol),
        EncodingCode::Raw,
        EncodingCode::OneHot(OneHotKind::Symbol),
    ),
    (
        Field::OperationNum,
        EncodingCode::OneHot(OneHotKind::Operation),
        EncodingCode::Raw,
        EncodingCode::OneHot(OneHotKind::Operation),
    ),
    (
        Field::TypeNum,
        EncodingCode::OneHot(OneHotKind::Type),
        EncodingCode::Raw,
        EncodingCode::OneHot(OneHotKind::Type),
    ),
];

const TYPE2_ROWS: &[PresetRow] = &[
    (Field::TcodeNum, OH_TCODE, EncodingCode::Raw, OH_TCODE),
    (
        Field::TdSc,
        EncodingCode::Raw,
        EncodingCode::Raw,
        EncodingCode::DistCont,
    ),
    (
        Field::LogAmountSc,
        EncodingCode::Raw,
        EncodingCode::Raw,
        EncodingCode::DistCont,
    ),
];

impl LayoutPreset {
    pub const NAMES: [&'static str; 4] = ["tcode", "catfield", "type2", "full"];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutPreset::Tcode => "tcode",
            LayoutPreset::CatField => "catfield",
            LayoutPreset::Type2 => "type2",
            LayoutPreset::Full(_) => "full",
        }
    }

    /// Resolves a preset name; `full` uses `strategy`.
    pub fn from_name(name: &str, strategy: EncodingStrategy) -> Result<Self> {
        match name.trim() {
            "tcode" => Ok(LayoutPreset::Tcode),
            "catfield" => Ok(LayoutPreset::CatField),
            "type2" => Ok(LayoutPreset::Type2),
            "full" => Ok(LayoutPreset::Full(strategy)),
            _ => Err(LayoutError::UnknownPreset {
                name: name.to_string(),
                known: Self::NAMES.join(", "),
            }),
        }
    }

    fn rows(&self) -> Option<&'static [PresetRow]> {
        match self {
            LayoutPreset::Tcode => Some(TCODE_ROWS),
            LayoutPreset::CatField => Some(CATFIELD_ROWS),
            LayoutPreset::Type2 => Some(TYPE2_ROWS),
            LayoutPreset::Full(_) => None,
        }
    }

    pub fn order(&self) -> Vec<Field> {
        match self.rows() {
            Some(rows) => rows.iter().map(|row| row.0).collect(),
            None => FULL_ORDER.to_vec(),
        }
    }

    /// Encoding map of one tensor space.
    pub fn encoding(&self, space: TensorSpace) -> EncodingScheme {
        match (self, self.rows()) {
            (LayoutPreset::Full(strategy), _) => strategy.encoding(space),
            (_, Some(rows)) => rows
                .iter()
                .map(|&(field, input, target, net)| {
                    let code = match space {
                        TensorSpace::Input => input,
                        TensorSpace::Target => target,
                        TensorSpace::Network => net,
                    };
                    (field, code)
                })
                .collect(),
            (_, None) => EncodingScheme::new(),
        }
    }

    /// Builds the layout of this preset.
    pub fn build(&self, widths: &WidthTable) -> Result<FieldInfo> {
        build_field_info(
            &self.order(),
            &self.encoding(TensorSpace::Input),
            &self.encoding(TensorSpace::Target),
            &self.encoding(TensorSpace::Network),
            widths,
        )
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutPreset::Full(strategy) => write!(f, "full ({strategy})"),
            other => f.write_str(other.name()),
        }
    }
}
