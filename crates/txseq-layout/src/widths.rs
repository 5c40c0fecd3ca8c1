//! Encoding code widths.

use std::collections::BTreeMap;

use txseq_model::{EncodingCode, OneHotKind};

use crate::error::{LayoutError, Result};

/// Default number of transaction-code classes.
pub const DEFAULT_TCODE_CLASSES: usize = 16;

/// Width of every registered encoding code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthTable {
    widths: BTreeMap<EncodingCode, usize>,
}

impl Default for WidthTable {
    fn default() -> Self {
        let widths = EncodingCode::ALL
            .into_iter()
            .map(|code| (code, default_width(code)))
            .collect();
        Self { widths }
    }
}

fn default_width(code: EncodingCode) -> usize {
    match code {
        EncodingCode::ClockInteger | EncodingCode::Raw => 1,
        EncodingCode::Clock | EncodingCode::DistCont => 2,
        EncodingCode::Rbf => 3,
        EncodingCode::OneHot(kind) => match kind {
            OneHotKind::Tcode => DEFAULT_TCODE_CLASSES,
            OneHotKind::Type => 2,
            OneHotKind::Operation => 6,
            OneHotKind::Symbol => 9,
            OneHotKind::Day | OneHotKind::Dtme => 31,
            OneHotKind::Month => 12,
            OneHotKind::Dow => 7,
        },
    }
}

impl WidthTable {
    /// A table with nothing registered.
    pub fn empty() -> Self {
        Self {
            widths: BTreeMap::new(),
        }
    }

    /// Registers or replaces the width of `code`.
    pub fn with_width(mut self, code: EncodingCode, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(LayoutError::ZeroWidth { code });
        }
        self.widths.insert(code, width);
        Ok(self)
    }

    /// Sets the `oh_tcode` width to the number of transaction codes.
    pub fn with_tcode_classes(self, classes: usize) -> Result<Self> {
        self.with_width(EncodingCode::OneHot(OneHotKind::Tcode), classes)
    }

    pub fn width(&self, code: EncodingCode) -> Result<usize> {
        self.widths
            .get(&code)
            .copied()
            .ok_or(LayoutError::UnregisteredWidth { code })
    }

    pub fn tcode_classes(&self) -> Option<usize> {
        self.widths
            .get(&EncodingCode::OneHot(OneHotKind::Tcode))
            .copied()
    }
}
