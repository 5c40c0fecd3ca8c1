//! Pipeline configuration files.
//!
//! A configuration file is JSON; every key is optional:
//!
//! ```json
//! {
//!   "scenario": "banksformer_v2",
//!   "preset": "full",
//!   "tcode_classes": 24,
//!   "preprocess": { "credit_label": "CREDIT", "ordering": "sort_by_account_date" },
//!   "overrides": { "network": { "td_sc": "raw" } },
//!   "extend": {
//!     "fields": ["k_symbol_num"],
//!     "input": { "k_symbol_num": "oh_symbol" },
//!     "target": { "k_symbol_num": "raw" },
//!     "network": { "k_symbol_num": "oh_symbol" }
//!   }
//! }
//! ```
//!
//! `extend` appends fields to the preset's order and merges their codes into
//! the preset's maps; a field it redeclares must keep the preset's code.
//! `overrides` then replace codes of declared fields. Command-line flags take
//! precedence over file values.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use txseq_layout::{
    EncodingScheme, EncodingStrategy, FieldInfo, LayoutPreset, WidthTable, build_field_info,
};
use txseq_model::{EncodingCode, Field, PreprocessOptions, TensorSpace};

/// Default layout preset name.
pub const DEFAULT_PRESET: &str = "full";

/// Explicit per-space code overrides applied on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOverrides {
    pub input: BTreeMap<Field, EncodingCode>,
    pub target: BTreeMap<Field, EncodingCode>,
    pub network: BTreeMap<Field, EncodingCode>,
}

impl EncodingOverrides {
    pub fn for_space(&self, space: TensorSpace) -> &BTreeMap<Field, EncodingCode> {
        match space {
            TensorSpace::Input => &self.input,
            TensorSpace::Target => &self.target,
            TensorSpace::Network => &self.network,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.target.is_empty() && self.network.is_empty()
    }
}

/// Fields appended to a preset, with their codes per space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldExtension {
    pub fields: Vec<Field>,
    pub input: EncodingScheme,
    pub target: EncodingScheme,
    pub network: EncodingScheme,
}

impl FieldExtension {
    pub fn for_space(&self, space: TensorSpace) -> &EncodingScheme {
        match space {
            TensorSpace::Input => &self.input,
            TensorSpace::Target => &self.target,
            TensorSpace::Network => &self.network,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && TensorSpace::ALL.iter().all(|s| self.for_space(*s).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Scenario of the full preset.
    pub scenario: EncodingStrategy,
    pub preset: String,
    /// Width of `oh_tcode`; the default width table applies when unset.
    pub tcode_classes: Option<usize>,
    pub preprocess: PreprocessOptions,
    pub overrides: EncodingOverrides,
    pub extend: FieldExtension,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scenario: EncodingStrategy::default(),
            preset: DEFAULT_PRESET.to_string(),
            tcode_classes: None,
            preprocess: PreprocessOptions::default(),
            overrides: EncodingOverrides::default(),
            extend: FieldExtension::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn layout_preset(&self) -> Result<LayoutPreset> {
        LayoutPreset::from_name(&self.preset, self.scenario)
            .with_context(|| format!("resolve preset '{}'", self.preset))
    }

    pub fn width_table(&self) -> Result<WidthTable> {
        let table = WidthTable::default();
        match self.tcode_classes {
            Some(classes) => table
                .with_tcode_classes(classes)
                .context("set transaction-code classes"),
            None => Ok(table),
        }
    }

    /// The preset's field order followed by the extension fields it lacks.
    pub fn order(&self, preset: &LayoutPreset) -> Vec<Field> {
        let mut order = preset.order();
        for &field in &self.extend.fields {
            if !order.contains(&field) {
                order.push(field);
            }
        }
        order
    }

    /// Encoding map of one space: the preset's map merged with the extension,
    /// then overrides applied.
    pub fn encoding(&self, preset: &LayoutPreset, space: TensorSpace) -> Result<EncodingScheme> {
        let mut scheme = preset
            .encoding(space)
            .merge(self.extend.for_space(space))
            .with_context(|| format!("extend {space} encoding of {preset}"))?;
        for (&field, &code) in self.overrides.for_space(space) {
            scheme = scheme
                .with_override(field, code)
                .with_context(|| format!("apply {space} override {field}={code}"))?;
        }
        Ok(scheme)
    }

    /// Builds the configured field layout.
    pub fn build_layout(&self) -> Result<FieldInfo> {
        let preset = self.layout_preset()?;
        let widths = self.width_table()?;
        let info = build_field_info(
            &self.order(&preset),
            &self.encoding(&preset, TensorSpace::Input)?,
            &self.encoding(&preset, TensorSpace::Target)?,
            &self.encoding(&preset, TensorSpace::Network)?,
            &widths,
        )
        .with_context(|| format!("build {preset} layout"))?;
        Ok(info)
    }
}
