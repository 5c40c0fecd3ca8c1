//! Encoding strategies and field layouts.
//!
//! - **scheme**: field-to-code maps with explicit override and merge
//! - **strategy**: the named encoding scenarios and scenario selection
//! - **loss**: loss kinds and activations of network-output codes
//! - **widths**: the code-to-width table
//! - **layout**: the generic layout builder and its exportable config
//! - **presets**: named field orders built with the generic builder
//! - **render**: plain-text layout tables

pub mod error;
pub mod layout;
pub mod loss;
pub mod presets;
pub mod render;
pub mod scheme;
pub mod strategy;
pub mod widths;

pub use error::{LayoutError, Result};
pub use layout::{FieldInfo, FieldLayout, FieldSpan, LayoutConfig, build_field_info};
pub use loss::{LossTable, loss_and_activation, loss_for_code};
pub use presets::{FULL_ORDER, LayoutPreset};
pub use render::render_layout;
pub use scheme::EncodingScheme;
pub use strategy::{EncodingStrategy, SCENARIO_FIELDS, select_strategy};
pub use widths::{DEFAULT_TCODE_CLASSES, WidthTable};
