//! Shared types for transaction sequence preparation.
//!
//! - **field**: semantic fields packed into tensor layouts
//! - **encoding**: encoding codes, tensor spaces, loss and activation kinds
//! - **scales**: frozen dataset-wide scale parameters
//! - **vocabulary**: first-seen categorical vocabularies
//! - **options**: preprocessing configuration

pub mod encoding;
pub mod error;
pub mod field;
pub mod options;
pub mod scales;
pub mod vocabulary;

pub use encoding::{Activation, EncodingCode, LossKind, OneHotKind, TensorSpace};
pub use error::{ModelError, Result};
pub use field::Field;
pub use options::{DEFAULT_CREDIT_LABEL, OrderingMode, PreprocessOptions};
pub use scales::ScaleParameters;
pub use vocabulary::{
    CategoricalField, CategoricalVocabulary, MISSING_CATEGORY, MISSING_PREFIX, Vocabularies,
    VocabularyMap, category_or_sentinel,
};
