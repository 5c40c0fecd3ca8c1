use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown encoding code: {0}")]
    UnknownEncodingCode(String),
    #[error("unknown tensor space: {0}")]
    UnknownTensorSpace(String),
    #[error("unknown ordering mode: {0}")]
    UnknownOrderingMode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
