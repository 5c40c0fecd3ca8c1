use thiserror::Error;
use txseq_model::{EncodingCode, Field, TensorSpace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("field {field} has no {space} encoding")]
    MissingEncoding { field: Field, space: TensorSpace },
    #[error("no width registered for encoding code {code}")]
    UnregisteredWidth { code: EncodingCode },
    #[error("unknown scenario '{id}' (known: {known})")]
    UnknownScenario { id: String, known: String },
    #[error("unknown layout preset '{name}' (known: {known})")]
    UnknownPreset { name: String, known: String },
    #[error("encoding {code} of field {field} cannot be a network output")]
    UnsupportedNetEncoding { field: Field, code: EncodingCode },
    #[error("field {field} is encoded as {left} and as {right}")]
    ConflictingEncoding {
        field: Field,
        left: EncodingCode,
        right: EncodingCode,
    },
    #[error("cannot override field {field}: the base encoding does not declare it")]
    InvalidOverride { field: Field },
    #[error("field order is empty")]
    EmptyOrder,
    #[error("field {field} appears more than once in the field order")]
    DuplicateField { field: Field },
    #[error("width of encoding code {code} must be positive")]
    ZeroWidth { code: EncodingCode },
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use txseq_model::OneHotKind;

    #[test]
    fn messages_name_the_field_and_codes() {
        let err = LayoutError::ConflictingEncoding {
            field: Field::TdSc,
            left: EncodingCode::DistCont,
            right: EncodingCode::Raw,
        };
        assert_eq!(err.to_string(), "field td_sc is encoded as dist_cont and as raw");

        let err = LayoutError::MissingEncoding {
            field: Field::Day,
            space: TensorSpace::Target,
        };
        assert_eq!(err.to_string(), "field day has no target encoding");

        let err = LayoutError::ZeroWidth {
            code: EncodingCode::OneHot(OneHotKind::Tcode),
        };
        assert_eq!(err.to_string(), "width of encoding code oh_tcode must be positive");
    }
}
