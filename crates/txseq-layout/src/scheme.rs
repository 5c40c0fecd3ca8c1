//! Field-to-code encoding maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use txseq_model::{EncodingCode, Field};

use crate::error::{LayoutError, Result};

/// Encoding code of each field within one tensor space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingScheme {
    codes: BTreeMap<Field, EncodingCode>,
}

impl EncodingScheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<EncodingCode> {
        self.codes.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.codes.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, EncodingCode)> + '_ {
        self.codes.iter().map(|(field, code)| (*field, *code))
    }

    /// Replaces the code of a field the scheme already declares.
    pub fn with_override(mut self, field: Field, code: EncodingCode) -> Result<Self> {
        match self.codes.get_mut(&field) {
            Some(slot) => {
                *slot = code;
                Ok(self)
            }
            None => Err(LayoutError::InvalidOverride { field }),
        }
    }

    /// Combines two schemes.
    ///
    /// Fields declared by both must agree; use [`EncodingScheme::with_override`]
    /// to change a declared code instead.
    pub fn merge(&self, other: &EncodingScheme) -> Result<Self> {
        let mut codes = self.codes.clone();
        for (field, code) in other.iter() {
            match codes.get(&field) {
                Some(&existing) if existing != code => {
                    return Err(LayoutError::ConflictingEncoding {
                        field,
                        left: existing,
                        right: code,
                    });
                }
                _ => {
                    codes.insert(field, code);
                }
            }
        }
        Ok(Self { codes })
    }
}

impl FromIterator<(Field, EncodingCode)> for EncodingScheme {
    fn from_iter<I: IntoIterator<Item = (Field, EncodingCode)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
