//! Loss and activation derivation for network-output encodings.

use std::collections::BTreeMap;

use txseq_model::{Activation, EncodingCode, Field, LossKind};

use crate::error::{LayoutError, Result};
use crate::scheme::EncodingScheme;

/// Per-field loss kinds and optional activations of a network head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossTable {
    pub losses: BTreeMap<Field, LossKind>,
    pub activations: BTreeMap<Field, Option<Activation>>,
}

/// Loss kind and activation for one network-output code.
pub fn loss_for_code(field: Field, code: EncodingCode) -> Result<(LossKind, Option<Activation>)> {
    match code {
        EncodingCode::OneHot(_) => Ok((LossKind::CategoricalCrossEntropy, None)),
        EncodingCode::DistCont => Ok((LossKind::DistributionNll, Some(Activation::Relu))),
        EncodingCode::Raw | EncodingCode::Clock => Ok((LossKind::SquaredError, None)),
        EncodingCode::ClockInteger | EncodingCode::Rbf => {
            Err(LayoutError::UnsupportedNetEncoding { field, code })
        }
    }
}

/// Derives the loss table of every field in `net`.
pub fn loss_and_activation(net: &EncodingScheme) -> Result<LossTable> {
    let mut table = LossTable::default();
    for (field, code) in net.iter() {
        let (loss, activation) = loss_for_code(field, code)?;
        table.losses.insert(field, loss);
        table.activations.insert(field, activation);
    }
    Ok(table)
}
