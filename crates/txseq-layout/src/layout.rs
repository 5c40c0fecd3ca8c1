//! Field layouts: packing fields into one flat vector per tensor space.
//!
//! A layout assigns each field a contiguous `[start, start + width)` range.
//! Starts are the exclusive prefix sum of widths in field order, so the
//! ranges tile `[0, total_width)` without gaps or overlap.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;
use txseq_model::{Activation, EncodingCode, Field, LossKind, TensorSpace};

use crate::error::{LayoutError, Result};
use crate::loss::loss_for_code;
use crate::scheme::EncodingScheme;
use crate::widths::WidthTable;

/// Range of one field inside a tensor space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub field: Field,
    pub code: EncodingCode,
    pub start: usize,
    pub width: usize,
}

impl FieldSpan {
    pub fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Ordered field ranges of one tensor space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    space: TensorSpace,
    spans: Vec<FieldSpan>,
}

impl FieldLayout {
    fn build(
        space: TensorSpace,
        order: &[Field],
        scheme: &EncodingScheme,
        widths: &WidthTable,
    ) -> Result<Self> {
        let mut spans = Vec::with_capacity(order.len());
        let mut start = 0;
        for &field in order {
            let code = scheme
                .get(field)
                .ok_or(LayoutError::MissingEncoding { field, space })?;
            let width = widths.width(code)?;
            spans.push(FieldSpan {
                field,
                code,
                start,
                width,
            });
            start += width;
        }
        Ok(Self { space, spans })
    }

    pub fn space(&self) -> TensorSpace {
        self.space
    }

    pub fn spans(&self) -> &[FieldSpan] {
        &self.spans
    }

    pub fn span(&self, field: Field) -> Option<&FieldSpan> {
        self.spans.iter().find(|span| span.field == field)
    }

    pub fn width(&self, field: Field) -> Option<usize> {
        self.span(field).map(|span| span.width)
    }

    pub fn start(&self, field: Field) -> Option<usize> {
        self.span(field).map(|span| span.start)
    }

    pub fn total_width(&self) -> usize {
        self.spans.iter().map(|span| span.width).sum()
    }

    /// Field to width map.
    pub fn dims(&self) -> BTreeMap<Field, usize> {
        self.spans.iter().map(|s| (s.field, s.width)).collect()
    }

    /// Field to start map.
    pub fn starts(&self) -> BTreeMap<Field, usize> {
        self.spans.iter().map(|s| (s.field, s.start)).collect()
    }
}

/// Complete layout of a field order under three encoding maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    order: Vec<Field>,
    categorical: Vec<Field>,
    input: EncodingScheme,
    target: EncodingScheme,
    net: EncodingScheme,
    input_layout: FieldLayout,
    target_layout: FieldLayout,
    net_layout: FieldLayout,
    loss_types: BTreeMap<Field, LossKind>,
    activations: BTreeMap<Field, Option<Activation>>,
}

/// Builds the layout of `order` under the given encoding maps.
///
/// Every field in `order` must be declared by all three maps; codes the
/// maps declare for other fields are ignored.
pub fn build_field_info(
    order: &[Field],
    input: &EncodingScheme,
    target: &EncodingScheme,
    net: &EncodingScheme,
    widths: &WidthTable,
) -> Result<FieldInfo> {
    if order.is_empty() {
        return Err(LayoutError::EmptyOrder);
    }
    let mut seen = BTreeSet::new();
    for &field in order {
        if !seen.insert(field) {
            return Err(LayoutError::DuplicateField { field });
        }
    }

    let input_layout = FieldLayout::build(TensorSpace::Input, order, input, widths)?;
    let target_layout = FieldLayout::build(TensorSpace::Target, order, target, widths)?;
    let net_layout = FieldLayout::build(TensorSpace::Network, order, net, widths)?;

    let mut loss_types = BTreeMap::new();
    let mut activations = BTreeMap::new();
    for span in net_layout.spans() {
        let (loss, activation) = loss_for_code(span.field, span.code)?;
        loss_types.insert(span.field, loss);
        activations.insert(span.field, activation);
    }

    debug!(
        fields = order.len(),
        input_width = input_layout.total_width(),
        target_width = target_layout.total_width(),
        net_width = net_layout.total_width(),
        "built field layout"
    );

    Ok(FieldInfo {
        order: order.to_vec(),
        categorical: order.iter().copied().filter(Field::is_categorical).collect(),
        input: input.clone(),
        target: target.clone(),
        net: net.clone(),
        input_layout,
        target_layout,
        net_layout,
        loss_types,
        activations,
    })
}

impl FieldInfo {
    pub fn order(&self) -> &[Field] {
        &self.order
    }

    pub fn categorical_fields(&self) -> &[Field] {
        &self.categorical
    }

    pub fn encoding(&self, space: TensorSpace) -> &EncodingScheme {
        match space {
            TensorSpace::Input => &self.input,
            TensorSpace::Target => &self.target,
            TensorSpace::Network => &self.net,
        }
    }

    pub fn layout(&self, space: TensorSpace) -> &FieldLayout {
        match space {
            TensorSpace::Input => &self.input_layout,
            TensorSpace::Target => &self.target_layout,
            TensorSpace::Network => &self.net_layout,
        }
    }

    pub fn loss_types(&self) -> &BTreeMap<Field, LossKind> {
        &self.loss_types
    }

    pub fn activations(&self) -> &BTreeMap<Field, Option<Activation>> {
        &self.activations
    }

    pub fn loss_type(&self, field: Field) -> Option<LossKind> {
        self.loss_types.get(&field).copied()
    }

    /// Activation of a field; `None` both for unknown fields and fields
    /// without one.
    pub fn activation(&self, field: Field) -> Option<Activation> {
        self.activations.get(&field).copied().flatten()
    }

    /// Exportable configuration for the model builder.
    pub fn to_config(&self) -> LayoutConfig {
        LayoutConfig {
            order: self.order.clone(),
            field_dims_in: self.input_layout.dims(),
            field_starts_in: self.input_layout.starts(),
            field_dims_tar: self.target_layout.dims(),
            field_starts_tar: self.target_layout.starts(),
            field_dims_net: self.net_layout.dims(),
            field_starts_net: self.net_layout.starts(),
            loss_types: self.loss_types.clone(),
            activations: self.activations.clone(),
        }
    }
}

/// Serializable layout handed to the model builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LayoutConfig {
    pub order: Vec<Field>,
    pub field_dims_in: BTreeMap<Field, usize>,
    pub field_starts_in: BTreeMap<Field, usize>,
    pub field_dims_tar: BTreeMap<Field, usize>,
    pub field_starts_tar: BTreeMap<Field, usize>,
    pub field_dims_net: BTreeMap<Field, usize>,
    pub field_starts_net: BTreeMap<Field, usize>,
    pub loss_types: BTreeMap<Field, LossKind>,
    pub activations: BTreeMap<Field, Option<Activation>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use txseq_model::OneHotKind;

    fn scheme(pairs: &[(Field, EncodingCode)]) -> EncodingScheme {
        pairs.iter().copied().collect()
    }

    #[test]
    fn single_tcode_field() {
        let oh = EncodingCode::OneHot(OneHotKind::Tcode);
        let info = build_field_info(
            &[Field::TcodeNum],
            &scheme(&[(Field::TcodeNum, oh)]),
            &scheme(&[(Field::TcodeNum, EncodingCode::Raw)]),
            &scheme(&[(Field::TcodeNum, oh)]),
            &WidthTable::default(),
        )
        .unwrap();

        let input = info.layout(TensorSpace::Input);
        assert_eq!(input.width(Field::TcodeNum), Some(16));
        assert_eq!(input.start(Field::TcodeNum), Some(0));
        assert_eq!(info.layout(TensorSpace::Target).total_width(), 1);
        assert_eq!(
            info.loss_type(Field::TcodeNum),
            Some(LossKind::CategoricalCrossEntropy)
        );
        assert_eq!(info.activation(Field::TcodeNum), None);
        assert_eq!(info.categorical_fields(), &[Field::TcodeNum]);
    }

    #[test]
    fn starts_are_prefix_sums() {
        let info = build_field_info(
            &[Field::TdSc, Field::Day, Field::LogAmountSc],
            &scheme(&[
                (Field::TdSc, EncodingCode::Raw),
                (Field::Day, EncodingCode::Rbf),
                (Field::LogAmountSc, EncodingCode::Clock),
            ]),
            &scheme(&[
                (Field::TdSc, EncodingCode::Raw),
                (Field::Day, EncodingCode::Raw),
                (Field::LogAmountSc, EncodingCode::Raw),
            ]),
            &scheme(&[
                (Field::TdSc, EncodingCode::DistCont),
                (Field::Day, EncodingCode::OneHot(OneHotKind::Day)),
                (Field::LogAmountSc, EncodingCode::DistCont),
            ]),
            &WidthTable::default(),
        )
        .unwrap();

        let input = info.layout(TensorSpace::Input);
        assert_eq!(input.starts()[&Field::Day], 1);
        assert_eq!(input.starts()[&Field::LogAmountSc], 4);
        assert_eq!(input.total_width(), 6);
        let net = info.layout(TensorSpace::Network);
        assert_eq!(net.start(Field::LogAmountSc), Some(33));
        assert_eq!(net.total_width(), 35);
        assert!(info.categorical_fields().is_empty());
    }

    #[test]
    fn missing_encoding_names_field_and_space() {
        let raw = scheme(&[(Field::TdSc, EncodingCode::Raw)]);
        let err = build_field_info(
            &[Field::TdSc],
            &raw,
            &EncodingScheme::new(),
            &raw,
            &WidthTable::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::MissingEncoding {
                field: Field::TdSc,
                space: TensorSpace::Target
            }
        );
    }

    #[test]
    fn unregistered_width_is_reported() {
        let raw = scheme(&[(Field::TdSc, EncodingCode::Raw)]);
        let widths = WidthTable::empty()
            .with_width(EncodingCode::Clock, 2)
            .unwrap();
        let err = build_field_info(&[Field::TdSc], &raw, &raw, &raw, &widths).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnregisteredWidth {
                code: EncodingCode::Raw
            }
        );
    }

    #[test]
    fn empty_and_duplicate_orders_are_rejected() {
        let raw = scheme(&[(Field::TdSc, EncodingCode::Raw)]);
        let widths = WidthTable::default();
        assert_eq!(
            build_field_info(&[], &raw, &raw, &raw, &widths).unwrap_err(),
            LayoutError::EmptyOrder
        );
        assert_eq!(
            build_field_info(&[Field::TdSc, Field::TdSc], &raw, &raw, &raw, &widths)
                .unwrap_err(),
            LayoutError::DuplicateField { field: Field::TdSc }
        );
    }

    #[test]
    fn input_only_code_on_network_side_is_rejected() {
        let raw = scheme(&[(Field::Day, EncodingCode::Raw)]);
        let net = scheme(&[(Field::Day, EncodingCode::ClockInteger)]);
        let err =
            build_field_info(&[Field::Day], &raw, &raw, &net, &WidthTable::default()).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedNetEncoding { .. }));
    }
}
