//! Plain-text rendering of field layouts.

use txseq_model::TensorSpace;

use crate::layout::FieldInfo;

/// Renders every tensor space of `info`, one line per field.
///
/// Network lines carry the loss kind and activation.
pub fn render_layout(info: &FieldInfo) -> String {
    let mut out = String::new();
    for space in TensorSpace::ALL {
        let layout = info.layout(space);
        out.push_str(&format!("{} ({})\n", space.as_str(), layout.total_width()));
        for span in layout.spans() {
            let mut line = format!(
                "  {:<14} {:<13} {:>4}..",
                span.field.as_str(),
                span.code.as_str(),
                span.start
            );
            if space == TensorSpace::Network {
                line.push_str(&format!("{:<4}", span.end()));
                if let Some(loss) = info.loss_type(span.field) {
                    line.push(' ');
                    line.push_str(loss.as_str());
                }
                if let Some(activation) = info.activation(span.field) {
                    line.push(' ');
                    line.push_str(activation.as_str());
                }
            } else {
                line.push_str(&span.end().to_string());
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::LayoutPreset;
    use crate::widths::WidthTable;

    #[test]
    fn every_field_gets_a_line_per_space() {
        let info = LayoutPreset::CatField.build(&WidthTable::default()).unwrap();
        let text = render_layout(&info);
        assert_eq!(text.lines().count(), 3 * 4);
        assert!(text.starts_with("input (17)\n"));
        assert!(text.lines().all(|line| !line.ends_with(' ')));
    }
}
