use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use txseq_layout::EncodingStrategy;
use txseq_model::{EncodingCode, Field, TensorSpace};

use crate::types::PrepareResult;

pub fn print_prepare_summary(result: &PrepareResult) {
    println!("Input: {}", result.input.display());
    match &result.outputs {
        Some(paths) => {
            println!("Output: {}", result.output_dir.display());
            println!("Enriched table: {}", paths.enriched.display());
        }
        None => println!("Output: (dry run)"),
    }
    println!(
        "Rows: {}  Accounts: {}  Ordering: {}",
        result.rows, result.accounts, result.ordering
    );

    let mut scales = Table::new();
    scales.set_header(vec![header_cell("Scale"), header_cell("Value")]);
    apply_summary_table_style(&mut scales);
    align_column(&mut scales, 1, CellAlignment::Right);
    let s = &result.scales;
    for (name, value) in [
        ("log_amount_scale", s.log_amount_scale),
        ("td_scale", s.td_scale),
        ("attr_scale", s.attr_scale),
    ] {
        scales.add_row(vec![Cell::new(name), Cell::new(format!("{value:.6}"))]);
    }
    scales.add_row(vec![Cell::new("start_date"), Cell::new(s.start_date)]);
    println!("{scales}");

    let mut vocab = Table::new();
    vocab.set_header(vec![header_cell("Field"), header_cell("Categories")]);
    apply_summary_table_style(&mut vocab);
    align_column(&mut vocab, 1, CellAlignment::Right);
    for (field, size) in &result.vocabulary_sizes {
        vocab.add_row(vec![
            Cell::new(field.column())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(size),
        ]);
    }
    println!("{vocab}");
}

pub fn print_scenarios() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scenario"),
        header_cell("Calendar input"),
        header_cell("Calendar target"),
        header_cell("Calendar net"),
        header_cell("td_sc net"),
        header_cell("log_amount_sc net"),
    ]);
    apply_table_style(&mut table);
    for strategy in EncodingStrategy::ALL {
        let calendar = |space| calendar_label(strategy.encoding(space).get(Field::Day));
        let net = strategy.net_encoding();
        table.add_row(vec![
            Cell::new(strategy.id())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(calendar(TensorSpace::Input)),
            Cell::new(calendar(TensorSpace::Target)),
            Cell::new(calendar(TensorSpace::Network)),
            code_cell(net.get(Field::TdSc)),
            code_cell(net.get(Field::LogAmountSc)),
        ]);
    }
    println!("{table}");
}

/// Calendar codes are shown for the day field; one-hot codes read `oh_<field>`.
fn calendar_label(code: Option<EncodingCode>) -> String {
    match code {
        Some(code) if code.is_one_hot() => "oh_<field>".to_string(),
        Some(code) => code.as_str().to_string(),
        None => "-".to_string(),
    }
}

fn code_cell(code: Option<EncodingCode>) -> Cell {
    match code {
        Some(code) => Cell::new(code.as_str()),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
