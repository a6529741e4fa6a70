//! Terminal and JSON renderings of check results.

use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use nsfg_validate::PregnumMismatch;

/// Machine-readable result of `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub respondents: usize,
    pub pregnancy_records: usize,
    pub consistent: bool,
    pub mismatches: Vec<PregnumMismatch>,
}

impl ValidationReport {
    pub fn new(
        respondents: usize,
        pregnancy_records: usize,
        mismatches: Vec<PregnumMismatch>,
    ) -> Self {
        Self {
            respondents,
            pregnancy_records,
            consistent: mismatches.is_empty(),
            mismatches,
        }
    }
}

/// Table of respondents per reported `pregnum`, with a total row.
pub fn pregnum_table(counts: &BTreeMap<u32, usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("pregnum"), header_cell("Respondents")]);
    apply_table_style(&mut table);
    for (pregnum, count) in counts {
        table.add_row(vec![Cell::new(pregnum), Cell::new(count)]);
    }
    let total: usize = counts.values().sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Table of mismatching cases.
pub fn mismatch_table(mismatches: &[PregnumMismatch]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Pregnancy records"),
        header_cell("Reported pregnum"),
    ]);
    apply_table_style(&mut table);
    for mismatch in mismatches {
        table.add_row(vec![
            Cell::new(&mismatch.case_id),
            Cell::new(mismatch.observed).fg(Color::Red),
            Cell::new(mismatch.reported).fg(Color::Yellow),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
