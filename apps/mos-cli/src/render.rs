//! Table and summary output.

use std::collections::BTreeMap;

use comfy_table::{Cell, Color, Table};
use mos_core::BadgeTone;
use mos_pages::PageRecord;

pub fn table<R: PageRecord>(rows: &[&R]) -> Table {
    let mut table = Table::new();
    table.set_header(R::columns().to_vec());
    for row in rows {
        table.add_row(R::columns().iter().map(|c| cell(*row, c)).collect::<Vec<_>>());
    }
    table
}

/// Status-like columns are tinted with their badge colour.
fn cell<R: PageRecord>(row: &R, column: &str) -> Cell {
    let cell = Cell::new(row.cell(column));
    match row.badge(column) {
        Some(tone) => cell.fg(badge_color(tone)),
        None => cell,
    }
}

fn badge_color(tone: BadgeTone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::Rgb { r, g, b }
}

/// Row offset of a 1-based page. Out-of-range pages land past the end.
pub fn page_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// "rows 26-50 of 73" line under the table.
pub fn range_line(offset: usize, shown: usize, total: usize) -> String {
    if shown == 0 {
        return format!("no rows (of {})", total);
    }
    format!("rows {}-{} of {}", offset + 1, offset + shown, total)
}

pub fn status_line(counts: &BTreeMap<String, usize>) -> Option<String> {
    if counts.is_empty() {
        return None;
    }
    let parts: Vec<String> = counts
        .iter()
        .map(|(label, n)| format!("{}: {}", label, n))
        .collect();
    Some(parts.join("  "))
}
