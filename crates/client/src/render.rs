//! Plain-text rendering of an item page.

use std::fmt::Write as _;

use itemdesk_core::item::Item;

use crate::view::PageView;

const HEADERS: [&str; 5] = ["ID", "Name", "Description", "Status", "Created"];

/// Cells of one table row.
fn row_cells(item: &Item) -> [String; 5] {
    [
        item.id.to_string(),
        item.name.clone(),
        item.description.clone().unwrap_or_default(),
        item.status.label().to_string(),
        item.created_at.format("%Y-%m-%d").to_string(),
    ]
}

/// Render the visible items as an aligned text table, or a placeholder line
/// when the page is empty.
pub fn render_table(page: &PageView<'_>) -> String {
    if page.items.is_empty() {
        return "No items found\n".to_string();
    }

    let rows: Vec<[String; 5]> = page.items.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// "Showing X to Y of Z items".
pub fn pagination_summary(page: &PageView<'_>) -> String {
    format!(
        "Showing {} to {} of {} items",
        page.start_item, page.end_item, page.total_items
    )
}
