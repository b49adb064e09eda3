//! Markup generation for converted tables.
//!
//! Two layouts exist:
//! - **simple**: the original table inside one horizontally scrollable wrapper
//! - **hybrid**: a stacked cards block for narrow screens next to a block
//!   holding the original table for wide screens
//!
//! Which hybrid block is visible is decided by the stylesheet through the
//! class names below.

use html_escape::encode_text;

use super::table_extraction::ExtractedTable;

/// Outer container of the hybrid layout
pub const HYBRID_CLASS: &str = "responsive-table hybrid-table";
/// Block of stacked cards, shown below the breakpoint
pub const CARDS_CLASS: &str = "table-cards";
pub const CARDS_HEADER_CLASS: &str = "table-cards-header";
pub const CARD_CLASS: &str = "table-card";
pub const CARD_ROW_CLASS: &str = "table-card-row";
pub const CARD_LABEL_CLASS: &str = "table-card-label";
pub const CARD_VALUE_CLASS: &str = "table-card-value";
/// Block holding the original table, shown from the breakpoint up
pub const TABLE_BLOCK_CLASS: &str = "table-desktop";
/// Horizontally scrollable wrapper of the simple layout
pub const SCROLL_CLASS: &str = "table-scroll";

/// "1 entry" / "N entries"
#[must_use]
pub fn entry_count_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{count} entries")
    }
}

/// Wrap the original table markup in a scrollable container
#[must_use]
pub fn render_simple(original: &str) -> String {
    format!("<div class=\"{SCROLL_CLASS}\">{original}</div>")
}

/// Emit cards for every data row plus the original table
///
/// Labels are escaped text; values are the cells' inner HTML as extracted.
/// Empty values are shown as `placeholder`.
#[must_use]
pub fn render_hybrid(table: &ExtractedTable, original: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(original.len() * 3);

    out.push_str(&format!(
        "<div class=\"{HYBRID_CLASS}\" data-columns=\"{}\">\n",
        table.column_count()
    ));
    out.push_str(&format!("<div class=\"{CARDS_CLASS}\">\n"));
    out.push_str(&format!(
        "<div class=\"{CARDS_HEADER_CLASS}\">{}</div>\n",
        entry_count_label(table.row_count())
    ));

    for row in &table.rows {
        out.push_str(&format!("<div class=\"{CARD_CLASS}\">\n"));
        for (label, value) in table.headers.iter().zip(row) {
            let value = if value.is_empty() { placeholder } else { value.as_str() };
            out.push_str(&format!(
                "<div class=\"{CARD_ROW_CLASS}\"><span class=\"{CARD_LABEL_CLASS}\">{}</span><span class=\"{CARD_VALUE_CLASS}\">{value}</span></div>\n",
                encode_text(label)
            ));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n");
    out.push_str(&format!("<div class=\"{TABLE_BLOCK_CLASS}\">{original}</div>\n"));
    out.push_str("</div>");
    out
}
