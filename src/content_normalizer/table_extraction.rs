//! Table parsing for the content normalizer.
//!
//! Each `<table>` block is parsed on its own with `scraper`, so extraction
//! works on plain markup without any rendering tree. The result is an
//! [`ExtractedTable`]: header labels from the first row plus the inner HTML
//! of every data cell, padded or cut to the header count.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

// ============================================================================
// Static Selectors (compiled once at first use)
// ============================================================================

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

static TABLE_CLOSE_AT_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</table\s*>\s*$").expect("BUG: hardcoded table close regex is valid")
});

// ============================================================================
// Limits
// ============================================================================

/// Maximum rows accepted before a table is left to the scrollable fallback
pub const MAX_TABLE_ROWS: usize = 1000;

/// Maximum total cells accepted for a single table
pub const MAX_TABLE_CELLS: usize = 100_000;

// ============================================================================
// Data Structures
// ============================================================================

/// Reasons a table block cannot be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The block starts a table that is never closed
    #[error("table is missing its closing tag")]
    Unterminated,

    /// The HTML parser produced no table element for the block
    #[error("no table element found in markup")]
    MissingTable,

    #[error("table has {0} rows, more than the supported maximum")]
    TooManyRows(usize),

    #[error("table has more cells than the supported maximum")]
    TooManyCells,
}

/// Headers and data rows of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    /// One label per column, taken from the first row
    pub headers: Vec<String>,
    /// Inner HTML of each data cell, exactly `headers.len()` entries per row.
    /// Missing cells are empty strings.
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Label used for a header cell with no text (`index` is 0-based)
#[must_use]
pub fn placeholder_label(index: usize) -> String {
    format!("Column {}", index + 1)
}

// ============================================================================
// Extraction
// ============================================================================

/// Parse one table block
///
/// # Returns
/// * `Ok(Some(table))` - headers and data rows
/// * `Ok(None)` - the table has no rows at all
/// * `Err(TableError)` - the markup cannot be converted
pub fn extract_table(markup: &str) -> Result<Option<ExtractedTable>, TableError> {
    if !TABLE_CLOSE_AT_END_RE.is_match(markup) {
        return Err(TableError::Unterminated);
    }

    let fragment = Html::parse_fragment(markup);
    let table = fragment
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or(TableError::MissingTable)?;

    // Rows of nested tables belong to those tables, not this one
    let rows: Vec<ElementRef> = table
        .select(&TR_SELECTOR)
        .filter(|row| owning_table(row).is_some_and(|owner| owner.id() == table.id()))
        .collect();

    let Some((header_row, data_rows)) = rows.split_first() else {
        return Ok(None);
    };

    if rows.len() > MAX_TABLE_ROWS {
        return Err(TableError::TooManyRows(rows.len()));
    }

    let headers: Vec<String> = row_cells(header_row)
        .enumerate()
        .map(|(index, cell)| {
            let text = cell_text(&cell);
            if text.is_empty() {
                placeholder_label(index)
            } else {
                text
            }
        })
        .collect();

    let mut total_cells = headers.len();
    let mut records = Vec::with_capacity(data_rows.len());

    for row in data_rows {
        let cells: Vec<ElementRef> = row_cells(row).collect();
        total_cells += cells.len();
        if total_cells > MAX_TABLE_CELLS {
            return Err(TableError::TooManyCells);
        }

        let record = (0..headers.len())
            .map(|index| {
                cells
                    .get(index)
                    .map(|cell| cell.inner_html().trim().to_string())
                    .unwrap_or_default()
            })
            .collect();
        records.push(record);
    }

    Ok(Some(ExtractedTable {
        headers,
        rows: records,
    }))
}

fn owning_table<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
}

fn row_cells<'a>(row: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
}

/// Cell text with whitespace runs collapsed
fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
