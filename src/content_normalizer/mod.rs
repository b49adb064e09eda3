//! Responsive normalization of author-supplied HTML bodies.
//!
//! Blog and event bodies come from a rich-text editor and are rendered as raw
//! HTML. [`normalize`] makes them behave from phone widths up to desktop:
//!
//! 1. Fixed inline image sizing is relaxed (see [`image_sizing`]).
//! 2. Every `<table>` block is converted independently, in document order:
//!    tables with more columns than [`NormalizerConfig::column_threshold`]
//!    get the hybrid cards + table layout, narrower ones a scrollable
//!    wrapper (see [`table_layout`]).
//!
//! The transform never fails. A table that cannot be parsed is wrapped in
//! the scrollable fallback with its markup untouched, and the rest of the
//! document is still processed.

pub mod image_sizing;
pub mod table_extraction;
pub mod table_layout;

pub use image_sizing::{FLUID_IMAGE_STYLE, relax_fixed_dimensions};
pub use table_extraction::{ExtractedTable, TableError, extract_table, placeholder_label};
pub use table_layout::{entry_count_label, render_hybrid, render_simple};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::utils::DEFAULT_TABLE_COLUMN_THRESHOLD;

/// Placeholder rendered for empty card values
pub const EMPTY_CELL_PLACEHOLDER: &str = "—";

static TABLE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<table\b[^>]*>.*?</table\s*>")
        .expect("BUG: hardcoded table block regex is valid")
});

static TABLE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<table\b").expect("BUG: hardcoded table open regex is valid")
});

/// Tunables of the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tables with more columns than this use the hybrid layout
    pub column_threshold: usize,
    /// Shown in a card when the cell is empty or missing
    pub empty_cell_placeholder: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            column_threshold: DEFAULT_TABLE_COLUMN_THRESHOLD,
            empty_cell_placeholder: EMPTY_CELL_PLACEHOLDER.to_string(),
        }
    }
}

/// Normalizer bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct ContentNormalizer {
    config: NormalizerConfig,
}

impl ContentNormalizer {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    #[must_use]
    pub fn normalize(&self, html: &str) -> String {
        normalize_with(html, &self.config)
    }
}

/// Normalize a content fragment with the default configuration
#[must_use]
pub fn normalize(html: &str) -> String {
    normalize_with(html, &NormalizerConfig::default())
}

/// Normalize a content fragment
#[must_use]
pub fn normalize_with(html: &str, config: &NormalizerConfig) -> String {
    let resized = relax_fixed_dimensions(html);
    convert_tables(&resized, config)
}

fn convert_tables(html: &str, config: &NormalizerConfig) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 2);
    let mut cursor = 0;
    let mut converted = 0usize;

    for block in TABLE_BLOCK_RE.find_iter(html) {
        out.push_str(&html[cursor..block.start()]);
        out.push_str(&convert_table(block.as_str(), config));
        cursor = block.end();
        converted += 1;
    }

    // An opening tag left after the last complete block never closes;
    // everything from it to the end is treated as that table.
    let tail = &html[cursor..];
    match TABLE_OPEN_RE.find(tail) {
        Some(open) => {
            out.push_str(&tail[..open.start()]);
            out.push_str(&convert_table(&tail[open.start()..], config));
            converted += 1;
        }
        None => out.push_str(tail),
    }

    if converted > 0 {
        debug!(tables = converted, "converted content tables");
    }
    out
}

fn convert_table(markup: &str, config: &NormalizerConfig) -> String {
    match extract_table(markup) {
        Ok(Some(table)) if table.column_count() > config.column_threshold => {
            render_hybrid(&table, markup, &config.empty_cell_placeholder)
        }
        Ok(Some(_)) => render_simple(markup),
        Ok(None) => markup.to_string(),
        Err(error) => {
            warn!(%error, "table could not be parsed, using scrollable fallback");
            render_simple(markup)
        }
    }
}
