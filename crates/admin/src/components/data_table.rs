//! Data table component types.
//!
//! Every list page renders through one [`DataTableConfig`]: the columns come
//! from the resource, the rows are pre-rendered cells, and the search box
//! filters on the resource's search key.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use storedash_core::{ApiRoute, HexColor, ResourceKind, api_routes};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
}

impl TableColumn {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub text: String,
    /// CSS color shown as a swatch next to the text.
    pub swatch: Option<String>,
}

impl TableCell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            swatch: None,
        }
    }

    #[must_use]
    pub fn swatch(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            swatch: HexColor::is_valid(&color).then(|| color.clone()),
            text: color,
        }
    }

    #[must_use]
    pub fn flag(value: bool) -> Self {
        Self::text(if value { "Yes" } else { "No" })
    }
}

/// One table row.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub id: String,
    /// Value of the search column, matched against the query.
    pub search: String,
    pub cells: Vec<TableCell>,
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    pub kind: ResourceKind,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    /// Rows before search filtering, shown in the heading.
    pub total: usize,
    /// Current search text.
    pub query: String,
    pub search_placeholder: String,
    /// Base path of the resource pages, e.g. `/{store}/billboards`.
    pub base_path: String,
    /// Public API endpoints shown below the table.
    pub api_routes: Vec<ApiRoute>,
    pub empty_title: String,
}

impl DataTableConfig {
    /// Create a table for `kind` in the given store.
    #[must_use]
    pub fn new(kind: ResourceKind, store_id: &str) -> Self {
        Self {
            kind,
            columns: vec![],
            rows: vec![],
            total: 0,
            query: String::new(),
            search_placeholder: format!("Search by {}...", kind.search_key()),
            base_path: format!("/{store_id}/{}", kind.path()),
            api_routes: vec![],
            empty_title: "No results.".to_string(),
        }
    }

    /// Set all columns at once.
    #[must_use]
    pub fn columns(mut self, columns: Vec<TableColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Show the API documentation block for the store.
    #[must_use]
    pub fn with_api(mut self, base_url: &str, store_id: &str) -> Self {
        self.api_routes = api_routes(base_url, store_id, self.kind);
        self
    }

    /// Set rows, keeping only those whose search column contains `query`
    /// (case-insensitive).
    #[must_use]
    pub fn rows(mut self, rows: Vec<TableRow>, query: Option<&str>) -> Self {
        let query = query.map(str::trim).unwrap_or_default();
        self.total = rows.len();
        self.query = query.to_string();
        self.rows = filter_rows(rows, query);
        self
    }

    /// Heading with the collection size, e.g. `"Billboards (3)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.kind.title(), self.total)
    }

    /// Row actions and the "Add New" button are hidden for read-only kinds.
    #[must_use]
    pub const fn has_actions(&self) -> bool {
        !self.kind.is_read_only()
    }
}

/// Case-insensitive substring filter over each row's search column.
#[must_use]
pub fn filter_rows(rows: Vec<TableRow>, query: &str) -> Vec<TableRow> {
    if query.is_empty() {
        return rows;
    }
    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|row| row.search.to_lowercase().contains(&needle))
        .collect()
}

/// Long date as shown in tables, e.g. `"July 4th, 2024"`.
#[must_use]
pub fn long_date(at: &DateTime<Utc>) -> String {
    let day = at.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", at.format("%B"), at.year())
}
