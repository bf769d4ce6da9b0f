//! JSON shapes for tables sent to and received from the editing client.

use serde::{Deserialize, Serialize};
use uniguide_core::{ReconcileReport, SaveOutcome, Table};

/// A column header and whether the client may edit its cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub name: String,
    pub editable: bool,
}

/// A table in display form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl TableView {
    pub fn new(table: &Table, editable: &[&str]) -> Self {
        let display = table.to_display();
        Self {
            columns: display
                .columns
                .iter()
                .map(|name| ColumnView {
                    name: name.clone(),
                    editable: editable.contains(&name.as_str()),
                })
                .collect(),
            rows: display.records(),
        }
    }
}

/// Query string for the searchable tables.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Body of a save request: the client's edited rows.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Search the client had applied when it took the snapshot.
    #[serde(default)]
    pub search: Option<String>,
}

impl SaveRequest {
    pub fn edited(self) -> (Table, Option<String>) {
        (Table::from_json_rows(self.rows), self.search)
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub report: ReconcileReport,
    pub table: TableView,
}

impl SaveResponse {
    pub fn new(outcome: SaveOutcome, editable: &[&str]) -> Self {
        Self {
            report: outcome.report,
            table: TableView::new(&outcome.table, editable),
        }
    }
}
