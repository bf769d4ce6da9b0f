//! Edit reconciliation.
//!
//! Compares an edited snapshot of a table against freshly fetched canonical
//! rows and writes back only the editable field, only where it changed.
//! Rows are correlated by a natural key (faculty name, publication title).
//! There is no insert path: edited rows without a canonical counterpart are
//! skipped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::error::StoreResult;
use crate::table::Table;

/// What to do when a natural key matches several canonical rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Compare against the first canonical row carrying the key.
    #[default]
    FirstMatch,
    /// Leave the key alone and report it as ambiguous.
    SkipAmbiguous,
}

/// Which fields drive a reconciliation.
#[derive(Debug, Clone, Copy)]
pub struct EditSpec<'a> {
    pub key_field: &'a str,
    pub editable_field: &'a str,
    pub duplicates: DuplicateKeyPolicy,
}

/// A single-field write for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub key: String,
    pub value: String,
}

/// Outcome counts of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub updated: usize,
    pub unchanged: usize,
    /// No canonical row for the key, or the edited row lacks the key or
    /// editable field.
    pub unmatched: usize,
    pub ambiguous: usize,
    pub failed: usize,
}

/// Updates to issue plus the counts known before writing.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    pub updates: Vec<FieldUpdate>,
    pub report: ReconcileReport,
}

/// Persists one field of the row identified by `key`.
#[async_trait]
pub trait FieldWriter: Send + Sync {
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Work out which rows need writing, without touching any store.
///
/// Values are compared in display form since edits arrive as strings.
pub fn plan(canonical: &Table, edited: &Table, spec: &EditSpec<'_>) -> ReconcilePlan {
    // key -> (editable value of the first row with that key, rows with that key)
    let mut index: HashMap<String, (Option<String>, usize)> = HashMap::new();
    for row in canonical.rows() {
        let Some(key) = row.get(spec.key_field).filter(|k| !k.is_null()) else {
            continue;
        };
        index
            .entry(key.to_string())
            .and_modify(|(_, count)| *count += 1)
            .or_insert_with(|| (row.text(spec.editable_field), 1));
    }

    let mut result = ReconcilePlan::default();
    for row in edited.rows() {
        let key = row.get(spec.key_field).filter(|k| !k.is_null());
        let value = row.get(spec.editable_field).filter(|v| !v.is_null());
        let (Some(key), Some(value)) = (key, value) else {
            result.report.unmatched += 1;
            continue;
        };
        let key = key.to_string();
        let value = value.to_string();

        match index.get(&key) {
            None => result.report.unmatched += 1,
            Some((_, count)) if *count > 1 && spec.duplicates == DuplicateKeyPolicy::SkipAmbiguous => {
                warn!(key = %key, rows = *count, "Ambiguous natural key, skipping edit");
                result.report.ambiguous += 1;
            }
            Some((current, _)) if current.as_deref() == Some(value.as_str()) => {
                result.report.unchanged += 1;
            }
            Some(_) => result.updates.push(FieldUpdate { key, value }),
        }
    }

    result
}

/// Diff `edited` against `canonical` and write each changed field through
/// `writer`, one row at a time.
///
/// A failed write is logged and counted; the rest of the batch still runs.
/// Callers re-fetch canonical rows afterwards.
pub async fn reconcile(
    canonical: &Table,
    edited: &Table,
    spec: &EditSpec<'_>,
    writer: &dyn FieldWriter,
) -> ReconcileReport {
    let ReconcilePlan { updates, mut report } = plan(canonical, edited, spec);

    for update in &updates {
        match writer.write(&update.key, &update.value).await {
            Ok(()) => report.updated += 1,
            Err(e) => {
                error!(
                    key = %update.key,
                    field = spec.editable_field,
                    error = %e,
                    "Failed to write edited field"
                );
                report.failed += 1;
            }
        }
    }

    info!(
        field = spec.editable_field,
        updated = report.updated,
        unchanged = report.unchanged,
        unmatched = report.unmatched,
        ambiguous = report.ambiguous,
        failed = report.failed,
        "Reconciled table edits"
    );
    report
}
