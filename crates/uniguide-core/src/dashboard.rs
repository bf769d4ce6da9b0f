//! Dashboard orchestration.
//!
//! One method per panel of the University Guide: each assembles its query,
//! runs it through the non-failing adapter boundary and shapes the result.
//! Save operations reconcile an edited snapshot and re-fetch.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::model::{CollaboratorCount, FacultyCitationScore, Institution};
use crate::queries::{self, FACULTY_COLLECTION, PUBLICATIONS_COLLECTION};
use crate::reconcile::{self, DuplicateKeyPolicy, EditSpec, FieldWriter, ReconcileReport};
use crate::search::filter_contains;
use crate::store::{run_document_query, run_graph_query, run_sql};
use crate::store::{DocumentStore, GraphStore, RelationalStore};
use crate::table::Table;

/// Natural key of the faculty table.
pub const FACULTY_KEY: &str = "name";
/// The only user-editable faculty column.
pub const FACULTY_EDITABLE: &str = "phone";
/// Natural key of the publications table.
pub const PUBLICATION_KEY: &str = "title";
/// The only user-editable publication column.
pub const PUBLICATION_EDITABLE: &str = "venue";

/// Result of saving table edits.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub report: ReconcileReport,
    /// Canonical rows re-fetched after the writes.
    pub table: Table,
}

/// Entry point for every dashboard interaction.
#[derive(Clone)]
pub struct Dashboard {
    sql: Arc<dyn RelationalStore>,
    docs: Arc<dyn DocumentStore>,
    graph: Arc<dyn GraphStore>,
    duplicates: DuplicateKeyPolicy,
}

impl Dashboard {
    pub fn new(
        sql: Arc<dyn RelationalStore>,
        docs: Arc<dyn DocumentStore>,
        graph: Arc<dyn GraphStore>,
    ) -> Self {
        Self {
            sql,
            docs,
            graph,
            duplicates: DuplicateKeyPolicy::default(),
        }
    }

    /// Choose how repeated natural keys are handled when saving edits.
    pub fn with_duplicate_policy(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Every institution.
    pub async fn universities(&self) -> Table {
        run_sql(self.sql.as_ref(), &queries::all_institutions()).await
    }

    /// Name and logo of the selected institution.
    pub async fn institution(&self, name: &str) -> Option<Institution> {
        if name.is_empty() {
            return None;
        }
        Institution::find(&self.universities().await, name)
    }

    /// Keyword names for the keyword selector.
    pub async fn keywords(&self, institution: &str) -> Vec<String> {
        if institution.is_empty() {
            return Vec::new();
        }
        let table = run_sql(
            self.sql.as_ref(),
            &queries::keywords_for_institution(institution),
        )
        .await;
        table
            .column("keyword")
            .into_iter()
            .filter(|v| !v.is_null())
            .map(ToString::to_string)
            .collect()
    }

    /// Faculty of an institution, optionally narrowed by name.
    pub async fn faculty(&self, institution: &str, search: Option<&str>) -> Table {
        if institution.is_empty() {
            return Table::empty();
        }
        let pipeline = queries::faculty_by_institution(institution);
        let mut table = run_document_query(self.docs.as_ref(), FACULTY_COLLECTION, Some(&pipeline)).await;
        filter_contains(&mut table, &[FACULTY_KEY], search);
        table
    }

    /// Write back edited phone numbers, then re-fetch.
    pub async fn save_faculty(
        &self,
        institution: &str,
        search: Option<&str>,
        edited: &Table,
    ) -> SaveOutcome {
        let canonical = self.faculty(institution, search).await;
        let spec = EditSpec {
            key_field: FACULTY_KEY,
            editable_field: FACULTY_EDITABLE,
            duplicates: self.duplicates,
        };
        let writer = CollectionFieldWriter {
            store: self.docs.as_ref(),
            collection: FACULTY_COLLECTION,
            key_field: FACULTY_KEY,
            field: FACULTY_EDITABLE,
        };
        let report = reconcile::reconcile(&canonical, edited, &spec, &writer).await;

        SaveOutcome {
            report,
            table: self.faculty(institution, search).await,
        }
    }

    /// Publications tagged with a keyword, optionally narrowed by title or
    /// venue.
    pub async fn publications(&self, keyword: &str, search: Option<&str>) -> Table {
        if keyword.is_empty() {
            return Table::empty();
        }
        let pipeline = queries::publications_by_keyword(keyword);
        let mut table =
            run_document_query(self.docs.as_ref(), PUBLICATIONS_COLLECTION, Some(&pipeline)).await;
        filter_contains(&mut table, &[PUBLICATION_KEY, PUBLICATION_EDITABLE], search);
        table
    }

    /// Write back edited venues, then re-fetch.
    pub async fn save_publications(
        &self,
        keyword: &str,
        search: Option<&str>,
        edited: &Table,
    ) -> SaveOutcome {
        let canonical = self.publications(keyword, search).await;
        let spec = EditSpec {
            key_field: PUBLICATION_KEY,
            editable_field: PUBLICATION_EDITABLE,
            duplicates: self.duplicates,
        };
        let writer = CollectionFieldWriter {
            store: self.docs.as_ref(),
            collection: PUBLICATIONS_COLLECTION,
            key_field: PUBLICATION_KEY,
            field: PUBLICATION_EDITABLE,
        };
        let report = reconcile::reconcile(&canonical, edited, &spec, &writer).await;

        SaveOutcome {
            report,
            table: self.publications(keyword, search).await,
        }
    }

    /// Top ten institutions co-publishing with the selected one.
    pub async fn top_collaborators(&self, institution: &str) -> Vec<CollaboratorCount> {
        if institution.is_empty() {
            return Vec::new();
        }
        let table = run_graph_query(self.graph.as_ref(), &queries::top_collaborators(institution)).await;
        CollaboratorCount::from_table(&table)
    }

    /// Top ten faculty of the institution by keyword-weighted citations.
    pub async fn top_faculty(&self, institution: &str, keyword: &str) -> Vec<FacultyCitationScore> {
        if institution.is_empty() || keyword.is_empty() {
            return Vec::new();
        }
        let table = run_graph_query(
            self.graph.as_ref(),
            &queries::top_faculty_by_keyword(institution, keyword),
        )
        .await;
        FacultyCitationScore::from_table(&table)
    }
}

/// Sets one field on documents matched by a natural key.
struct CollectionFieldWriter<'a> {
    store: &'a dyn DocumentStore,
    collection: &'static str,
    key_field: &'static str,
    field: &'static str,
}

#[async_trait]
impl<'a> FieldWriter for CollectionFieldWriter<'a> {
    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let matched = self
            .store
            .set_field(self.collection, self.key_field, key, self.field, value)
            .await?;
        if matched == 0 {
            warn!(collection = self.collection, key = %key, "No document matched edited row");
        } else {
            info!(collection = self.collection, key = %key, field = self.field, "Updated field");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{GraphStatement, Pipeline, SqlStatement};
    use crate::table::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeSql;

    #[async_trait]
    impl RelationalStore for FakeSql {
        async fn query(&self, statement: &SqlStatement) -> StoreResult<Table> {
            if statement.sql.contains("university_keywords_view") {
                let mut table = Table::with_columns(["keyword"]);
                if statement.params == vec![Value::from("MIT")] {
                    table.push_row(vec![Value::from("databases")]);
                    table.push_row(vec![Value::from("graphs")]);
                }
                return Ok(table);
            }
            let mut table = Table::with_columns(["id", "name", "photo_url"]);
            table.push_row(vec![Value::Int(1), Value::from("MIT"), Value::from("mit.png")]);
            Ok(table)
        }

        async fn execute(&self, _: &SqlStatement) -> StoreResult<u64> {
            Ok(0)
        }
    }

    /// Collections held as tables; pipelines are recorded, not evaluated.
    #[derive(Default)]
    struct FakeDocs {
        collections: Mutex<HashMap<String, Table>>,
        pipelines: Mutex<Vec<Pipeline>>,
        writes: Mutex<Vec<(String, String, String)>>,
    }

    impl FakeDocs {
        fn with(collection: &str, table: Table) -> Self {
            let docs = Self::default();
            docs.collections.lock().unwrap().insert(collection.to_string(), table);
            docs
        }
    }

    #[async_trait]
    impl DocumentStore for FakeDocs {
        async fn find(&self, collection: &str, pipeline: Option<&Pipeline>) -> StoreResult<Table> {
            if let Some(p) = pipeline {
                self.pipelines.lock().unwrap().push(p.clone());
            }
            Ok(self.collections.lock().unwrap().get(collection).cloned().unwrap_or_default())
        }

        async fn set_field(
            &self,
            collection: &str,
            key_field: &str,
            key: &str,
            field: &str,
            value: &str,
        ) -> StoreResult<u64> {
            self.writes
                .lock()
                .unwrap()
                .push((collection.to_string(), key.to_string(), value.to_string()));
            let mut collections = self.collections.lock().unwrap();
            let Some(table) = collections.get_mut(collection) else {
                return Ok(0);
            };
            let position = table
                .rows()
                .position(|row| row.text(key_field).as_deref() == Some(key));
            match position {
                Some(idx) => {
                    table.set(idx, field, Value::from(value));
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    struct FakeGraph {
        table: Table,
    }

    #[async_trait]
    impl GraphStore for FakeGraph {
        async fn query(&self, _: &GraphStatement) -> StoreResult<Table> {
            Ok(self.table.clone())
        }

        async fn execute(&self, _: &GraphStatement) -> StoreResult<()> {
            Err(StoreError::query("read only"))
        }
    }

    fn faculty_table() -> Table {
        let mut table = Table::with_columns(["_id", "name", "phone", "email"]);
        table.push_row(vec![
            Value::from("f1"),
            Value::from("Ann Lee"),
            Value::from("111"),
            Value::from("ann@mit.edu"),
        ]);
        table.push_row(vec![
            Value::from("f2"),
            Value::from("Bob Ray"),
            Value::from("222"),
            Value::from("bob@mit.edu"),
        ]);
        table
    }

    fn dashboard(docs: Arc<FakeDocs>, graph: Table) -> Dashboard {
        Dashboard::new(Arc::new(FakeSql), docs, Arc::new(FakeGraph { table: graph }))
    }

    #[tokio::test]
    async fn test_institution_and_keywords() {
        let dash = dashboard(Arc::new(FakeDocs::default()), Table::empty());

        let mit = dash.institution("MIT").await.unwrap();
        assert_eq!(mit.photo_url.as_deref(), Some("mit.png"));
        assert!(dash.institution("").await.is_none());

        assert_eq!(dash.keywords("MIT").await, vec!["databases", "graphs"]);
        assert!(dash.keywords("").await.is_empty());
    }

    #[tokio::test]
    async fn test_faculty_drops_identifier_and_filters_by_name() {
        let docs = Arc::new(FakeDocs::with(FACULTY_COLLECTION, faculty_table()));
        let dash = dashboard(docs.clone(), Table::empty());

        let table = dash.faculty("MIT", Some("bob")).await;
        assert!(!table.has_column("_id"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).unwrap().text("name").as_deref(), Some("Bob Ray"));

        let pipelines = docs.pipelines.lock().unwrap();
        assert_eq!(pipelines[0][0]["$match"]["affiliation.name"], "MIT");
    }

    #[tokio::test]
    async fn test_save_faculty_writes_changed_phones_and_refetches() {
        let docs = Arc::new(FakeDocs::with(FACULTY_COLLECTION, faculty_table()));
        let dash = dashboard(docs.clone(), Table::empty());

        let mut edited = dash.faculty("MIT", None).await;
        assert!(edited.set(1, "phone", Value::from("999")));

        let outcome = dash.save_faculty("MIT", None, &edited).await;

        assert_eq!(outcome.report.updated, 1);
        assert_eq!(outcome.report.unchanged, 1);
        assert_eq!(
            *docs.writes.lock().unwrap(),
            vec![("faculty".to_string(), "Bob Ray".to_string(), "999".to_string())]
        );
        assert_eq!(outcome.table.row(1).unwrap().text("phone").as_deref(), Some("999"));
    }

    #[tokio::test]
    async fn test_save_publications_updates_venue() {
        let mut publications = Table::with_columns(["title", "venue", "keywords"]);
        publications.push_row(vec![
            Value::from("Graph Mining"),
            Value::from("KDD"),
            Value::List(vec![Value::from("graphs"), Value::from("mining")]),
        ]);
        let docs = Arc::new(FakeDocs::with(PUBLICATIONS_COLLECTION, publications));
        let dash = dashboard(docs.clone(), Table::empty());

        let shown = dash.publications("graphs", None).await;
        assert_eq!(shown.to_display().rows[0][2], "graphs, mining");

        let mut edited = shown.clone();
        edited.set(0, "venue", Value::from("ICDM"));
        let outcome = dash.save_publications("graphs", None, &edited).await;

        assert_eq!(outcome.report.updated, 1);
        assert_eq!(outcome.table.row(0).unwrap().text("venue").as_deref(), Some("ICDM"));
    }

    #[tokio::test]
    async fn test_publications_need_a_keyword() {
        let docs = Arc::new(FakeDocs::default());
        let dash = dashboard(docs.clone(), Table::empty());
        assert!(dash.publications("", Some("x")).await.is_empty());
        assert!(docs.pipelines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_faculty_discards_non_numeric_scores() {
        let mut graph = Table::with_columns(["name", "accumulated_citations"]);
        graph.push_row(vec![Value::from("Ann Lee"), Value::Float(9.0)]);
        graph.push_row(vec![Value::from("Bob Ray"), Value::Null]);
        let dash = dashboard(Arc::new(FakeDocs::default()), graph);

        let scores = dash.top_faculty("MIT", "graphs").await;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].accumulated_citations, 9.0);

        assert!(dash.top_faculty("MIT", "").await.is_empty());
    }

    #[tokio::test]
    async fn test_top_collaborators_keep_store_order() {
        let mut graph = Table::with_columns(["university_name", "faculty_count"]);
        graph.push_row(vec![Value::from("C"), Value::Int(5)]);
        graph.push_row(vec![Value::from("B"), Value::Int(2)]);
        let dash = dashboard(Arc::new(FakeDocs::default()), graph);

        let top = dash.top_collaborators("A").await;
        assert_eq!(
            top,
            vec![
                CollaboratorCount { university_name: "C".to_string(), faculty_count: 5 },
                CollaboratorCount { university_name: "B".to_string(), faculty_count: 2 },
            ]
        );
    }
}
