//! Store traits and the adapter boundary.
//!
//! Each backing store (relational, document, graph) is reached through a
//! trait implemented by its adapter crate. Clients are created once and
//! injected, which also lets tests substitute in-memory doubles.
//!
//! The `run_*` functions are the boundary the dashboard calls: they never
//! fail. Any connection, execution or shape error is logged and turned into
//! an empty [`Table`] so the caller always has something to render.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::StoreResult;
use crate::table::{Table, Value};

/// Internal identifier field of the document store.
pub const DOCUMENT_ID_FIELD: &str = "_id";

/// A SQL statement with positional `?` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// Aggregation pipeline stages, as JSON documents.
pub type Pipeline = Vec<serde_json::Value>;

/// A Cypher statement with named parameters.
///
/// The bolt driver has no generic accessor for every field of a record, so
/// a statement names the columns its `RETURN` clause projects.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatement {
    pub cypher: String,
    pub params: Vec<(String, Value)>,
    pub columns: Vec<String>,
}

impl GraphStatement {
    pub fn new(cypher: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            cypher: cypher.into(),
            params: Vec::new(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Bind a `$key` parameter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }
}

/// Relational store (MySQL).
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Run a statement that returns rows.
    async fn query(&self, statement: &SqlStatement) -> StoreResult<Table>;

    /// Run a statement that returns no rows. Yields the affected row count.
    async fn execute(&self, statement: &SqlStatement) -> StoreResult<u64>;
}

/// Document store (MongoDB).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a whole collection, or the output of `pipeline` when given.
    async fn find(&self, collection: &str, pipeline: Option<&Pipeline>) -> StoreResult<Table>;

    /// Set `field` to `value` on the first document whose `key_field`
    /// equals `key`. Yields the matched document count.
    async fn set_field(
        &self,
        collection: &str,
        key_field: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<u64>;
}

/// Graph store (Neo4j).
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run a statement and collect its projected columns.
    async fn query(&self, statement: &GraphStatement) -> StoreResult<Table>;

    /// Run a statement that returns no rows.
    async fn execute(&self, statement: &GraphStatement) -> StoreResult<()>;
}

/// Run a SQL statement, returning an empty table on any failure.
pub async fn run_sql(store: &dyn RelationalStore, statement: &SqlStatement) -> Table {
    debug!(sql = %statement.sql, params = statement.params.len(), "Running SQL statement");
    match store.query(statement).await {
        Ok(table) => table,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Relational query failed, returning empty table");
            Table::empty()
        }
    }
}

/// Fetch from a document collection, returning an empty table on any
/// failure. The internal identifier column never survives.
pub async fn run_document_query(
    store: &dyn DocumentStore,
    collection: &str,
    pipeline: Option<&Pipeline>,
) -> Table {
    debug!(
        collection = %collection,
        stages = pipeline.map_or(0, Vec::len),
        "Running document query"
    );
    match store.find(collection, pipeline).await {
        Ok(mut table) => {
            table.drop_column(DOCUMENT_ID_FIELD);
            table
        }
        Err(e) => {
            error!(
                collection = %collection,
                kind = e.kind(),
                error = %e,
                "Document query failed, returning empty table"
            );
            Table::empty()
        }
    }
}

/// Run a graph statement, returning an empty table on any failure.
pub async fn run_graph_query(store: &dyn GraphStore, statement: &GraphStatement) -> Table {
    debug!(params = statement.params.len(), "Running graph query");
    match store.query(statement).await {
        Ok(table) => table,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Graph query failed, returning empty table");
            Table::empty()
        }
    }
}
