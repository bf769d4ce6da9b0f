//! Neo4j connection client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltNull, BoltType, ConfigBuilder, Graph, Query};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use uniguide_core::store::{GraphStatement, GraphStore};
use uniguide_core::{StoreError, StoreResult, Table, Value};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "uniguide_dev".to_string(),
            database: "academicworld".to_string(),
            max_connections: 8,
        }
    }
}

/// Client for the academic knowledge graph.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create the connection pool without opening a bolt session.
    ///
    /// neo4rs pools lazily, so an unreachable server only surfaces when the
    /// first statement runs.
    pub async fn connect_lazy(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(200)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        Ok(Self { graph })
    }

    /// Create the pool and force a real handshake with a `RETURN 1` ping,
    /// so callers get a fast failure when Neo4j is unreachable.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let client = Self::connect_lazy(config).await?;
        client
            .graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;
        info!(uri = %config.uri, "Connected to Neo4j");
        Ok(client)
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph.run(query).await.context("Neo4j query execution failed")?;
        Ok(())
    }

    /// Execute a Cypher query and return results as rows.
    ///
    /// The bolt session goes back to the pool once the stream is drained or
    /// dropped, whether or not the query succeeded.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await.context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.context("Failed to read Neo4j result")? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Run a statement and collect its declared columns into a table.
    pub async fn fetch_table(&self, statement: &GraphStatement) -> Result<Table> {
        let rows = self.query(to_query(statement)).await?;

        let mut table = Table::with_columns(statement.columns.iter().cloned());
        for row in rows {
            let mut values = Vec::with_capacity(statement.columns.len());
            for column in &statement.columns {
                let raw: serde_json::Value = row
                    .get(column)
                    .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", column, e))?;
                values.push(Value::from(raw));
            }
            table.push_row(values);
        }
        Ok(table)
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) as count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string());

        let node_count: i64 = self.query_scalar(node_query, "count").await?
            .unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            nodes: node_count as usize,
            relationships: rel_count as usize,
        })
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn query(&self, statement: &GraphStatement) -> StoreResult<Table> {
        self.fetch_table(statement).await.map_err(to_store_error)
    }

    async fn execute(&self, statement: &GraphStatement) -> StoreResult<()> {
        GraphClient::execute(self, to_query(statement))
            .await
            .map_err(to_store_error)
    }
}

/// Driver failures that mean the server could not be reached or refused
/// the session are connection errors; everything else is a query error.
fn to_store_error(e: anyhow::Error) -> StoreError {
    let message = format!("{:#}", e);
    match e.downcast_ref::<neo4rs::Error>() {
        Some(
            neo4rs::Error::IOError { .. }
            | neo4rs::Error::ConnectionError
            | neo4rs::Error::AuthenticationError(_)
            | neo4rs::Error::UnsupportedScheme(_)
            | neo4rs::Error::InvalidDnsName(_),
        ) => StoreError::connection(message),
        _ => StoreError::query(message),
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}

/// Build a driver query with every parameter bound.
fn to_query(statement: &GraphStatement) -> Query {
    statement
        .params
        .iter()
        .fold(Query::new(statement.cypher.clone()), |query, (key, value)| {
            query.param(key, to_bolt(value))
        })
}

fn to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => (*b).into(),
        Value::Int(i) => (*i).into(),
        Value::Float(x) => (*x).into(),
        Value::Text(s) => s.clone().into(),
        Value::List(items) => items.iter().map(to_bolt).collect::<Vec<_>>().into(),
        Value::Map(_) => value.to_string().into(),
    }
}
