//! MongoDB connection client.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use uniguide_core::store::{DocumentStore, Pipeline};
use uniguide_core::{StoreError, StoreResult, Table};

use crate::convert::documents_to_table;

/// Configuration for connecting to MongoDB.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub url: String,
    pub database: String,
    pub server_selection_timeout_secs: u64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://127.0.0.1:27017/".to_string(),
            database: "academicworld".to_string(),
            server_selection_timeout_secs: 10,
        }
    }
}

/// MongoDB error types.
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("MongoDB connection error: {0}")]
    Connection(mongodb::error::Error),

    #[error("MongoDB query failed: {0}")]
    Query(mongodb::error::Error),

    #[error("Invalid pipeline stage: {0}")]
    Pipeline(#[from] bson::ser::Error),
}

/// Result type for MongoDB operations.
pub type DocsResult<T> = Result<T, DocsError>;

impl From<mongodb::error::Error> for DocsError {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => Self::Connection(e),
            _ => Self::Query(e),
        }
    }
}

impl From<DocsError> for StoreError {
    fn from(e: DocsError) -> Self {
        match e {
            DocsError::Connection(_) => StoreError::connection(e.to_string()),
            DocsError::Query(_) => StoreError::query(e.to_string()),
            DocsError::Pipeline(_) => StoreError::shape(e.to_string()),
        }
    }
}

/// Client for the document store.
///
/// The driver pools connections internally; cloning shares the pool.
#[derive(Clone)]
pub struct DocumentClient {
    db: Database,
}

impl DocumentClient {
    /// Create a client without contacting the server. A down server shows
    /// up on the first query, after the server selection timeout.
    pub async fn connect_lazy(config: &DocumentConfig) -> DocsResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));
        options.app_name.get_or_insert_with(|| "uniguide".to_string());

        let client = Client::with_options(options)?;
        Ok(Self {
            db: client.database(&config.database),
        })
    }

    /// Create a client and ping the server.
    pub async fn connect(config: &DocumentConfig) -> DocsResult<Self> {
        let client = Self::connect_lazy(config).await?;
        client.db.run_command(doc! { "ping": 1 }).await?;
        info!(database = %config.database, "Connected to MongoDB");
        Ok(client)
    }

    /// Fetch a collection, or the output of `pipeline` when it has stages.
    pub async fn fetch_table(
        &self,
        collection: &str,
        pipeline: Option<&Pipeline>,
    ) -> DocsResult<Table> {
        let coll = self.db.collection::<Document>(collection);

        let cursor = match pipeline {
            Some(stages) if !stages.is_empty() => {
                let stages = stages
                    .iter()
                    .map(bson::to_document)
                    .collect::<Result<Vec<_>, _>>()?;
                coll.aggregate(stages).await?
            }
            _ => coll.find(doc! {}).await?,
        };

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents_to_table(documents))
    }

    /// `$set` one field on the first document whose `key_field` equals
    /// `key`. Returns the matched count.
    pub async fn update_field(
        &self,
        collection: &str,
        key_field: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> DocsResult<u64> {
        let mut filter = Document::new();
        filter.insert(key_field, key);
        let mut assignment = Document::new();
        assignment.insert(field, value);

        let result = self
            .db
            .collection::<Document>(collection)
            .update_one(filter, doc! { "$set": assignment })
            .await?;
        Ok(result.matched_count)
    }
}

#[async_trait]
impl DocumentStore for DocumentClient {
    async fn find(&self, collection: &str, pipeline: Option<&Pipeline>) -> StoreResult<Table> {
        Ok(self.fetch_table(collection, pipeline).await?)
    }

    async fn set_field(
        &self,
        collection: &str,
        key_field: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<u64> {
        Ok(self.update_field(collection, key_field, key, field, value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniguide_core::store::run_document_query;

    fn unreachable() -> DocumentConfig {
        DocumentConfig {
            url: "mongodb://127.0.0.1:1/".to_string(),
            database: "academicworld".to_string(),
            server_selection_timeout_secs: 1,
        }
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: DocumentConfig = serde_json::from_str(r#"{"database": "scratch"}"#).unwrap();
        assert_eq!(config.database, "scratch");
        assert_eq!(config.url, "mongodb://127.0.0.1:27017/");
    }

    #[tokio::test]
    async fn test_unreachable_server_yields_empty_table() {
        let client = DocumentClient::connect_lazy(&unreachable()).await.unwrap();

        let err = client.fetch_table("faculty", None).await.unwrap_err();
        assert!(matches!(err, DocsError::Connection(_)));

        let pipeline = vec![serde_json::json!({ "$match": { "affiliation.name": "MIT" } })];
        let table = run_document_query(&client, "faculty", Some(&pipeline)).await;
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_stage_is_rejected() {
        let client = DocumentClient::connect_lazy(&unreachable()).await.unwrap();
        let pipeline = vec![serde_json::json!("not a stage")];

        let err = client.fetch_table("faculty", Some(&pipeline)).await.unwrap_err();
        assert!(matches!(err, DocsError::Pipeline(_)));
    }
}
