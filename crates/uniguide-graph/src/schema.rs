//! Neo4j index hints for the dashboard queries.

use tracing::info;
use uniguide_core::store::{GraphStatement, GraphStore};
use uniguide_core::StoreResult;

/// Both analytics queries anchor on a named institution, and the citation
/// ranking on a named keyword.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE INDEX institute_name_idx IF NOT EXISTS FOR (n:INSTITUTE) ON (n.name)",
    "CREATE INDEX keyword_name_idx IF NOT EXISTS FOR (k:KEYWORD) ON (k.name)",
];

/// Create the lookup indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(store: &dyn GraphStore) -> StoreResult<()> {
    info!("Initializing Neo4j indexes...");

    for statement in SCHEMA_STATEMENTS {
        store.execute(&GraphStatement::new(*statement, &[])).await?;
    }

    info!("Neo4j indexes initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uniguide_core::{StoreError, Table};

    #[derive(Default)]
    struct RecordingGraph {
        executed: Mutex<Vec<String>>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl GraphStore for RecordingGraph {
        async fn query(&self, _: &GraphStatement) -> StoreResult<Table> {
            Ok(Table::empty())
        }

        async fn execute(&self, statement: &GraphStatement) -> StoreResult<()> {
            let mut executed = self.executed.lock().unwrap();
            if self.fail_after == Some(executed.len()) {
                return Err(StoreError::query("index creation refused"));
            }
            executed.push(statement.cypher.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_creates_every_index() {
        let graph = RecordingGraph::default();
        initialize_schema(&graph).await.unwrap();

        let executed = graph.executed.lock().unwrap();
        assert_eq!(executed.len(), 2);
        assert!(executed.iter().all(|c| c.contains("IF NOT EXISTS")));
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let graph = RecordingGraph {
            fail_after: Some(1),
            ..RecordingGraph::default()
        };
        assert!(initialize_schema(&graph).await.is_err());
        assert_eq!(graph.executed.lock().unwrap().len(), 1);
    }
}
