//! Relational schema the dashboard reads from.
//!
//! Tables `university`, `faculty`, `faculty_keyword` and `keyword` are
//! owned elsewhere. The keyword selector reads a join view over them, which
//! this module can (re)create.

use tracing::info;
use uniguide_core::store::{RelationalStore, SqlStatement};
use uniguide_core::StoreResult;

/// Keyword names reachable from each university through its faculty.
pub const UNIVERSITY_KEYWORDS_VIEW: &str = "CREATE OR REPLACE VIEW university_keywords_view AS
SELECT u.name AS university_name, k.name AS keyword
FROM university u
JOIN faculty f ON u.id = f.university_id
JOIN faculty_keyword fk ON f.id = fk.faculty_id
JOIN keyword k ON fk.keyword_id = k.id";

/// Create the views the dashboard depends on.
///
/// Safe to run multiple times.
pub async fn initialize_schema(store: &dyn RelationalStore) -> StoreResult<()> {
    info!("Creating relational views...");
    store
        .execute(&SqlStatement::new(UNIVERSITY_KEYWORDS_VIEW))
        .await?;
    info!("Relational views ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::Mutex;
    use uniguide_core::Table;

    #[derive(Default)]
    struct RecordingStore {
        executed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RelationalStore for RecordingStore {
        async fn query(&self, _: &SqlStatement) -> StoreResult<Table> {
            Ok(Table::empty())
        }

        async fn execute(&self, statement: &SqlStatement) -> StoreResult<u64> {
            self.executed.lock().unwrap().push(statement.sql.clone());
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_initialize_creates_keyword_view() {
        let store = RecordingStore::default();
        initialize_schema(&store).await.unwrap();
        assert_eq!(*store.executed.lock().unwrap(), vec![UNIVERSITY_KEYWORDS_VIEW.to_string()]);
    }

    #[test]
    fn test_view_exposes_expected_columns() {
        assert!(UNIVERSITY_KEYWORDS_VIEW.contains("university_keywords_view"));
        assert!(UNIVERSITY_KEYWORDS_VIEW.contains("u.name AS university_name"));
        assert!(UNIVERSITY_KEYWORDS_VIEW.contains("k.name AS keyword"));
    }
}
