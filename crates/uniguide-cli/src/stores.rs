//! Store clients wired into a dashboard.

use anyhow::Result;
use std::sync::Arc;

use uniguide_core::Dashboard;
use uniguide_docs::DocumentClient;
use uniguide_graph::GraphClient;
use uniguide_sql::SqlClient;

use crate::config::AppConfig;

/// Connected store clients.
///
/// Pools are created lazily; an unreachable store only surfaces as an empty
/// panel when it is first queried.
pub struct Stores {
    pub sql: SqlClient,
    pub docs: DocumentClient,
    pub graph: GraphClient,
}

impl Stores {
    pub async fn open(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            sql: SqlClient::connect_lazy(&config.sql)?,
            docs: DocumentClient::connect_lazy(&config.documents).await?,
            graph: GraphClient::connect_lazy(&config.graph).await?,
        })
    }

    pub fn dashboard(&self, config: &AppConfig) -> Dashboard {
        Dashboard::new(
            Arc::new(self.sql.clone()),
            Arc::new(self.docs.clone()),
            Arc::new(self.graph.clone()),
        )
        .with_duplicate_policy(config.duplicate_keys)
    }
}

/// Open every store and build the dashboard over them.
pub async fn open_dashboard(config: &AppConfig) -> Result<Dashboard> {
    Ok(Stores::open(config).await?.dashboard(config))
}
