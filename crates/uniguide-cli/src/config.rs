//! Store configuration: TOML file plus environment overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use uniguide_core::DuplicateKeyPolicy;
use uniguide_docs::DocumentConfig;
use uniguide_graph::GraphConfig;
use uniguide_sql::SqlConfig;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "uniguide.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sql: SqlConfig,
    pub documents: DocumentConfig,
    pub graph: GraphConfig,
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl AppConfig {
    /// Load from `path`, or from `uniguide.toml` in the working directory
    /// when present, then apply `UNIGUIDE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut String); 7] = [
            ("UNIGUIDE_MYSQL_URL", &mut self.sql.url),
            ("UNIGUIDE_MONGO_URL", &mut self.documents.url),
            ("UNIGUIDE_MONGO_DB", &mut self.documents.database),
            ("UNIGUIDE_NEO4J_URI", &mut self.graph.uri),
            ("UNIGUIDE_NEO4J_USER", &mut self.graph.user),
            ("UNIGUIDE_NEO4J_PASSWORD", &mut self.graph.password),
            ("UNIGUIDE_NEO4J_DB", &mut self.graph.database),
        ];
        for (key, field) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            duplicate_keys = "skip_ambiguous"

            [documents]
            database = "scratch"

            [graph]
            uri = "bolt://graph:7687"
            "#,
        )
        .unwrap();

        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::SkipAmbiguous);
        assert_eq!(config.documents.database, "scratch");
        assert_eq!(config.documents.url, DocumentConfig::default().url);
        assert_eq!(config.graph.uri, "bolt://graph:7687");
        assert_eq!(config.sql.url, SqlConfig::default().url);
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("UNIGUIDE_MYSQL_URL", "mysql://reader@db:3306/academicworld"),
            ("UNIGUIDE_NEO4J_PASSWORD", "secret"),
            ("UNIGUIDE_MONGO_DB", ""),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.sql.url, "mysql://reader@db:3306/academicworld");
        assert_eq!(config.graph.password, "secret");
        assert_eq!(config.documents.database, "academicworld");
        assert_eq!(config.graph.user, "neo4j");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/uniguide.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
