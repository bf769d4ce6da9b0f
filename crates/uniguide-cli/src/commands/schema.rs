//! Schema setup and store health commands.

use anyhow::Result;
use colored::Colorize;
use uniguide_docs::DocumentClient;
use uniguide_graph::GraphClient;
use uniguide_sql::SqlClient;

use crate::config::AppConfig;

/// Create the keyword view and graph indexes. Safe to re-run.
pub async fn init_schema(config: &AppConfig) -> Result<()> {
    println!("{}", "Initializing schema...".bold());

    let sql = SqlClient::connect(&config.sql).await?;
    uniguide_sql::schema::initialize_schema(&sql).await?;
    println!("  {} MySQL view university_keywords_view", "✓".green());

    let graph = GraphClient::connect(&config.graph).await?;
    uniguide_graph::schema::initialize_schema(&graph).await?;
    println!("  {} Neo4j name indexes", "✓".green());

    Ok(())
}

/// Ping every store and report what answered.
pub async fn status(config: &AppConfig) -> Result<()> {
    println!("{}", "Store status".bold());
    println!();

    match SqlClient::connect(&config.sql).await {
        Ok(_) => println!("  {} {:10} {}", "✓".green(), "MySQL", redact(&config.sql.url).dimmed()),
        Err(e) => println!("  {} {:10} {}", "✗".red(), "MySQL", e.to_string().red()),
    }

    match DocumentClient::connect(&config.documents).await {
        Ok(_) => println!(
            "  {} {:10} {}",
            "✓".green(),
            "MongoDB",
            config.documents.database.dimmed()
        ),
        Err(e) => println!("  {} {:10} {}", "✗".red(), "MongoDB", e.to_string().red()),
    }

    match GraphClient::connect(&config.graph).await {
        Ok(graph) => match graph.get_counts().await {
            Ok(counts) => println!(
                "  {} {:10} {} nodes, {} relationships",
                "✓".green(),
                "Neo4j",
                counts.nodes,
                counts.relationships
            ),
            Err(e) => println!("  {} {:10} {}", "!".yellow(), "Neo4j", format!("{:#}", e).yellow()),
        },
        Err(e) => println!("  {} {:10} {}", "✗".red(), "Neo4j", format!("{:#}", e).red()),
    }

    Ok(())
}

/// Hide the password part of a connection URL.
fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_drops_password_only() {
        assert_eq!(
            redact("mysql://root:hunter2@db:3306/academicworld"),
            "mysql://root@db:3306/academicworld"
        );
        assert_eq!(redact("mysql://root@127.0.0.1:3306/x"), "mysql://root@127.0.0.1:3306/x");
        assert_eq!(redact("not a url"), "not a url");
    }
}
