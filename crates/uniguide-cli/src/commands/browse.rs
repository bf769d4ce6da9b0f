//! Read-only table commands.

use anyhow::Result;
use colored::Colorize;

use crate::config::AppConfig;
use crate::{output, stores};

pub async fn universities(config: &AppConfig) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;
    output::print_table(&dashboard.universities().await);
    Ok(())
}

pub async fn keywords(config: &AppConfig, institution: &str) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;
    let keywords = dashboard.keywords(institution).await;
    output::print_list(&format!("Keywords for {}", institution), &keywords);
    Ok(())
}

pub async fn faculty(config: &AppConfig, institution: &str, search: Option<&str>) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;

    match dashboard.institution(institution).await {
        Some(info) => output::print_institution(&info),
        None => println!("{} {}\n", "Unknown institution:".yellow(), institution),
    }

    output::print_table(&dashboard.faculty(institution, search).await);
    Ok(())
}

pub async fn publications(config: &AppConfig, keyword: &str, search: Option<&str>) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;
    output::print_table(&dashboard.publications(keyword, search).await);
    Ok(())
}
