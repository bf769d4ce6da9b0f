//! Graph analytics commands.

use anyhow::Result;
use colored::Colorize;
use uniguide_core::chart;

use crate::config::AppConfig;
use crate::{output, stores};

pub async fn collaborators(config: &AppConfig, institution: &str) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;
    let counts = dashboard.top_collaborators(institution).await;
    output::print_pie(&chart::collaborators_pie(&counts));
    Ok(())
}

pub async fn top_faculty(config: &AppConfig, institution: &str, keyword: &str) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;
    let scores = dashboard.top_faculty(institution, keyword).await;

    match chart::top_faculty_bars(&scores) {
        Some(bars) => output::print_bars(&bars),
        None => println!("{}", "No faculty publications for that keyword.".dimmed()),
    }
    Ok(())
}
