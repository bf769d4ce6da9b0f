//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::stores;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "logs/uniguide-serve.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;

    println!();
    println!("  {} {}", "University Guide".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}  http://{}:{}/api", "API".green(), args.host, args.port);
    if args.log {
        println!("  {}  {}", "Log".green(), args.log_file.display());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    uniguide_web::run_server(dashboard, &args.host, args.port).await?;

    Ok(())
}
