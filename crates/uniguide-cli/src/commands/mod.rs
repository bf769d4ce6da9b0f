//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

pub mod analytics;
pub mod browse;
pub mod edit;
pub mod schema;
pub mod serve;

/// University Guide - academic dashboard over MySQL, MongoDB and Neo4j
#[derive(Parser)]
#[command(name = "uniguide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./uniguide.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Serve(serve::ServeArgs),

    /// List all institutions
    Universities,

    /// Keywords reachable from an institution's faculty
    Keywords {
        /// Institution name
        institution: String,
    },

    /// Faculty of an institution
    Faculty {
        /// Institution name
        institution: String,
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Publications tagged with a keyword
    Publications {
        /// Keyword name
        keyword: String,
        /// Only titles or venues containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Top institutions collaborating with an institution
    Collaborators {
        /// Institution name
        institution: String,
    },

    /// Top faculty of an institution by keyword-weighted citations
    TopFaculty {
        /// Institution name
        institution: String,
        /// Keyword name
        keyword: String,
    },

    /// Change a faculty member's phone number
    SetPhone(edit::SetPhoneArgs),

    /// Change a publication's venue
    SetVenue(edit::SetVenueArgs),

    /// Create the relational view and graph indexes the dashboard reads
    InitSchema,

    /// Check connectivity to every store
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Universities => browse::universities(&config).await,
            Commands::Keywords { institution } => browse::keywords(&config, &institution).await,
            Commands::Faculty { institution, search } => {
                browse::faculty(&config, &institution, search.as_deref()).await
            }
            Commands::Publications { keyword, search } => {
                browse::publications(&config, &keyword, search.as_deref()).await
            }
            Commands::Collaborators { institution } => {
                analytics::collaborators(&config, &institution).await
            }
            Commands::TopFaculty { institution, keyword } => {
                analytics::top_faculty(&config, &institution, &keyword).await
            }
            Commands::SetPhone(args) => edit::set_phone(args, &config).await,
            Commands::SetVenue(args) => edit::set_venue(args, &config).await,
            Commands::InitSchema => schema::init_schema(&config).await,
            Commands::Status => schema::status(&config).await,
        }
    }
}
