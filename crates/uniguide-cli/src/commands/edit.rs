//! Single-field edit commands.
//!
//! Each edit goes through the same reconciliation as a table save: the
//! current rows are fetched, one cell is changed, and only changed cells
//! are written back.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use uniguide_core::dashboard::{FACULTY_EDITABLE, FACULTY_KEY, PUBLICATION_EDITABLE, PUBLICATION_KEY};
use uniguide_core::{Table, Value};

use crate::config::AppConfig;
use crate::{output, stores};

#[derive(Args)]
pub struct SetPhoneArgs {
    /// Faculty member name
    pub name: String,
    /// New phone number
    pub phone: String,
    /// Institution the faculty member belongs to
    #[arg(short, long)]
    pub institution: String,
}

#[derive(Args)]
pub struct SetVenueArgs {
    /// Publication title
    pub title: String,
    /// New venue
    pub venue: String,
    /// A keyword the publication is tagged with
    #[arg(short, long)]
    pub keyword: String,
}

pub async fn set_phone(args: SetPhoneArgs, config: &AppConfig) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;

    let mut edited = dashboard.faculty(&args.institution, None).await;
    if !edit_cell(&mut edited, FACULTY_KEY, &args.name, FACULTY_EDITABLE, &args.phone) {
        bail!("No faculty member named '{}' at {}", args.name, args.institution);
    }

    let outcome = dashboard.save_faculty(&args.institution, None, &edited).await;
    println!("{} {}", "Phone for".bold(), args.name.cyan());
    output::print_report(&outcome.report);
    Ok(())
}

pub async fn set_venue(args: SetVenueArgs, config: &AppConfig) -> Result<()> {
    let dashboard = stores::open_dashboard(config).await?;

    let mut edited = dashboard.publications(&args.keyword, None).await;
    if !edit_cell(&mut edited, PUBLICATION_KEY, &args.title, PUBLICATION_EDITABLE, &args.venue) {
        bail!("No publication titled '{}' under keyword {}", args.title, args.keyword);
    }

    let outcome = dashboard.save_publications(&args.keyword, None, &edited).await;
    println!("{} {}", "Venue for".bold(), args.title.cyan());
    output::print_report(&outcome.report);
    Ok(())
}

/// Set `field` on the first row whose `key_field` displays as `key`.
/// Returns false when no row carries the key.
fn edit_cell(table: &mut Table, key_field: &str, key: &str, field: &str, value: &str) -> bool {
    let Some(idx) = table
        .rows()
        .position(|row| row.text(key_field).as_deref() == Some(key))
    else {
        return false;
    };
    table.set(idx, field, Value::from(value))
}
