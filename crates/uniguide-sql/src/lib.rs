//! # University Guide SQL
//!
//! MySQL adapter: runs parameterized statements through a shared sqlx pool
//! and shapes the rows into a typed [`uniguide_core::Table`].

pub mod client;
pub mod schema;

pub use client::{SqlClient, SqlConfig, SqlError, SqlResult};
