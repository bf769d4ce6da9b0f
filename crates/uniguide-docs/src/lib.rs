//! # University Guide Docs
//!
//! MongoDB adapter: runs finds and aggregation pipelines against the
//! `academicworld` database, converts BSON documents into a typed
//! [`uniguide_core::Table`], and applies single-field updates.

pub mod client;
pub mod convert;

pub use client::{DocsError, DocsResult, DocumentClient, DocumentConfig};
pub use convert::{bson_to_value, documents_to_table};
