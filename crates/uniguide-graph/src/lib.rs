//! # University Guide Graph
//!
//! Neo4j adapter for the academic knowledge graph.
//!
//! Runs parameterized Cypher statements over a pooled bolt connection and
//! shapes the projected columns into a typed [`uniguide_core::Table`].

pub mod client;
pub mod schema;

pub use client::{GraphClient, GraphConfig, GraphCounts};
