//! # University Guide Core
//!
//! Store-agnostic pieces of the University Guide dashboard.
//!
//! Provides the typed tabular result shared by the relational, document and
//! graph adapters, the store traits those adapters implement, the derived
//! query assemblers, the edit reconciler, and the [`Dashboard`] that wires
//! them together for the HTTP API and the CLI.

pub mod chart;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod queries;
pub mod reconcile;
pub mod search;
pub mod store;
pub mod table;

pub use dashboard::{Dashboard, SaveOutcome};
pub use error::{StoreError, StoreResult};
pub use reconcile::{DuplicateKeyPolicy, EditSpec, ReconcileReport};
pub use store::{DocumentStore, GraphStatement, GraphStore, Pipeline, RelationalStore, SqlStatement};
pub use table::{DisplayTable, Table, Value};
