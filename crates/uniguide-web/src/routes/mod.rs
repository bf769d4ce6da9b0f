//! Route handlers.

pub mod analytics;
pub mod faculty;
pub mod publications;
pub mod universities;
