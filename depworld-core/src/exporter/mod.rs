//! Exporters turning the consolidated world into output records.

pub mod json;
pub mod records;

pub use records::{project, project_entry, DEPENDENCY_SEPARATOR};
