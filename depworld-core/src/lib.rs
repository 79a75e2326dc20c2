//! depworld core - consolidation of build-resolution records.
//!
//! Build systems resolve a project into flat record sets: targets, packages,
//! files, and two edge lists saying which package or file sits under which
//! parent. This crate folds them into one dependency "world" keyed by
//! composite identity, ready to be shown as a tree.
//!
//! # Pipeline
//!
//! - **Registry**: lookup tables for targets, packages and files
//! - **Keys**: composite `target[/id]` keys
//! - **Graph builder**: applies package edges, then file edges
//! - **Exporter**: projects the world into output records
//! - **Explorer**: tree view rooted at each target
//!
//! # Usage
//!
//! ```
//! use depworld_core::{consolidate, InputBundle, Item};
//!
//! let bundle = InputBundle {
//!     target_definitions: vec![Item::new("net6.0")],
//!     package_definitions: vec![Item::new("PkgA").with_metadata("Type", "Package")],
//!     package_dependencies: vec![Item::new("PkgA")
//!         .with_metadata("ParentTarget", "net6.0")
//!         .with_metadata("ParentPackage", "")],
//!     ..Default::default()
//! };
//!
//! let consolidation = consolidate(&bundle);
//! let records = consolidation.records();
//! assert_eq!(records.len(), 2);
//! ```
//!
//! Consolidation is best effort: unknown ids and unresolvable parents are
//! dropped silently and never reported as errors.

pub mod ci_map;
pub mod error;
pub mod explorer;
pub mod exporter;
pub mod graph;
pub mod keys;
pub mod registry;
pub mod types;

pub use error::{DepworldError, Result};
pub use graph::{ConsolidationReport, GraphBuilder, World};
pub use registry::Registry;
pub use types::{DependencyType, InputBundle, Item, Node, OutputRecord};

/// Result of one consolidation run.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub world: World,
    pub report: ConsolidationReport,
}

impl Consolidation {
    /// Project the world into output records.
    pub fn records(&self) -> Vec<OutputRecord> {
        exporter::project(&self.world)
    }
}

/// Run the full pipeline over one input bundle.
///
/// Builds fresh lookup tables and a fresh world; nothing is shared between
/// calls.
pub fn consolidate(bundle: &InputBundle) -> Consolidation {
    let registry = Registry::build(
        &bundle.target_definitions,
        &bundle.package_definitions,
        &bundle.file_definitions,
    );

    let mut builder = GraphBuilder::new(&registry);
    builder.add_package_edges(&bundle.package_dependencies);
    builder.add_file_edges(&bundle.file_dependencies);
    let (world, report) = builder.finish();

    Consolidation { world, report }
}
