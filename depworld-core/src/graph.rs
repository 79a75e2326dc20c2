//! Graph builder: consolidates edge records into the dependency world.
//!
//! The world maps composite keys (see [`crate::keys`]) to nodes. Each edge
//! record is applied in two steps:
//!
//! 1. the child is registered under `{target}/{child}` when the matching
//!    lookup table knows it;
//! 2. the child id is appended to the parent at
//!    `world_key(target, package)`, materializing the parent from the
//!    package or target table on first use.
//!
//! Package edges run before file edges. Anything that cannot be resolved is
//! dropped without error; the [`ConsolidationReport`] counts what was dropped.
//!
//! # Architecture
//!
//! ```text
//! definitions -> Registry (templates) -> GraphBuilder -> World (copies)
//! ```

use crate::ci_map::CaseInsensitiveMap;
use crate::keys;
use crate::registry::{NodeArena, NodeId, Registry};
use crate::types::{metadata, Item, Node};
use serde::Serialize;

/// File group of the only file edges that become part of the world.
pub const COMPILE_TIME_ASSEMBLY: &str = "CompileTimeAssembly";

/// Suffix marking a "no files in this group" placeholder entry.
pub const PLACEHOLDER_SUFFIX: &str = "_._";

/// The consolidated dependency world.
///
/// Every entry owns its own node slot, so appending to one entry never
/// affects another entry or the registry templates it was copied from.
#[derive(Debug, Default, Clone)]
pub struct World {
    arena: NodeArena,
    entries: CaseInsensitiveMap<NodeId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key).map(|&id| &self.arena[id])
    }

    /// Entry at `key` with the key spelled as first inserted.
    pub fn entry(&self, key: &str) -> Option<(&str, &Node)> {
        self.entries
            .get_key_value(key)
            .map(|(stored, &id)| (stored, &self.arena[id]))
    }

    /// Arena index of the entry at `key`.
    pub fn id_of(&self, key: &str) -> Option<NodeId> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, &id)| (key, &self.arena[id]))
    }

    /// Copy `template` into a fresh slot stored at `key`.
    fn materialize(&mut self, key: String, template: &Node) -> NodeId {
        let id = self.arena.alloc(template.clone());
        self.entries.insert(key, id);
        id
    }

    /// Append `child` to the entry at `key`. Returns false when absent.
    fn append_dependency(&mut self, key: &str, child: &str) -> bool {
        match self.entries.get(key) {
            Some(&id) => {
                self.arena[id].push_dependency(child);
                true
            }
            None => false,
        }
    }
}

/// Counters describing what a consolidation kept and dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsolidationReport {
    pub targets_registered: usize,
    pub packages_registered: usize,
    pub files_registered: usize,
    /// Target definitions skipped as target/rid pairings.
    pub runtime_targets_skipped: usize,
    pub package_edges: usize,
    pub file_edges: usize,
    /// Edges skipped because their parent target is a target/rid pairing.
    pub runtime_edges_skipped: usize,
    /// File edges outside the compile-time group, or placeholders.
    pub file_edges_filtered: usize,
    /// Children linked to a parent without a world entry of their own.
    pub unknown_children: usize,
    /// Edges whose parent could not be found in any table.
    pub unresolved_parents: usize,
    pub world_entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Package,
    File,
}

/// Incrementally applies edge lists to a [`World`].
pub struct GraphBuilder<'a> {
    registry: &'a Registry,
    world: World,
    report: ConsolidationReport,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        let report = ConsolidationReport {
            targets_registered: registry.target_count(),
            packages_registered: registry.package_count(),
            files_registered: registry.file_count(),
            runtime_targets_skipped: registry.skipped_targets(),
            ..ConsolidationReport::default()
        };
        Self {
            registry,
            world: World::new(),
            report,
        }
    }

    /// Apply package edges in input order.
    pub fn add_package_edges(&mut self, edges: &[Item]) {
        for edge in edges {
            self.report.package_edges += 1;
            self.add_edge(edge, EdgeKind::Package);
        }
    }

    /// Apply file edges in input order.
    pub fn add_file_edges(&mut self, edges: &[Item]) {
        for edge in edges {
            self.report.file_edges += 1;

            let file_group = edge.metadata(metadata::FILE_GROUP);
            if file_group != COMPILE_TIME_ASSEMBLY || edge.item_spec.ends_with(PLACEHOLDER_SUFFIX)
            {
                self.report.file_edges_filtered += 1;
                continue;
            }

            self.add_edge(edge, EdgeKind::File);
        }
    }

    fn add_edge(&mut self, edge: &Item, kind: EdgeKind) {
        let child = edge.item_spec.as_str();
        let parent_target = edge.metadata(metadata::PARENT_TARGET);
        if keys::is_runtime_pairing(parent_target) {
            self.report.runtime_edges_skipped += 1;
            return;
        }
        let parent_package = edge.metadata(metadata::PARENT_PACKAGE);

        // register the child under its target
        let child_key = keys::child_key(parent_target, child);
        if !self.world.contains_key(&child_key) {
            let template = match kind {
                EdgeKind::Package => self.registry.package(child),
                EdgeKind::File => self.registry.file(child),
            };
            match template {
                Some(template) => {
                    self.world.materialize(child_key, template);
                }
                None => {
                    tracing::debug!(child, parent_target, ?kind, "Child has no definition");
                    self.report.unknown_children += 1;
                }
            }
        }

        // link the parent
        let parent_key = keys::world_key(parent_target, parent_package);
        if self.world.append_dependency(&parent_key, child) {
            return;
        }

        let template = if parent_package.is_empty() {
            self.registry.target(parent_target)
        } else {
            self.registry.package(parent_package)
        };
        let Some(template) = template else {
            tracing::debug!(
                child,
                parent_target,
                parent_package,
                "Dropping edge with unresolved parent"
            );
            self.report.unresolved_parents += 1;
            return;
        };

        let id = self.world.materialize(parent_key, template);
        self.world.arena[id].push_dependency(child);
    }

    /// Finish building and hand out the world with its report.
    pub fn finish(mut self) -> (World, ConsolidationReport) {
        self.report.world_entries = self.world.len();
        tracing::info!(
            entries = self.report.world_entries,
            package_edges = self.report.package_edges,
            file_edges = self.report.file_edges,
            unresolved_parents = self.report.unresolved_parents,
            "Consolidated dependency world"
        );
        (self.world, self.report)
    }
}
