//! Entity registry: lookup tables built from definition records.
//!
//! Targets, packages and files are registered once into an arena of template
//! nodes. The three tables map identity strings to arena indices and are
//! read-only once [`Registry::build`] returns. The graph builder copies
//! templates out of the registry; it never mutates them.

use crate::ci_map::CaseInsensitiveMap;
use crate::keys;
use crate::types::{metadata, DependencyType, Item, Node};
use std::ops::{Index, IndexMut};

/// Stable index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only node storage addressed by [`NodeId`].
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Build a target node from a target definition.
pub fn target_node(def: &Item) -> Node {
    Node::target(
        def.metadata(metadata::RUNTIME_IDENTIFIER),
        def.metadata(metadata::TARGET_FRAMEWORK),
        def.metadata(metadata::FRAMEWORK_NAME),
        def.metadata(metadata::FRAMEWORK_VERSION),
    )
}

/// Build a package node from a package definition.
pub fn package_node(def: &Item) -> Node {
    Node::dependency(
        def.metadata(metadata::NAME),
        def.metadata(metadata::VERSION),
        DependencyType::or_override(def.metadata(metadata::TYPE), DependencyType::Package),
        def.metadata(metadata::PATH),
    )
}

/// Build a file node from a file definition.
///
/// The name is the last segment of the identity; `Path` is kept verbatim.
pub fn file_node(def: &Item) -> Node {
    Node::dependency(
        file_name(&def.item_spec),
        "",
        DependencyType::or_override(def.metadata(metadata::TYPE), DependencyType::Assembly),
        def.metadata(metadata::PATH),
    )
}

/// Final path segment, accepting both `/` and `\` as separators.
fn file_name(spec: &str) -> &str {
    spec.rsplit(['/', '\\']).next().unwrap_or(spec)
}

/// The three lookup tables and the arena backing them.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    arena: NodeArena,
    targets: CaseInsensitiveMap<NodeId>,
    packages: CaseInsensitiveMap<NodeId>,
    files: CaseInsensitiveMap<NodeId>,
    skipped_targets: usize,
}

impl Registry {
    /// Register all definitions. Duplicate identities overwrite earlier ones.
    pub fn build(targets: &[Item], packages: &[Item], files: &[Item]) -> Self {
        let mut registry = Self {
            targets: CaseInsensitiveMap::with_capacity(targets.len()),
            packages: CaseInsensitiveMap::with_capacity(packages.len()),
            files: CaseInsensitiveMap::with_capacity(files.len()),
            ..Self::default()
        };

        for def in targets {
            if keys::is_runtime_pairing(&def.item_spec) {
                tracing::debug!(target_id = %def.item_spec, "Skipping target/rid definition");
                registry.skipped_targets += 1;
                continue;
            }
            Self::register(
                &mut registry.arena,
                &mut registry.targets,
                &def.item_spec,
                target_node(def),
            );
        }

        for def in packages {
            Self::register(
                &mut registry.arena,
                &mut registry.packages,
                &def.item_spec,
                package_node(def),
            );
        }

        for def in files {
            Self::register(
                &mut registry.arena,
                &mut registry.files,
                &def.item_spec,
                file_node(def),
            );
        }

        registry
    }

    /// Last write wins: an existing slot is overwritten in place.
    fn register(
        arena: &mut NodeArena,
        table: &mut CaseInsensitiveMap<NodeId>,
        id: &str,
        node: Node,
    ) {
        match table.get(id) {
            Some(&existing) => arena[existing] = node,
            None => {
                let slot = arena.alloc(node);
                table.insert(id, slot);
            }
        }
    }

    pub fn target(&self, id: &str) -> Option<&Node> {
        self.targets.get(id).map(|&slot| &self.arena[slot])
    }

    pub fn package(&self, id: &str) -> Option<&Node> {
        self.packages.get(id).map(|&slot| &self.arena[slot])
    }

    pub fn file(&self, id: &str) -> Option<&Node> {
        self.files.get(id).map(|&slot| &self.arena[slot])
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Target definitions rejected as target/rid pairings.
    pub fn skipped_targets(&self) -> usize {
        self.skipped_targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(spec: &str) -> Item {
        Item::new(spec)
    }

    fn package(spec: &str, name: &str, version: &str) -> Item {
        Item::new(spec)
            .with_metadata("Name", name)
            .with_metadata("Version", version)
            .with_metadata("Path", format!("{}/{}", name.to_lowercase(), version))
    }

    #[test]
    fn test_runtime_pairings_are_not_targets() {
        let registry = Registry::build(
            &[target("net6.0"), target("net6.0/win-x64")],
            &[],
            &[],
        );

        assert_eq!(registry.target_count(), 1);
        assert!(registry.target("net6.0").is_some());
        assert!(registry.target("net6.0/win-x64").is_none());
        assert_eq!(registry.skipped_targets(), 1);
    }

    #[test]
    fn test_target_metadata() {
        let def = Item::new(".NETCoreApp,Version=v6.0")
            .with_metadata("RuntimeIdentifier", "")
            .with_metadata("TargetFramework", "net6.0")
            .with_metadata("FrameworkName", ".NETCoreApp")
            .with_metadata("FrameworkVersion", "6.0");
        let registry = Registry::build(&[def], &[], &[]);

        let node = registry.target(".NETCoreApp,Version=v6.0").unwrap();
        assert_eq!(node.dependency_type(), &DependencyType::Target);
        assert_eq!(node.target_framework_moniker(), "net6.0");
        assert_eq!(node.framework_name(), ".NETCoreApp");
        assert_eq!(node.framework_version(), "6.0");
        assert_eq!(node.name(), "");
    }

    #[test]
    fn test_package_type_defaults_and_overrides() {
        let plain = package("PkgA/1.0.0", "PkgA", "1.0.0");
        let project = package("ProjB/1.0.0", "ProjB", "1.0.0").with_metadata("Type", "Project");
        let registry = Registry::build(&[], &[plain, project], &[]);

        let a = registry.package("PkgA/1.0.0").unwrap();
        assert_eq!(a.dependency_type(), &DependencyType::Package);
        assert_eq!(a.name(), "PkgA");
        assert_eq!(a.version(), "1.0.0");
        assert_eq!(a.path(), "pkga/1.0.0");

        let b = registry.package("ProjB/1.0.0").unwrap();
        assert_eq!(
            b.dependency_type(),
            &DependencyType::Other("Project".to_string())
        );
    }

    #[test]
    fn test_file_name_is_last_segment() {
        let files = [
            Item::new("lib/net6.0/PkgA.dll").with_metadata("Path", "C:/nuget/pkga/lib/net6.0/PkgA.dll"),
            Item::new(r"ref\netstandard2.0\PkgB.dll").with_metadata("Type", "FrameworkAssembly"),
            Item::new("System.Runtime"),
        ];
        let registry = Registry::build(&[], &[], &files);

        let a = registry.file("lib/net6.0/PkgA.dll").unwrap();
        assert_eq!(a.name(), "PkgA.dll");
        assert_eq!(a.path(), "C:/nuget/pkga/lib/net6.0/PkgA.dll");
        assert_eq!(a.dependency_type(), &DependencyType::Assembly);

        let b = registry.file(r"ref\netstandard2.0\PkgB.dll").unwrap();
        assert_eq!(b.name(), "PkgB.dll");
        assert_eq!(
            b.dependency_type(),
            &DependencyType::Other("FrameworkAssembly".to_string())
        );

        assert_eq!(registry.file("System.Runtime").unwrap().name(), "System.Runtime");
    }

    #[test]
    fn test_duplicate_definitions_last_wins() {
        let registry = Registry::build(
            &[],
            &[
                package("PkgA/1.0.0", "PkgA", "1.0.0"),
                package("pkga/1.0.0", "PkgA", "1.0.1"),
            ],
            &[],
        );

        assert_eq!(registry.package_count(), 1);
        assert_eq!(registry.package("PkgA/1.0.0").unwrap().version(), "1.0.1");
        assert_eq!(registry.arena.len(), 1);
    }

    #[test]
    fn test_tables_are_independent() {
        let registry = Registry::build(
            &[target("shared")],
            &[package("shared", "Shared", "1.0.0")],
            &[Item::new("shared")],
        );

        assert!(registry.target("shared").unwrap().is_target());
        assert_eq!(
            registry.package("shared").unwrap().dependency_type(),
            &DependencyType::Package
        );
        assert_eq!(
            registry.file("shared").unwrap().dependency_type(),
            &DependencyType::Assembly
        );
    }
}
