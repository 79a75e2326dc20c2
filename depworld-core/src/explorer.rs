//! Tree view over the dependency world.
//!
//! Targets are the roots. Below an entry rooted at target `T`, each raw
//! dependency id `d` resolves to the world entry `T/d`. Ids without an entry
//! show up as unresolved leaves. Each entry is expanded at most once per
//! target tree; later references to it, including cycles back up the path,
//! are emitted as repeated leaves.

use crate::graph::World;
use crate::keys;
use crate::registry::NodeId;
use crate::types::{DependencyType, Node};
use serde::Serialize;
use std::collections::HashSet;

/// Options controlling tree expansion.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Maximum depth below a root (None = unlimited).
    pub max_depth: Option<usize>,
    /// Drop dependency ids that have no world entry.
    pub hide_unresolved: bool,
}

/// How a tree entry relates to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Resolved,
    /// Referenced id with no world entry.
    Unresolved,
    /// Entry already expanded elsewhere in the same tree.
    Repeated,
}

/// One entry of the dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTree {
    /// World key (or the would-be key for unresolved ids).
    pub key: String,
    /// Display label.
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<DependencyType>,
    pub state: EntryState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyTree>,
}

/// Build one tree per target entry, in world order.
pub fn build_forest(world: &World, options: &TreeOptions) -> Vec<DependencyTree> {
    world
        .iter()
        .filter(|(_, node)| node.is_target())
        .filter_map(|(key, _)| build_target_tree(world, key, options))
        .collect()
}

/// Build the tree rooted at a single target. None if it has no entry.
pub fn build_target_tree(
    world: &World,
    target: &str,
    options: &TreeOptions,
) -> Option<DependencyTree> {
    let (key, node) = world.entry(target)?;
    let mut expanded = HashSet::from([world.id_of(key)?]);
    Some(expand(world, key, key, node, options, &mut expanded, 0))
}

fn expand(
    world: &World,
    target: &str,
    key: &str,
    node: &Node,
    options: &TreeOptions,
    expanded: &mut HashSet<NodeId>,
    depth: usize,
) -> DependencyTree {
    let mut tree = resolved_entry(key, node, EntryState::Resolved);
    if options.max_depth.is_some_and(|max| depth >= max) {
        return tree;
    }

    for dep in node.dependencies() {
        let child_key = keys::child_key(target, dep);
        match (world.id_of(&child_key), world.get(&child_key)) {
            // insert() is false for ids already expanded in this tree
            (Some(id), Some(child)) if !expanded.insert(id) => {
                tree.children
                    .push(resolved_entry(&child_key, child, EntryState::Repeated));
            }
            (Some(_), Some(child)) => {
                tree.children.push(expand(
                    world,
                    target,
                    &child_key,
                    child,
                    options,
                    expanded,
                    depth + 1,
                ));
            }
            _ if options.hide_unresolved => {}
            _ => tree.children.push(DependencyTree {
                key: child_key,
                label: dep.clone(),
                version: String::new(),
                dependency_type: None,
                state: EntryState::Unresolved,
                children: Vec::new(),
            }),
        }
    }

    tree
}

fn resolved_entry(key: &str, node: &Node, state: EntryState) -> DependencyTree {
    DependencyTree {
        key: key.to_string(),
        label: label(key, node),
        version: node.version().to_string(),
        dependency_type: Some(node.dependency_type().clone()),
        state,
        children: Vec::new(),
    }
}

/// Targets show their key; packages and files their name when they have one.
fn label(key: &str, node: &Node) -> String {
    if node.is_target() {
        key.to_string()
    } else if node.name().is_empty() {
        // raw id: everything after the target segment
        key.split_once(keys::KEY_SEPARATOR)
            .map_or(key, |(_, raw)| raw)
            .to_string()
    } else {
        node.name().to_string()
    }
}
