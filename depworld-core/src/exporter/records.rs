//! Projection of the world into flat output records.

use crate::graph::World;
use crate::types::{Node, OutputRecord};

/// Separator used when flattening `dependencies`. Ids are not escaped.
pub const DEPENDENCY_SEPARATOR: &str = ";";

/// Project every world entry into an output record, in world order.
pub fn project(world: &World) -> Vec<OutputRecord> {
    world
        .iter()
        .map(|(key, node)| project_entry(key, node))
        .collect()
}

/// Project one entry.
pub fn project_entry(key: &str, node: &Node) -> OutputRecord {
    OutputRecord {
        item_spec: key.to_string(),
        runtime_identifier: node.runtime_identifier().to_string(),
        target_framework: node.target_framework_moniker().to_string(),
        framework_name: node.framework_name().to_string(),
        framework_version: node.framework_version().to_string(),
        name: node.name().to_string(),
        version: node.version().to_string(),
        dependency_type: node.dependency_type().to_string(),
        path: node.path().to_string(),
        dependencies: node.dependencies().join(DEPENDENCY_SEPARATOR),
    }
}
