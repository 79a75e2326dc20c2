//! Tree command - Show the dependency world as a tree
//!
//! Each target roots one tree; packages and files hang below the parents
//! the edge lists placed them under.

use super::{load_bundle, CommandError};
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter, TreeNode, TreeOutput};
use anyhow::Result;
use depworld_core::explorer::{self, DependencyTree, EntryState, TreeOptions};
use depworld_core::{consolidate, DependencyType, World};
use serde::Serialize;
use std::path::Path;

/// The rendered forest.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DependencyForest {
    roots: Vec<DependencyTree>,
}

/// One flattened tree entry for CSV output.
#[derive(Debug, Serialize)]
struct FlatEntry<'a> {
    depth: usize,
    key: &'a str,
    label: &'a str,
    version: &'a str,
    dependency_type: String,
    state: EntryState,
}

impl DependencyForest {
    fn flatten(&self) -> Vec<FlatEntry<'_>> {
        fn walk<'a>(tree: &'a DependencyTree, depth: usize, out: &mut Vec<FlatEntry<'a>>) {
            out.push(FlatEntry {
                depth,
                key: &tree.key,
                label: &tree.label,
                version: &tree.version,
                dependency_type: tree
                    .dependency_type
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                state: tree.state,
            });
            for child in &tree.children {
                walk(child, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, 0, &mut out);
        }
        out
    }
}

impl Outputter for DependencyForest {
    fn to_table(&self, config: &OutputConfig) -> String {
        self.to_tree(config)
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        let columns = vec![
            Column::new("depth", "depth"),
            Column::new("key", "key"),
            Column::new("label", "label"),
            Column::new("version", "version"),
            Column::new("type", "dependency_type"),
            Column::new("state", "state"),
        ];
        CsvOutput::format_with_columns(&self.flatten(), &columns, config)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let roots: Vec<TreeNode> = self.roots.iter().map(TreeNode::from).collect();
        TreeOutput::format_forest(&roots, config)
    }
}

/// Build the forest, optionally restricted to a single target.
pub fn build_forest(
    world: &World,
    target: Option<&str>,
    options: &TreeOptions,
) -> Result<DependencyForest> {
    let roots = match target {
        Some(target) => {
            let tree = explorer::build_target_tree(world, target, options)
                .filter(|tree| matches!(tree.dependency_type, Some(DependencyType::Target)))
                .ok_or_else(|| CommandError::TargetNotFound {
                    target: target.to_string(),
                    available: available_targets(world),
                })?;
            vec![tree]
        }
        None => explorer::build_forest(world, options),
    };
    Ok(DependencyForest { roots })
}

fn available_targets(world: &World) -> String {
    let targets: Vec<&str> = world
        .iter()
        .filter(|(_, node)| node.is_target())
        .map(|(key, _)| key)
        .collect();
    if targets.is_empty() {
        "none".to_string()
    } else {
        targets.join(", ")
    }
}

/// Run the tree command.
pub fn run(
    input: &Path,
    target: Option<&str>,
    options: TreeOptions,
    config: OutputConfig,
) -> Result<()> {
    let bundle = load_bundle(input)?;
    let consolidation = consolidate(&bundle);
    let forest = build_forest(&consolidation.world, target, &options)?;

    tracing::debug!(roots = forest.roots.len(), "Built dependency forest");
    Output::with_config(forest, config).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use depworld_core::{InputBundle, Item};

    fn world() -> World {
        let edge = |child: &str, target: &str, parent: &str| {
            Item::new(child)
                .with_metadata("ParentTarget", target)
                .with_metadata("ParentPackage", parent)
        };
        let bundle = InputBundle {
            target_definitions: vec![Item::new("net6.0"), Item::new("net48")],
            package_definitions: vec![Item::new("PkgA").with_metadata("Name", "PkgA")],
            package_dependencies: vec![
                edge("PkgA", "net6.0", ""),
                edge("PkgA", "net48", ""),
                edge("Ghost", "net48", "PkgA"),
            ],
            ..Default::default()
        };
        consolidate(&bundle).world
    }

    #[test]
    fn test_single_target() {
        let world = world();
        let forest = build_forest(&world, Some("NET48"), &TreeOptions::default()).unwrap();

        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].key, "net48");
    }

    #[test]
    fn test_unknown_target_lists_available() {
        let world = world();
        let err = build_forest(&world, Some("net7.0"), &TreeOptions::default()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("net7.0"));
        assert!(message.contains("net6.0, net48"));
    }

    #[test]
    fn test_package_key_is_not_a_target() {
        let world = world();
        assert!(build_forest(&world, Some("net6.0/PkgA"), &TreeOptions::default()).is_err());
    }

    #[test]
    fn test_render_ascii_tree() {
        let world = world();
        let forest = build_forest(&world, None, &TreeOptions::default()).unwrap();
        let config = OutputConfig::new(OutputFormat::Tree)
            .without_colors()
            .with_ascii(true);

        assert_eq!(
            forest.to_tree(&config),
            "net6.0\n`-- PkgA\nnet48\n`-- PkgA\n    `-- Ghost (unresolved)"
        );
    }

    #[test]
    fn test_csv_flattens_with_depth() {
        let world = world();
        let forest = build_forest(&world, Some("net48"), &TreeOptions::default()).unwrap();
        let config = OutputConfig::new(OutputFormat::Csv);
        let output = forest.to_csv(&config);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "depth,key,label,version,type,state");
        assert_eq!(lines[1], "0,net48,net48,,Target,resolved");
        assert_eq!(lines[2], "1,net48/PkgA,PkgA,,Package,resolved");
        assert_eq!(lines[3], "2,net48/Ghost,Ghost,,,unresolved");
    }
}
