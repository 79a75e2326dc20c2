//! Tree output formatting for hierarchical display.
//!
//! Provides tree-style formatting similar to the `tree` command,
//! with Unicode box-drawing characters (or ASCII) for visual hierarchy.

use super::OutputConfig;
use colored::Colorize;
use depworld_core::explorer::{DependencyTree, EntryState};
use depworld_core::DependencyType;

/// Tree output formatter
pub struct TreeOutput;

/// Tree branch characters
struct TreeChars {
    /// Vertical line for continuing branches (|)
    pipe: &'static str,
    /// Branch for non-last items (|-)
    branch: &'static str,
    /// Branch for last item in a level (L-)
    last: &'static str,
    /// Spacing for items under last branch
    space: &'static str,
}

impl TreeChars {
    /// Unicode box-drawing characters
    const UNICODE: TreeChars = TreeChars {
        pipe: "\u{2502}   ",                 // |
        branch: "\u{251c}\u{2500}\u{2500} ", // |--
        last: "\u{2514}\u{2500}\u{2500} ",   // L--
        space: "    ",
    };

    /// ASCII fallback characters
    const ASCII: TreeChars = TreeChars {
        pipe: "|   ",
        branch: "|-- ",
        last: "`-- ",
        space: "    ",
    };

    fn get(config: &OutputConfig) -> &'static TreeChars {
        if config.ascii {
            &Self::ASCII
        } else {
            &Self::UNICODE
        }
    }
}

impl TreeOutput {
    /// Render a forest; each root is printed flush left.
    pub fn format_forest(roots: &[TreeNode], config: &OutputConfig) -> String {
        if roots.is_empty() {
            return "(no targets)".to_string();
        }
        roots
            .iter()
            .map(|root| Self::from_nodes(root, config))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a single root and its descendants.
    pub fn from_nodes(root: &TreeNode, config: &OutputConfig) -> String {
        let mut lines = vec![Self::format_label(root, config)];
        Self::format_nodes(&root.children, config, "", &mut lines);
        lines.join("\n")
    }

    /// Format tree nodes recursively
    fn format_nodes(
        nodes: &[TreeNode],
        config: &OutputConfig,
        prefix: &str,
        lines: &mut Vec<String>,
    ) {
        let chars = TreeChars::get(config);
        let len = nodes.len();

        for (i, node) in nodes.iter().enumerate() {
            let is_last = i == len - 1;
            let connector = if is_last { chars.last } else { chars.branch };
            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { chars.space } else { chars.pipe }
            );

            lines.push(format!(
                "{}{}{}",
                prefix,
                connector,
                Self::format_label(node, config)
            ));

            if !node.children.is_empty() {
                Self::format_nodes(&node.children, config, &child_prefix, lines);
            }
        }
    }

    fn format_label(node: &TreeNode, config: &OutputConfig) -> String {
        let name_str = if config.use_colors() {
            match node.kind {
                NodeKind::Target => node.name.blue().bold().to_string(),
                NodeKind::Package => node.name.bright_green().to_string(),
                NodeKind::Assembly => node.name.clone(),
                NodeKind::Unresolved => node.name.red().to_string(),
                NodeKind::Repeated => node.name.dimmed().to_string(),
                NodeKind::Other => node.name.bright_yellow().to_string(),
            }
        } else {
            node.name.clone()
        };

        let suffix = node
            .suffix
            .as_ref()
            .map(|s| {
                if config.use_colors() {
                    format!(" {}", s.dimmed())
                } else {
                    format!(" {}", s)
                }
            })
            .unwrap_or_default();

        format!("{}{}", name_str, suffix)
    }
}

/// A node in the tree structure
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Name of the node
    pub name: String,
    /// Kind of node (for coloring)
    pub kind: NodeKind,
    /// Optional suffix (e.g., version, marker)
    pub suffix: Option<String>,
    /// Child nodes
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            suffix: None,
            children: Vec::new(),
        }
    }

    /// Builder: add a suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Builder: add children
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

impl From<&DependencyTree> for TreeNode {
    fn from(tree: &DependencyTree) -> Self {
        let kind = match (tree.state, &tree.dependency_type) {
            (EntryState::Unresolved, _) => NodeKind::Unresolved,
            (EntryState::Repeated, _) => NodeKind::Repeated,
            (_, Some(DependencyType::Target)) => NodeKind::Target,
            (_, Some(DependencyType::Package)) => NodeKind::Package,
            (_, Some(DependencyType::Assembly)) => NodeKind::Assembly,
            _ => NodeKind::Other,
        };

        let mut notes = Vec::new();
        if !tree.version.is_empty() {
            notes.push(tree.version.clone());
        }
        match (tree.state, &tree.dependency_type) {
            (EntryState::Unresolved, _) => notes.push("(unresolved)".to_string()),
            (EntryState::Repeated, _) => notes.push("(*)".to_string()),
            (_, Some(DependencyType::Other(other))) => notes.push(format!("[{}]", other)),
            _ => {}
        }

        let node = TreeNode::new(tree.label.clone(), kind)
            .with_children(tree.children.iter().map(TreeNode::from).collect());
        if notes.is_empty() {
            node
        } else {
            node.with_suffix(notes.join(" "))
        }
    }
}

/// Kind of tree node for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    Target,
    Package,
    Assembly,
    /// Id referenced by a parent but missing from the world
    Unresolved,
    /// Already shown on the current path
    Repeated,
    #[default]
    Other,
}
