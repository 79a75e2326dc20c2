//! Data models for build-resolution input and the consolidated world.
//!
//! Input records mirror the shape build systems hand over: an identity
//! string (`itemSpec`) plus a bag of named string metadata. Output records
//! carry the composite world key and a fixed set of metadata columns.

use crate::error::{DepworldError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Metadata names read from input records.
pub mod metadata {
    pub const RUNTIME_IDENTIFIER: &str = "RuntimeIdentifier";
    pub const TARGET_FRAMEWORK: &str = "TargetFramework";
    pub const FRAMEWORK_NAME: &str = "FrameworkName";
    pub const FRAMEWORK_VERSION: &str = "FrameworkVersion";
    pub const NAME: &str = "Name";
    pub const VERSION: &str = "Version";
    pub const TYPE: &str = "Type";
    pub const PATH: &str = "Path";
    pub const PARENT_TARGET: &str = "ParentTarget";
    pub const PARENT_PACKAGE: &str = "ParentPackage";
    pub const FILE_GROUP: &str = "FileGroup";
}

/// Kind of a world node.
///
/// Packages and files may carry a `Type` metadata override; known names map
/// to their variant and anything else is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyType {
    Target,
    Package,
    Assembly,
    Other(String),
}

impl DependencyType {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyType::Target => "Target",
            DependencyType::Package => "Package",
            DependencyType::Assembly => "Assembly",
            DependencyType::Other(s) => s,
        }
    }

    /// Resolve a `Type` override, falling back to `default` when empty.
    pub fn or_override(type_override: &str, default: DependencyType) -> Self {
        if type_override.is_empty() {
            default
        } else {
            DependencyType::from(type_override)
        }
    }
}

impl From<&str> for DependencyType {
    fn from(s: &str) -> Self {
        match s {
            "Target" => DependencyType::Target,
            "Package" => DependencyType::Package,
            "Assembly" => DependencyType::Assembly,
            other => DependencyType::Other(other.to_string()),
        }
    }
}

impl From<String> for DependencyType {
    fn from(s: String) -> Self {
        DependencyType::from(s.as_str())
    }
}

impl From<DependencyType> for String {
    fn from(t: DependencyType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vertex of the dependency world: a target, a package, or a file.
///
/// Identity fields are fixed at construction. `dependencies` only grows,
/// holding raw child ids (not composite keys) in edge input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    name: String,
    version: String,
    dependency_type: DependencyType,
    path: String,

    // target framework properties
    runtime_identifier: String,
    target_framework_moniker: String,
    framework_name: String,
    framework_version: String,

    dependencies: Vec<String>,
}

impl Node {
    fn empty(dependency_type: DependencyType) -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            dependency_type,
            path: String::new(),
            runtime_identifier: String::new(),
            target_framework_moniker: String::new(),
            framework_name: String::new(),
            framework_version: String::new(),
            dependencies: Vec::new(),
        }
    }

    /// Build a target node.
    pub fn target(
        runtime_identifier: impl Into<String>,
        target_framework_moniker: impl Into<String>,
        framework_name: impl Into<String>,
        framework_version: impl Into<String>,
    ) -> Self {
        Self {
            runtime_identifier: runtime_identifier.into(),
            target_framework_moniker: target_framework_moniker.into(),
            framework_name: framework_name.into(),
            framework_version: framework_version.into(),
            ..Self::empty(DependencyType::Target)
        }
    }

    /// Build a package (or file) node.
    pub fn dependency(
        name: impl Into<String>,
        version: impl Into<String>,
        dependency_type: DependencyType,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            path: path.into(),
            ..Self::empty(dependency_type)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dependency_type(&self) -> &DependencyType {
        &self.dependency_type
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn runtime_identifier(&self) -> &str {
        &self.runtime_identifier
    }

    pub fn target_framework_moniker(&self) -> &str {
        &self.target_framework_moniker
    }

    pub fn framework_name(&self) -> &str {
        &self.framework_name
    }

    pub fn framework_version(&self) -> &str {
        &self.framework_version
    }

    /// Raw ids of the children linked under this node.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn is_target(&self) -> bool {
        self.dependency_type == DependencyType::Target
    }

    pub(crate) fn push_dependency(&mut self, child: impl Into<String>) {
        self.dependencies.push(child.into());
    }
}

/// A raw input record: identity plus named string metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_spec: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Item {
    pub fn new(item_spec: impl Into<String>) -> Self {
        Self {
            item_spec: item_spec.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Builder: set a metadata value.
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// Read a metadata value. Names match without regard to ASCII case and
    /// a missing value reads as the empty string.
    pub fn metadata(&self, name: &str) -> &str {
        if let Some(value) = self.metadata.get(name) {
            return value;
        }
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }
}

/// The five record sets one consolidation consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputBundle {
    pub target_definitions: Vec<Item>,
    pub package_definitions: Vec<Item>,
    pub file_definitions: Vec<Item>,
    pub package_dependencies: Vec<Item>,
    pub file_dependencies: Vec<Item>,
}

impl InputBundle {
    /// Parse a bundle from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a bundle from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a bundle from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| DepworldError::ReadInput {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json_str(&content)
    }
}

/// One projected world entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputRecord {
    /// Composite world key.
    pub item_spec: String,
    pub runtime_identifier: String,
    pub target_framework: String,
    pub framework_name: String,
    pub framework_version: String,
    pub name: String,
    pub version: String,
    pub dependency_type: String,
    pub path: String,
    /// Raw child ids joined by `;`.
    pub dependencies: String,
}

impl OutputRecord {
    /// Metadata columns in output order.
    pub fn metadata(&self) -> [(&'static str, &str); 9] {
        [
            (metadata::RUNTIME_IDENTIFIER, &self.runtime_identifier),
            (metadata::TARGET_FRAMEWORK, &self.target_framework),
            (metadata::FRAMEWORK_NAME, &self.framework_name),
            (metadata::FRAMEWORK_VERSION, &self.framework_version),
            (metadata::NAME, &self.name),
            (metadata::VERSION, &self.version),
            ("DependencyType", &self.dependency_type),
            (metadata::PATH, &self.path),
            ("Dependencies", &self.dependencies),
        ]
    }
}
