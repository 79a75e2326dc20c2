//! Command implementations for depworld CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod build;
pub mod tree;

use anyhow::{Context, Result};
use depworld_core::InputBundle;
use std::path::Path;
use thiserror::Error;

/// Errors raised by command handling (as opposed to I/O failures).
#[derive(Error, Debug)]
pub enum CommandError {
    /// `--target` named a target that has no world entry.
    #[error("Target '{target}' not found in the dependency world (available: {available})")]
    TargetNotFound { target: String, available: String },
}

/// Read an input bundle from a file, or from stdin when the path is `-`.
pub fn load_bundle(input: &Path) -> Result<InputBundle> {
    let bundle = if input == Path::new("-") {
        InputBundle::from_reader(std::io::stdin().lock())
            .context("Failed to parse input bundle from stdin")?
    } else {
        InputBundle::load(input)
            .with_context(|| format!("Failed to load input bundle {}", input.display()))?
    };

    tracing::debug!(
        targets = bundle.target_definitions.len(),
        packages = bundle.package_definitions.len(),
        files = bundle.file_definitions.len(),
        package_edges = bundle.package_dependencies.len(),
        file_edges = bundle.file_dependencies.len(),
        "Loaded input bundle"
    );
    Ok(bundle)
}
