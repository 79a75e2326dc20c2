//! Composite key synthesis for world entries.
//!
//! Package and file names are not unique across targets, so every world
//! entry is keyed by the target it lives under:
//!
//! ```text
//! net6.0                        target itself
//! net6.0/PkgA/1.0.0             package under net6.0
//! net6.0/lib/net6.0/PkgA.dll    file under net6.0
//! ```

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '/';

/// Key of the entry a parent occupies in the world.
///
/// Joins target and package with `/` and strips exactly one leading and one
/// trailing separator, so an empty package yields the bare target id.
pub fn world_key(parent_target: &str, parent_package: &str) -> String {
    let joined = format!("{}{}{}", parent_target, KEY_SEPARATOR, parent_package);
    let trimmed = joined.strip_prefix(KEY_SEPARATOR).unwrap_or(&joined);
    let trimmed = trimmed.strip_suffix(KEY_SEPARATOR).unwrap_or(trimmed);
    trimmed.to_string()
}

/// Key of the entry a child occupies under `parent_target`. Never trimmed.
pub fn child_key(parent_target: &str, child: &str) -> String {
    format!("{}{}{}", parent_target, KEY_SEPARATOR, child)
}

/// Whether a target id is a "target/runtime-identifier" pairing rather than
/// a plain target.
pub fn is_runtime_pairing(target: &str) -> bool {
    target.contains(KEY_SEPARATOR)
}
