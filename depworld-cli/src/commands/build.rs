//! Build command - Consolidate an input bundle into world records
//!
//! Prints one record per world entry, or the consolidation report when
//! `--summary` is given.

use super::load_bundle;
use crate::output::{
    Column, CsvOutput, Output, OutputConfig, OutputFormat, Outputter, TableOutput, TreeNode,
    TreeOutput,
};
use anyhow::Result;
use depworld_core::explorer::{self, DependencyTree, TreeOptions};
use depworld_core::{consolidate, exporter, Consolidation, ConsolidationReport, OutputRecord};
use serde::Serialize;
use std::path::Path;

/// Projected world records plus the tree view used by `--format tree`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct WorldRecords {
    records: Vec<OutputRecord>,
    #[serde(skip)]
    forest: Vec<DependencyTree>,
}

impl WorldRecords {
    /// Project the records; the forest is only built for the tree format.
    fn new(consolidation: &Consolidation, format: OutputFormat) -> Self {
        let forest = if format == OutputFormat::Tree {
            explorer::build_forest(&consolidation.world, &TreeOptions::default())
        } else {
            Vec::new()
        };
        Self {
            records: consolidation.records(),
            forest,
        }
    }

    fn table_columns() -> Vec<Column> {
        vec![
            Column::new("Key", "ItemSpec"),
            Column::new("Type", "DependencyType"),
            Column::new("Name", "Name"),
            Column::new("Version", "Version"),
            Column::new("Framework", "TargetFramework"),
            Column::new("Dependencies", "Dependencies").with_max_width(60),
        ]
    }

    fn csv_columns() -> Vec<Column> {
        std::iter::once(Column::new("ItemSpec", "ItemSpec"))
            .chain(
                OutputRecord::default()
                    .metadata()
                    .iter()
                    .map(|(name, _)| Column::new(*name, *name)),
            )
            .collect()
    }
}

impl Outputter for WorldRecords {
    fn to_table(&self, config: &OutputConfig) -> String {
        TableOutput::format_with_columns(&self.records, &Self::table_columns(), config)
    }

    fn to_json(&self, config: &OutputConfig) -> String {
        exporter::json::export(&self.records, !config.compact)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        CsvOutput::format_with_columns(&self.records, &Self::csv_columns(), config)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let roots: Vec<TreeNode> = self.forest.iter().map(TreeNode::from).collect();
        TreeOutput::format_forest(&roots, config)
    }
}

/// Consolidation counters as a displayable summary.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ReportSummary(ConsolidationReport);

impl ReportSummary {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let r = &self.0;
        vec![
            ("Targets registered", r.targets_registered.to_string()),
            ("Packages registered", r.packages_registered.to_string()),
            ("Files registered", r.files_registered.to_string()),
            ("Target/rid definitions skipped", r.runtime_targets_skipped.to_string()),
            ("Package edges", r.package_edges.to_string()),
            ("File edges", r.file_edges.to_string()),
            ("Target/rid edges skipped", r.runtime_edges_skipped.to_string()),
            ("File edges filtered", r.file_edges_filtered.to_string()),
            ("Unknown children", r.unknown_children.to_string()),
            ("Unresolved parents", r.unresolved_parents.to_string()),
            ("World entries", r.world_entries.to_string()),
        ]
    }
}

impl Outputter for ReportSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        TableOutput::format_key_value(&self.pairs(), config)
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let mut output = String::from("metric,value");
        for (name, value) in self.pairs() {
            output.push_str(&format!("\n{},{}", name, value));
        }
        output
    }
}

/// Run the build command.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    summary: bool,
    config: OutputConfig,
) -> Result<()> {
    let bundle = load_bundle(input)?;
    let consolidation = consolidate(&bundle);

    if summary {
        return emit(Output::with_config(ReportSummary(consolidation.report), config), output);
    }

    let records = WorldRecords::new(&consolidation, config.format);
    emit(Output::with_config(records, config), output)
}

fn emit<T: Outputter>(rendered: Output<T>, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            rendered.render_to_file(path)?;
            tracing::info!("Wrote {}", path.display());
            Ok(())
        }
        None => rendered.render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depworld_core::{InputBundle, Item};

    fn sample_consolidation() -> Consolidation {
        let bundle = InputBundle {
            target_definitions: vec![Item::new("net6.0")],
            package_definitions: vec![Item::new("PkgA/1.0.0")
                .with_metadata("Name", "PkgA")
                .with_metadata("Version", "1.0.0")],
            package_dependencies: vec![Item::new("PkgA/1.0.0")
                .with_metadata("ParentTarget", "net6.0")
                .with_metadata("ParentPackage", "")],
            ..Default::default()
        };
        consolidate(&bundle)
    }

    fn sample() -> WorldRecords {
        WorldRecords::new(&sample_consolidation(), OutputFormat::Tree)
    }

    #[test]
    fn test_forest_only_built_for_tree_format() {
        let consolidation = sample_consolidation();

        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv] {
            let records = WorldRecords::new(&consolidation, format);
            assert!(records.forest.is_empty());
            assert_eq!(records.records.len(), 2);
        }
        assert_eq!(
            WorldRecords::new(&consolidation, OutputFormat::Tree).forest.len(),
            1
        );
    }

    #[test]
    fn test_csv_has_all_output_columns() {
        let config = OutputConfig::new(OutputFormat::Csv);
        let output = sample().to_csv(&config);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines[0],
            "ItemSpec,RuntimeIdentifier,TargetFramework,FrameworkName,FrameworkVersion,Name,Version,DependencyType,Path,Dependencies"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("net6.0,"));
        assert!(lines[2].ends_with(",Target,,PkgA/1.0.0"));
    }

    #[test]
    fn test_json_is_record_array() {
        let config = OutputConfig::new(OutputFormat::Json).compact();
        let output = sample().to_json(&config);

        let parsed: Vec<OutputRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].item_spec, "net6.0/PkgA/1.0.0");
    }

    #[test]
    fn test_tree_rendering() {
        let config = OutputConfig::new(OutputFormat::Tree)
            .without_colors()
            .with_ascii(true);
        let output = sample().to_tree(&config);

        assert_eq!(output, "net6.0\n`-- PkgA 1.0.0");
    }

    #[test]
    fn test_summary_csv() {
        let report = ConsolidationReport {
            world_entries: 2,
            ..Default::default()
        };
        let config = OutputConfig::new(OutputFormat::Csv);
        let output = ReportSummary(report).to_csv(&config);

        assert!(output.starts_with("metric,value"));
        assert!(output.contains("World entries,2"));
    }
}
