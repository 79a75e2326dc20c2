//! Table output formatting using the `tabled` crate
//!
//! Provides table formatting with:
//! - Column width management and truncation
//! - Terminal width awareness

use super::{truncate, Column, OutputConfig};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format data as a table with the given columns
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.name.as_str()));

        for item in data {
            let json = serde_json::to_value(item).unwrap_or_default();
            let row: Vec<String> = columns
                .iter()
                .map(|col| {
                    let value = json.get(&col.key).cloned().unwrap_or_default();
                    Self::format_value(&value, col, config)
                })
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);
        table.to_string()
    }

    /// Format a simple key-value table
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();

        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Modify::new(Columns::first()).with(Alignment::right()));
        Self::apply_style(&mut table, config);
        table.to_string()
    }

    fn apply_style(table: &mut tabled::Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }
    }

    /// Format a single JSON value for display
    fn format_value(value: &serde_json::Value, col: &Column, config: &OutputConfig) -> String {
        let s = Self::value_to_string(value);

        if config.should_truncate() {
            if let Some(max_width) = col.max_width {
                return truncate(&s, max_width);
            }
        }
        s
    }

    /// Convert a JSON value to a display string
    fn value_to_string(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) if s.is_empty() => "-".to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => format!("[{} items]", arr.len()),
            serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestItem {
        key: String,
        kind: String,
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            TestItem {
                key: "net6.0".to_string(),
                kind: "Target".to_string(),
            },
            TestItem {
                key: "net6.0/PkgA".to_string(),
                kind: String::new(),
            },
        ];
        let columns = vec![Column::new("Key", "key"), Column::new("Type", "kind")];

        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        let output = TableOutput::format_with_columns(&data, &columns, &config);

        assert!(output.contains("Key"));
        assert!(output.contains("Type"));
        assert!(output.contains("net6.0/PkgA"));
        assert!(output.contains("Target"));
        assert!(output.contains('-'));
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<TestItem> = vec![];
        let columns = vec![Column::new("Key", "key")];
        let config = OutputConfig::new(OutputFormat::Table);

        let output = TableOutput::format_with_columns(&data, &columns, &config);
        assert_eq!(output, "(no results)");
    }

    #[test]
    fn test_key_value_table() {
        let pairs = vec![
            ("World entries", "3".to_string()),
            ("Dropped edges", "0".to_string()),
        ];

        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        let output = TableOutput::format_key_value(&pairs, &config);

        assert!(output.contains("World entries"));
        assert!(output.contains("Dropped edges"));
    }
}
