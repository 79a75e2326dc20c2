//! CSV output formatting for data export.
//!
//! Provides CSV formatting with:
//! - Proper escaping of special characters
//! - Configurable column selection

use super::{Column, OutputConfig};
use serde::Serialize;

/// CSV output formatter
pub struct CsvOutput;

impl CsvOutput {
    /// Format an array of items as CSV with specified columns
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        _config: &OutputConfig,
    ) -> String {
        let mut output = columns
            .iter()
            .map(|c| Self::escape_value(&c.name))
            .collect::<Vec<_>>()
            .join(",");

        for item in data {
            if let Ok(json) = serde_json::to_value(item) {
                let row: Vec<String> = columns
                    .iter()
                    .map(|col| {
                        json.get(&col.key)
                            .map(Self::value_to_csv)
                            .unwrap_or_default()
                    })
                    .collect();
                output.push('\n');
                output.push_str(&row.join(","));
            }
        }

        output
    }

    /// Convert a JSON value to a CSV cell
    fn value_to_csv(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => Self::escape_value(s),
            serde_json::Value::Array(arr) => Self::escape_value(&format!("[{} items]", arr.len())),
            serde_json::Value::Object(obj) => {
                Self::escape_value(&format!("{{{} fields}}", obj.len()))
            }
        }
    }

    /// Escape a string value for CSV
    ///
    /// Wraps in quotes if the value contains comma, newline, or quote.
    /// Doubles any existing quotes.
    fn escape_value(s: &str) -> String {
        if s.contains(',') || s.contains('\n') || s.contains('\r') || s.contains('"') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
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
        count: usize,
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(CsvOutput::escape_value("net6.0"), "net6.0");
        assert_eq!(
            CsvOutput::escape_value(".NETFramework,Version=v4.6"),
            "\".NETFramework,Version=v4.6\""
        );
        assert_eq!(CsvOutput::escape_value("a\nb"), "\"a\nb\"");
        assert_eq!(CsvOutput::escape_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            TestItem {
                key: "net6.0".to_string(),
                count: 2,
            },
            TestItem {
                key: "net6.0/PkgA".to_string(),
                count: 0,
            },
        ];
        let columns = vec![Column::new("Key", "key"), Column::new("Count", "count")];
        let config = OutputConfig::new(OutputFormat::Csv);
        let output = CsvOutput::format_with_columns(&data, &columns, &config);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, vec!["Key,Count", "net6.0,2", "net6.0/PkgA,0"]);
    }

    #[test]
    fn test_empty_data_is_header_only() {
        let data: Vec<TestItem> = vec![];
        let columns = vec![Column::new("Key", "key")];
        let config = OutputConfig::new(OutputFormat::Csv);
        let output = CsvOutput::format_with_columns(&data, &columns, &config);

        assert_eq!(output, "Key");
    }
}
