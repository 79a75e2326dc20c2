//! JSON output formatting for machine-readable output.
//!
//! Pretty-printed by default; compact mode emits a single line.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as JSON string
    ///
    /// Uses pretty-printing by default. When `config.compact` is true,
    /// outputs minified JSON on a single line.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use depworld_core::OutputRecord;

    fn records() -> Vec<OutputRecord> {
        vec![OutputRecord {
            item_spec: "net6.0".to_string(),
            dependency_type: "Target".to_string(),
            dependencies: "PkgA".to_string(),
            ..Default::default()
        }]
    }

    #[test]
    fn test_format_pretty() {
        let config = OutputConfig::new(OutputFormat::Json);
        let output = JsonOutput::format(&records(), &config);

        assert!(output.starts_with('['));
        assert!(output.contains("\"ItemSpec\": \"net6.0\""));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let config = OutputConfig::new(OutputFormat::Json).compact();
        let output = JsonOutput::format(&records(), &config);

        assert!(output.contains("\"Dependencies\":\"PkgA\""));
        assert!(!output.contains('\n'));
    }
}
