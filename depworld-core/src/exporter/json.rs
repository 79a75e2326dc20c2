//! JSON format exporter.

use crate::error::Result;
use crate::types::OutputRecord;

/// Export records to a JSON array string.
pub fn export(records: &[OutputRecord], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
