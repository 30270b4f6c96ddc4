//! JSON renderer implementation.

use crate::error::{Error, Result};

use super::options::JsonFormat;
use super::summary::Summary;

/// Convert a summary to JSON.
pub fn to_json(summary: &Summary, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Compact => serde_json::to_string(summary),
        JsonFormat::Pretty => serde_json::to_string_pretty(summary),
    }
    .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a summary to pretty-printed JSON.
pub fn to_json_default(summary: &Summary) -> Result<String> {
    to_json(summary, JsonFormat::Pretty)
}
