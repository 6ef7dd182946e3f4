//! Render options.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::RenderError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../schemas/render_options.json");
static OPTIONS_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Options for the HTML renderer.
///
/// Every field defaults to `false`, so `{}` is a valid options document.
///
/// # Example
///
/// ```rust
/// use marktree_html::RenderOptions;
///
/// let options = RenderOptions::from_json(r#"{ "hardbreaks": true }"#).unwrap();
/// assert!(options.hardbreaks);
/// assert!(!options.sourcepos);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Emit `data-sourcepos` on block elements that have a source range.
    pub sourcepos: bool,

    /// Render soft line breaks as `<br />`.
    pub hardbreaks: bool,
}

impl RenderOptions {
    /// Loads options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| RenderError::options(format!("Failed to read options: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses options from a JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| RenderError::options(format!("Invalid JSON: {}", e)))?;

        let schema = OPTIONS_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded options schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid options schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| RenderError::options(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            return Err(RenderError::options(format!(
                "Options validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| RenderError::options(format!("Invalid options: {}", e)))
    }
}
