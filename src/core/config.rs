//! Workspace configuration.
//!
//! Loaded from `propsync.json` at the workspace root when present;
//! every field has a default so the file is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "propsync.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceConfig {
    /// Glob patterns for candidate source files, relative to the root.
    pub include: Vec<String>,
    /// Glob patterns excluded from every scan.
    pub exclude: Vec<String>,
    /// Attribute value inserted for a missing prop.
    pub placeholder: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            include: vec![
                "**/*.tsx".to_string(),
                "**/*.jsx".to_string(),
                "**/*.ts".to_string(),
                "**/*.js".to_string(),
            ],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
            ],
            placeholder: "{/* TODO: completar */}".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// The full attribute text inserted before a tag's closing bracket.
    pub fn insertion_for(&self, prop: &str) -> String {
        format!(" {}={}", prop, self.placeholder)
    }
}

/// Load the workspace configuration, falling back to defaults when no
/// config file exists.
pub fn load(root: &Path) -> Result<WorkspaceConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(WorkspaceConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", path.display()))))?;

    let config: WorkspaceConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    if config.include.is_empty() {
        return Err(Error::config_invalid_value(
            "include",
            None,
            "At least one include glob is required",
        ));
    }

    Ok(config)
}
