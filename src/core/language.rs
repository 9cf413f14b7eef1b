//! Language gate for the save-event entry point.
//!
//! Synchronization only runs for JavaScript/TypeScript documents and
//! their JSX-enabled variants; everything else is ignored.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    JavaScriptReact,
    TypeScript,
    TypeScriptReact,
}

impl Language {
    /// Resolve an editor language identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "javascript" => Some(Language::JavaScript),
            "javascriptreact" => Some(Language::JavaScriptReact),
            "typescript" => Some(Language::TypeScript),
            "typescriptreact" => Some(Language::TypeScriptReact),
            _ => None,
        }
    }

    /// Resolve from a file extension (CLI save trigger).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js") => Some(Language::JavaScript),
            Some("jsx") => Some(Language::JavaScriptReact),
            Some("ts") => Some(Language::TypeScript),
            Some("tsx") => Some(Language::TypeScriptReact),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::JavaScriptReact => "javascriptreact",
            Language::TypeScript => "typescript",
            Language::TypeScriptReact => "typescriptreact",
        }
    }

    pub fn supported_ids() -> Vec<String> {
        ["javascript", "javascriptreact", "typescript", "typescriptreact"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
