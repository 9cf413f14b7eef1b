//! Workspace file enumeration.
//!
//! Walks the workspace root, applies the configured include/exclude
//! globs, and filters out test files so synchronization never mutates
//! fixtures or specs.

use glob_match::glob_match;
use std::path::{Path, PathBuf};

use crate::config::{self, WorkspaceConfig};
use crate::error::{Error, Result};

/// Directories never descended into, regardless of globs.
const ALWAYS_SKIP_DIRS: &[&str] = &["node_modules", ".git", ".svn", ".hg"];

/// Path segments that mark a file as test-only.
const TEST_DIR_SEGMENTS: &[&str] = &["test", "tests", "__tests__"];

#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: WorkspaceConfig,
}

impl Workspace {
    /// Open a workspace rooted at `root` (tilde-expanded), loading
    /// `propsync.json` when present.
    pub fn open(root: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(root).to_string();
        let root = PathBuf::from(expanded);
        if !root.is_dir() {
            return Err(Error::workspace_not_found(root.display().to_string()));
        }

        let config = config::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn with_config(root: impl Into<PathBuf>, config: WorkspaceConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Candidate source files in enumeration order: recursive walk,
    /// include/exclude globs, then the test-file filter.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_recursive(&self.root, &mut files);
        files.sort();

        files.retain(|path| {
            let relative = relative_slash_path(path, &self.root);
            self.config.include.iter().any(|g| glob_match(g, &relative))
                && !self.config.exclude.iter().any(|g| glob_match(g, &relative))
                && !is_test_file(Path::new(&relative))
        });

        Ok(files)
    }
}

fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if ALWAYS_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_recursive(&path, files);
        } else {
            files.push(path);
        }
    }
}

/// Path relative to the root with forward slashes, for glob matching.
fn relative_slash_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Test-file heuristic: `.test.` or `.spec.` as a dot-delimited infix
/// of the file name, or any path segment named `test`, `tests`, or
/// `__tests__`. Must be given a workspace-relative path: segments of
/// the directory the workspace itself lives under never count.
pub fn is_test_file(path: &Path) -> bool {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if file_name.contains(".test.") || file_name.contains(".spec.") {
        return true;
    }

    path.components().any(|c| {
        let segment = c.as_os_str().to_string_lossy();
        TEST_DIR_SEGMENTS.contains(&segment.as_ref())
    })
}
