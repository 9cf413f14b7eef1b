//! Document snapshots and filesystem access.
//!
//! A `Document` is an immutable text snapshot; every offset in an edit
//! plan is only valid against the snapshot it was computed from, which
//! is why each file is opened once per synchronization pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Convert a byte offset into a 1-indexed (line, column) pair.
    /// Offsets past the end of the text resolve to the final position.
    pub fn position_at(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.text.len());
        let mut line = 1;
        let mut column = 1;
        for (i, ch) in self.text.char_indices() {
            if i >= clamped {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

/// Trait for document access — local filesystem or an embedding editor.
pub trait DocumentStore {
    fn open(&self, path: &Path) -> Result<Document>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Local filesystem implementation.
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for LocalStore {
    fn open(&self, path: &Path) -> Result<Document> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::document_not_found(path.display().to_string())
            } else {
                Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
            }
        })?;

        Ok(Document::new(path, text))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        // Atomic write: write to temp file, then rename
        let parent = path.parent().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let filename = path.file_name().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

        fs::write(&tmp_path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write temp file".to_string())))?;

        fs::rename(&tmp_path, path)
            .map_err(|e| Error::internal_io(e.to_string(), Some("rename temp file".to_string())))?;

        Ok(())
    }
}
