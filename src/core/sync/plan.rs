//! Edit plans.
//!
//! A plan is built against immutable document snapshots, accumulated
//! across every file in a pass, and applied as one request. Offsets
//! are only meaningful against the snapshot they were computed from.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::PathBuf;

use crate::document::DocumentStore;
use crate::error::Result;

/// A single text mutation. `start == end` is an insertion.
#[derive(Debug, Clone, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn insertion(offset: usize, text: impl Into<String>) -> Self {
        Self {
            start: offset,
            end: offset,
            text: text.into(),
        }
    }

    pub fn replacement(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            text: text.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

/// All edits for one synchronization pass, grouped per file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkspaceEdit {
    pub edits: BTreeMap<PathBuf, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: PathBuf, edit: TextEdit) {
        self.edits.entry(file).or_default().push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.edits.len()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.edits.keys()
    }

    /// Apply one file's edits to its snapshot text.
    ///
    /// Edits are applied from the end of the text backwards so earlier
    /// offsets stay valid; insertions sharing an offset keep plan
    /// order. Edits whose offsets no longer fit the text (the file
    /// changed since planning) are skipped rather than applied badly.
    pub fn apply_to_text(text: &str, edits: &[TextEdit]) -> String {
        let mut indexed: Vec<(usize, &TextEdit)> = edits.iter().enumerate().collect();
        indexed.sort_by_key(|(_, edit)| edit.start);

        let mut result = text.to_string();
        for (_, edit) in indexed.iter().rev() {
            if edit.end > result.len()
                || edit.start > edit.end
                || !result.is_char_boundary(edit.start)
                || !result.is_char_boundary(edit.end)
            {
                continue;
            }
            result.replace_range(edit.start..edit.end, &edit.text);
        }

        result
    }
}

/// Trait for multi-file edit application — local filesystem or an
/// embedding editor's workspace-edit facility.
pub trait ApplyEdit {
    fn apply(&self, edit: &WorkspaceEdit) -> Result<()>;
}

/// Applies plans to the local filesystem, one atomic write per file.
pub struct FsApplier<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> FsApplier<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }
}

impl ApplyEdit for FsApplier<'_> {
    fn apply(&self, edit: &WorkspaceEdit) -> Result<()> {
        for (file, edits) in &edit.edits {
            let doc = self.store.open(file)?;
            let updated = WorkspaceEdit::apply_to_text(&doc.text, edits);
            if updated != doc.text {
                self.store.write(file, &updated)?;
            }
        }
        Ok(())
    }
}

/// Dry-run applier: accepts every plan without touching any file.
pub struct PreviewApplier;

impl ApplyEdit for PreviewApplier {
    fn apply(&self, _edit: &WorkspaceEdit) -> Result<()> {
        Ok(())
    }
}
