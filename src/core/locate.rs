//! Definition locator.
//!
//! Searches workspace files for a component's definition, preferring
//! the function-declaration form over the arrow form within each file
//! and returning on the first file that matches.

use std::ops::Range;
use std::path::PathBuf;

use crate::document::DocumentStore;
use crate::error::Result;
use crate::scan;
use crate::workspace::Workspace;

/// A definition pinned to the file it was found in.
#[derive(Debug, Clone)]
pub struct LocatedDefinition {
    pub file: PathBuf,
    pub name: String,
    pub props: Vec<String>,
    /// Byte range of the destructuring interior in that file's text.
    pub params_span: Range<usize>,
}

/// Find the first definition of `name` across the workspace.
///
/// Files are visited in enumeration order and opened once each;
/// unreadable files are skipped. `None` means synchronization for this
/// component is a no-op — a definition is never fabricated.
pub fn find_definition(
    workspace: &Workspace,
    store: &dyn DocumentStore,
    name: &str,
) -> Result<Option<LocatedDefinition>> {
    for file in workspace.source_files()? {
        let Ok(doc) = store.open(&file) else {
            continue;
        };

        if let Some((props, params_span)) = scan::find_definition_in(&doc.text, name) {
            return Ok(Some(LocatedDefinition {
                file,
                name: name.to_string(),
                props,
                params_span,
            }));
        }
    }

    Ok(None)
}
