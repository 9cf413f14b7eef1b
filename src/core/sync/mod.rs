//! Bidirectional prop synchronization.
//!
//! A save event drives two protocols:
//!
//! 1. Definition→Usage: every component defined in the saved document
//!    pushes its prop list to all usage tags in the workspace, adding
//!    placeholder attributes for missing props.
//! 2. Usage→Definition: every distinct component referenced in the
//!    saved document pulls newly-observed props back into its
//!    definition, then re-runs Definition→Usage with the union.
//!
//! Synchronization only ever adds props — widening is safe, narrowing
//! risks deleting code with side effects. Every mutation is gated by a
//! confirmation covering the whole accumulated plan.

mod plan;
pub use plan::{ApplyEdit, FsApplier, PreviewApplier, TextEdit, WorkspaceEdit};

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::document::{Document, DocumentStore};
use crate::error::Result;
use crate::language::Language;
use crate::locate;
use crate::props;
use crate::scan;
use crate::workspace::Workspace;

/// Confirmation prompt boundary. Synchronous: the protocol suspends
/// until answered; declining discards the whole pending plan.
pub trait Confirm {
    fn confirm(&self, message: &str, accept_label: &str, cancel_label: &str) -> Result<bool>;
}

/// Fixed-answer confirmation, used by `--yes`, dry runs and tests.
pub struct AutoConfirm {
    pub accept: bool,
}

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str, _accept: &str, _cancel: &str) -> Result<bool> {
        Ok(self.accept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    InSync,
    Applied,
    Declined,
    NoDefinition,
}

/// Result of one Definition→Usage pass for one component.
#[derive(Debug, Clone, Serialize)]
pub struct PropagationReport {
    pub component: String,
    pub status: SyncStatus,
    pub insertions: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

/// Result of one Usage→Definition pass for one component.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSyncReport {
    pub component: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_props: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation: Option<PropagationReport>,
}

/// Everything one save event did (or would do, in a dry run).
#[derive(Debug, Clone, Serialize)]
pub struct SaveSyncReport {
    /// `None` when the document's language is unsupported and the
    /// event was ignored.
    pub language: Option<String>,
    pub definitions: Vec<PropagationReport>,
    pub usages: Vec<UsageSyncReport>,
}

impl SaveSyncReport {
    fn ignored() -> Self {
        Self {
            language: None,
            definitions: Vec::new(),
            usages: Vec::new(),
        }
    }
}

pub struct SyncEngine<'a> {
    workspace: &'a Workspace,
    store: &'a dyn DocumentStore,
    applier: &'a dyn ApplyEdit,
    confirm: &'a dyn Confirm,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        workspace: &'a Workspace,
        store: &'a dyn DocumentStore,
        applier: &'a dyn ApplyEdit,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            workspace,
            store,
            applier,
            confirm,
        }
    }

    /// Save-event entry point.
    ///
    /// Infers the document language from the file extension; documents
    /// with an unsupported extension are ignored.
    pub fn on_save(&self, doc: &Document) -> Result<SaveSyncReport> {
        match Language::from_path(&doc.path) {
            Some(language) => self.on_save_as(doc, language),
            None => Ok(SaveSyncReport::ignored()),
        }
    }

    /// Save-event entry point with the language already resolved, for
    /// embedding editors that supply a language id instead of relying
    /// on the file extension.
    ///
    /// Runs Definition→Usage for every component defined in the saved
    /// document (with at least one prop), then Usage→Definition once
    /// per distinct component referenced in it.
    pub fn on_save_as(&self, doc: &Document, language: Language) -> Result<SaveSyncReport> {
        let mut definitions = Vec::new();
        for def in scan::extract_definitions(&doc.text) {
            if def.props.is_empty() {
                continue;
            }
            definitions.push(self.propagate_definition(&def.name, &def.props)?);
        }

        // De-duplication is per save event: the first observed usage of
        // each component carries the props, later tags are skipped.
        let mut seen: HashSet<String> = HashSet::new();
        let mut usages = Vec::new();
        for usage in scan::extract_usages(&doc.text) {
            if !seen.insert(usage.component.clone()) {
                continue;
            }
            usages.push(self.propagate_usage(&usage.component, &usage.props)?);
        }

        Ok(SaveSyncReport {
            language: Some(language.id().to_string()),
            definitions,
            usages,
        })
    }

    /// Definition→Usage: plan a placeholder insertion for every prop
    /// missing from every usage tag of `name` across the workspace,
    /// then confirm and apply all of it or none of it.
    pub fn propagate_definition(&self, name: &str, def_props: &[String]) -> Result<PropagationReport> {
        let mut edit = WorkspaceEdit::new();

        for file in self.workspace.source_files()? {
            let Ok(doc) = self.store.open(&file) else {
                continue;
            };

            for usage in scan::find_usages(&doc.text, name) {
                let missing = def_props.iter().filter(|p| !usage.props.contains(p));
                for prop in missing {
                    edit.push(
                        file.clone(),
                        TextEdit::insertion(
                            usage.insert_offset,
                            self.workspace.config.insertion_for(prop),
                        ),
                    );
                }
            }
        }

        if edit.is_empty() {
            return Ok(PropagationReport {
                component: name.to_string(),
                status: SyncStatus::InSync,
                insertions: 0,
                files: Vec::new(),
            });
        }

        let files: Vec<String> = edit.files().map(|f| self.relative(f)).collect();
        let insertions = edit.edit_count();

        let message = format!(
            "<{}>: insert {} missing prop placeholder(s) across {} file(s)?",
            name,
            insertions,
            edit.file_count()
        );
        if !self.confirm.confirm(&message, "Insert", "Cancel")? {
            return Ok(PropagationReport {
                component: name.to_string(),
                status: SyncStatus::Declined,
                insertions,
                files,
            });
        }

        self.applier.apply(&edit)?;
        log_status!(
            "sync",
            "<{}>: inserted {} placeholder prop(s) in {} file(s)",
            name,
            insertions,
            files.len()
        );

        Ok(PropagationReport {
            component: name.to_string(),
            status: SyncStatus::Applied,
            insertions,
            files,
        })
    }

    /// Usage→Definition: widen the definition's prop list with props
    /// observed at a usage site, then push the union back out to every
    /// usage tag in the workspace.
    pub fn propagate_usage(&self, name: &str, observed: &[String]) -> Result<UsageSyncReport> {
        let Some(def) = locate::find_definition(self.workspace, self.store, name)? else {
            // No definition anywhere: nothing is fabricated.
            return Ok(UsageSyncReport {
                component: name.to_string(),
                status: SyncStatus::NoDefinition,
                added_props: Vec::new(),
                definition_file: None,
                propagation: None,
            });
        };

        let definition_file = self.relative(&def.file);
        let union = props::union_props(&def.props, observed);
        if union == def.props {
            return Ok(UsageSyncReport {
                component: name.to_string(),
                status: SyncStatus::InSync,
                added_props: Vec::new(),
                definition_file: Some(definition_file),
                propagation: None,
            });
        }

        let added: Vec<String> = union[def.props.len()..].to_vec();
        let message = format!(
            "<{}> is used with prop(s) not in its definition: {}. Add them in {}?",
            name,
            added.join(", "),
            definition_file
        );
        if !self.confirm.confirm(&message, "Add props", "Cancel")? {
            return Ok(UsageSyncReport {
                component: name.to_string(),
                status: SyncStatus::Declined,
                added_props: added,
                definition_file: Some(definition_file),
                propagation: None,
            });
        }

        let mut edit = WorkspaceEdit::new();
        edit.push(
            def.file.clone(),
            TextEdit::replacement(def.params_span.clone(), props::join_props(&union)),
        );
        self.applier.apply(&edit)?;
        log_status!(
            "sync",
            "<{}>: definition in {} widened with {} new prop(s)",
            name,
            definition_file,
            added.len()
        );

        // A widened definition must reach every other usage site, not
        // just the one that triggered the update.
        let propagation = self.propagate_definition(name, &union)?;

        Ok(UsageSyncReport {
            component: name.to_string(),
            status: SyncStatus::Applied,
            added_props: added,
            definition_file: Some(definition_file),
            propagation: Some(propagation),
        })
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.workspace.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
