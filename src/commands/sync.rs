use clap::Args;
use serde::Serialize;
use std::path::Path;

use propsync::document::{DocumentStore, LocalStore};
use propsync::language::Language;
use propsync::sync::{
    ApplyEdit, AutoConfirm, Confirm, FsApplier, PreviewApplier, SaveSyncReport, SyncEngine,
};
use propsync::workspace::Workspace;

use crate::commands::CmdResult;
use crate::tty::{self, TtyConfirm};

#[derive(Args)]
pub struct SyncArgs {
    /// Saved file that triggers synchronization
    pub file: String,

    /// Workspace root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Editor language id (e.g. typescriptreact), overriding
    /// extension-based detection
    #[arg(long)]
    pub language: Option<String>,

    /// Apply edits to disk (default is dry-run preview)
    #[arg(long)]
    pub write: bool,

    /// Accept every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum SyncOutput {
    #[serde(rename = "sync.save")]
    Save {
        file: String,
        root: String,
        dry_run: bool,
        report: SaveSyncReport,
    },
}

pub fn run(args: SyncArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<SyncOutput> {
    let language = match args.language.as_deref() {
        Some(id) => Some(Language::from_id(id).ok_or_else(|| {
            propsync::Error::language_unsupported(id, Language::supported_ids())
        })?),
        None => None,
    };

    let workspace = Workspace::open(&args.root)?;
    let store = LocalStore::new();
    let doc = store.open(Path::new(&args.file))?;

    let auto_accept = AutoConfirm { accept: true };
    let tty_confirm = TtyConfirm;
    let confirm: &dyn Confirm = if !args.write || args.yes {
        &auto_accept
    } else if tty::is_stdin_tty() {
        &tty_confirm
    } else {
        return Err(propsync::Error::validation_invalid_argument(
            "write",
            "Confirmation requires a TTY; pass --yes to accept non-interactively",
            None,
            None,
        ));
    };

    let fs_applier = FsApplier::new(&store);
    let preview_applier = PreviewApplier;
    let applier: &dyn ApplyEdit = if args.write {
        &fs_applier
    } else {
        &preview_applier
    };

    let engine = SyncEngine::new(&workspace, &store, applier, confirm);
    let report = match language {
        Some(language) => engine.on_save_as(&doc, language)?,
        None => engine.on_save(&doc)?,
    };

    Ok((
        SyncOutput::Save {
            file: args.file,
            root: workspace.root.display().to_string(),
            dry_run: !args.write,
            report,
        },
        0,
    ))
}
