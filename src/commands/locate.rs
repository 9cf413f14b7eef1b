use clap::Args;
use serde::Serialize;

use propsync::document::{DocumentStore, LocalStore};
use propsync::locate;
use propsync::workspace::Workspace;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct LocateArgs {
    /// Component name (must start uppercase)
    pub component: String,

    /// Workspace root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum LocateOutput {
    #[serde(rename = "locate.definition")]
    Definition {
        component: String,
        file: String,
        props: Vec<String>,
        line: usize,
        column: usize,
    },
}

pub fn run(args: LocateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LocateOutput> {
    if !args.component.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Err(propsync::Error::validation_invalid_argument(
            "component",
            "Component names start with an uppercase letter",
            Some(args.component.clone()),
            None,
        ));
    }

    let workspace = Workspace::open(&args.root)?;
    let store = LocalStore::new();

    let Some(def) = locate::find_definition(&workspace, &store, &args.component)? else {
        return Err(propsync::Error::component_not_found(args.component));
    };

    let doc = store.open(&def.file)?;
    let (line, column) = doc.position_at(def.params_span.start);

    Ok((
        LocateOutput::Definition {
            component: def.name,
            file: def.file.display().to_string(),
            props: def.props,
            line,
            column,
        },
        0,
    ))
}
