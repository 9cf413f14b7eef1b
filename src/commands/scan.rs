use clap::Args;
use serde::Serialize;
use std::path::Path;

use propsync::document::{DocumentStore, LocalStore};
use propsync::scan;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ScanArgs {
    /// File to scan for definitions and usages
    pub file: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ScanOutput {
    #[serde(rename = "scan.file")]
    File {
        file: String,
        definitions: Vec<DefinitionInfo>,
        usages: Vec<UsageInfo>,
    },
}

#[derive(Serialize)]
pub struct DefinitionInfo {
    pub name: String,
    pub props: Vec<String>,
    pub line: usize,
    pub column: usize,
}

#[derive(Serialize)]
pub struct UsageInfo {
    pub component: String,
    pub props: Vec<String>,
    pub line: usize,
    pub column: usize,
}

pub fn run(args: ScanArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ScanOutput> {
    let doc = LocalStore::new().open(Path::new(&args.file))?;

    let definitions = scan::extract_definitions(&doc.text)
        .into_iter()
        .map(|def| {
            let (line, column) = doc.position_at(def.params_span.start);
            DefinitionInfo {
                name: def.name,
                props: def.props,
                line,
                column,
            }
        })
        .collect();

    let usages = scan::extract_usages(&doc.text)
        .into_iter()
        .map(|usage| {
            let (line, column) = doc.position_at(usage.insert_offset);
            UsageInfo {
                component: usage.component,
                props: usage.props,
                line,
                column,
            }
        })
        .collect();

    Ok((
        ScanOutput::File {
            file: args.file,
            definitions,
            usages,
        },
        0,
    ))
}
