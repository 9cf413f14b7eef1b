pub type CmdResult<T> = propsync::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod locate;
pub mod scan;
pub mod sync;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (propsync::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Sync(args) => dispatch!(args, global, sync),
        crate::Commands::Scan(args) => dispatch!(args, global, scan),
        crate::Commands::Locate(args) => dispatch!(args, global, locate),
    }
}
