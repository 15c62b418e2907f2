use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, graph::graph, hints::hints, init::init, order::order, paths::paths,
    },
};

/// Dispatch to the handler for the parsed command.
///
/// # Returns
/// - `Ok(CommandResult)` with the command's output and any issues found
/// - `Err` if the command could not run (bad config, unreadable file, ...)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Order(cmd)) => order(cmd),
        Some(Command::Paths(cmd)) => paths(cmd),
        Some(Command::Hints(cmd)) => hints(cmd),
        Some(Command::Graph(cmd)) => graph(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
