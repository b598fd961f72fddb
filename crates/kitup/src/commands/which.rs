use std::process::ExitCode;

use anstream::println;
use kitup_tools::process::SystemRunner;
use kitup_tools::{Tool, ToolId, probe};
use owo_colors::OwoColorize;

use crate::config::Config;

/// Print the command the toolkit would use for a tool, preferring a
/// globally installed copy over the managed one. Exits 1 quietly when
/// the tool is unavailable.
pub async fn which(config: &Config, tool: ToolId) -> ExitCode {
    let runner = SystemRunner;
    match probe::cli_command(&runner, Tool::get(tool), config.os, &config.install_dir).await {
        Some(command) => {
            println!("{}", command.cyan());
            ExitCode::SUCCESS
        }
        None => ExitCode::from(1),
    }
}
