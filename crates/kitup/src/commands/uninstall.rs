use anstream::println;
use bytesize::ByteSize;
use kitup_tools::{Tool, ToolId};
use owo_colors::OwoColorize;

use crate::config::Config;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

type Result<T> = miette::Result<T, Error>;

/// Remove a tool's subtree from the managed install directory.
pub fn uninstall(config: &Config, tool: ToolId) -> Result<()> {
    let tool = Tool::get(tool);
    let subtree = config.install_dir.join(tool.install_subtree(config.os));

    let removal = kitup_dirs::rm_rf(&subtree)?;
    if removal.is_empty() {
        println!(
            "The {} is not installed in {}",
            tool.display_name,
            config.install_dir.cyan()
        );
    } else {
        println!(
            "Removed the {} from {} ({})",
            tool.display_name.cyan(),
            config.install_dir.cyan(),
            ByteSize::b(removal.bytes).display().iec_short()
        );
    }

    Ok(())
}
