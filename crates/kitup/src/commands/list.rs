use std::io;

use anstream::println;
use kitup_tools::process::SystemRunner;
use kitup_tools::{Tool, ToolId, probe};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::Config;

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
struct ToolEntry {
    tool: ToolId,
    display_name: &'static str,
    installed: bool,
    /// The command the toolkit would use, when one is available.
    command: Option<String>,
}

/// Lists every tool in the registry with its probed availability.
pub async fn list(config: &Config, format: OutputFormat, installed_only: bool) -> Result<()> {
    let runner = SystemRunner;

    let mut entries = Vec::new();
    for tool in Tool::all() {
        let command = probe::cli_command(&runner, tool, config.os, &config.install_dir).await;
        entries.push(ToolEntry {
            tool: tool.id,
            display_name: tool.display_name,
            installed: command.is_some(),
            command: command.map(|path| path.into_string()),
        });
    }

    if installed_only {
        entries.retain(|entry| entry.installed);
    }

    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(io::stdout(), entries.as_slice())?,
        OutputFormat::Text => print_entries(&entries),
    }

    Ok(())
}

fn print_entries(entries: &[ToolEntry]) {
    let width = entries
        .iter()
        .map(|entry| entry.display_name.len())
        .max()
        .unwrap_or(0);

    for entry in entries {
        match &entry.command {
            Some(command) => println!(
                "{:width$} {} {}",
                entry.display_name,
                "[installed]".green(),
                command.cyan()
            ),
            None => println!(
                "{:width$} {}",
                entry.display_name,
                "[not installed]".dimmed()
            ),
        }
    }
}
