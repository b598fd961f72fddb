use std::io::{BufRead, Write};

use anstream::print;
use kitup_tools::Tool;
use owo_colors::OwoColorize;

/// What the user chose when asked to install a missing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Install,
    OpenManualInstructions,
    Dismiss,
}

/// Seam for the host's confirmation prompt.
pub trait InstallPrompt: Send + Sync {
    fn confirm(&self, tool: &Tool) -> Confirmation;
}

/// Interactive y/m/N prompt on the terminal. Anything unreadable or
/// unrecognized counts as a decline.
pub struct TerminalPrompt;

impl InstallPrompt for TerminalPrompt {
    fn confirm(&self, tool: &Tool) -> Confirmation {
        print!(
            "Install the {}? [y]es / [m]anual instructions / [N]o: ",
            tool.display_name.bold()
        );
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return Confirmation::Dismiss;
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Confirmation::Install,
            "m" | "manual" => Confirmation::OpenManualInstructions,
            _ => Confirmation::Dismiss,
        }
    }
}

/// Prompt used by `--yes`.
pub struct AssumeYes;

impl InstallPrompt for AssumeYes {
    fn confirm(&self, _tool: &Tool) -> Confirmation {
        Confirmation::Install
    }
}
