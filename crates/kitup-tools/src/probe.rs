use camino::{Utf8Path, Utf8PathBuf};
use kitup_platform::HostOs;
use tracing::debug;

use crate::process::{ProcessRunner, RunRequest};
use crate::tool::Tool;

const VERSION_FLAG: &str = "--version";

/// Check for a tool on the system search path by running its bare command
/// name with a version flag.
pub async fn global_command(
    runner: &dyn ProcessRunner,
    tool: &Tool,
    os: HostOs,
) -> Option<Utf8PathBuf> {
    let name = tool.command_name(os);
    if runs_ok(runner, name).await {
        Some(Utf8PathBuf::from(name))
    } else {
        None
    }
}

/// Check for a tool inside the managed install directory.
pub async fn local_command(
    runner: &dyn ProcessRunner,
    tool: &Tool,
    os: HostOs,
    install_dir: &Utf8Path,
) -> Option<Utf8PathBuf> {
    let path = install_dir.join(tool.relative_command_path(os));
    if runs_ok(runner, path.as_str()).await {
        Some(path)
    } else {
        None
    }
}

/// The command the toolkit should use for a tool: a globally installed
/// copy wins over the managed one.
///
/// `None` means the tool is unavailable, which is a normal outcome rather
/// than an error.
pub async fn cli_command(
    runner: &dyn ProcessRunner,
    tool: &Tool,
    os: HostOs,
    install_dir: &Utf8Path,
) -> Option<Utf8PathBuf> {
    if let Some(command) = global_command(runner, tool, os).await {
        return Some(command);
    }
    local_command(runner, tool, os, install_dir).await
}

/// A command is available if executing it with the version flag succeeds.
/// Spawn failures count as "not available".
async fn runs_ok(runner: &dyn ProcessRunner, program: &str) -> bool {
    let request = RunRequest::new(program).arg(VERSION_FLAG);
    match runner.run(&request).await {
        Ok(0) => true,
        Ok(code) => {
            debug!("`{program} {VERSION_FLAG}` exited with status {code}");
            false
        }
        Err(err) => {
            debug!("`{program} {VERSION_FLAG}` failed to run: {err}");
            false
        }
    }
}
