use anstream::println;
use camino::{Utf8Path, Utf8PathBuf};
use kitup_client::{Client, DownloadError, DownloadReporter};
use kitup_dirs::Scratch;
use kitup_tools::install::{InstallContext, installer_for};
use kitup_tools::process::{ProcessRunner, SystemRunner};
use kitup_tools::{InstallError, Tool, ToolId, probe};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::config::Config;
use crate::progress::BarReporter;
use crate::prompt::{AssumeYes, Confirmation, InstallPrompt, TerminalPrompt};
use crate::telemetry::{InstallOutcome, LogTelemetry, Telemetry};

/// Everything the install flow consumes from its host. Passed explicitly
/// so concurrent sessions share nothing and tests can swap every seam.
pub struct InstallDeps<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub client: &'a Client,
    pub prompt: &'a dyn InstallPrompt,
    pub telemetry: &'a dyn Telemetry,
    pub reporter: &'a dyn DownloadReporter,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("failed to install the {tool}")]
#[diagnostic(help("you can install it manually instead: {manual_install_url}"))]
pub struct Error {
    tool: &'static str,
    manual_install_url: &'static str,
    #[source]
    source: FailureKind,
}

#[derive(Debug, thiserror::Error)]
pub enum FailureKind {
    #[error("could not create a scratch directory")]
    Scratch(#[source] std::io::Error),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Install(#[from] InstallError),
}

type Result<T> = miette::Result<T, Error>;

/// Entry point for `kitup install`.
pub async fn install(config: &Config, tool: ToolId, yes: bool) -> Result<()> {
    let descriptor = Tool::get(tool);
    let client = Client::new().map_err(|source| Error {
        tool: descriptor.display_name,
        manual_install_url: descriptor.manual_install_url,
        source: FailureKind::Download(source),
    })?;
    let runner = SystemRunner;
    let reporter = BarReporter::new();
    let assume_yes = AssumeYes;
    let terminal = TerminalPrompt;
    let prompt: &dyn InstallPrompt = if yes { &assume_yes } else { &terminal };

    let deps = InstallDeps {
        runner: &runner,
        client: &client,
        prompt,
        telemetry: &LogTelemetry,
        reporter: &reporter,
    };

    match install_tool(config, &deps, tool).await? {
        Some(bin_dir) => println!(
            "Installed the {} into {}",
            descriptor.display_name.cyan(),
            bin_dir.cyan()
        ),
        None => println!(
            "Skipped installing the {}",
            descriptor.display_name.cyan()
        ),
    }

    Ok(())
}

/// The install state machine: confirm, prepare a scratch directory,
/// download, install, verify. Resolves to the tool's binary directory,
/// or `None` when the user cancelled. Exactly one telemetry record is
/// emitted per session.
pub async fn install_tool(
    config: &Config,
    deps: &InstallDeps<'_>,
    tool_id: ToolId,
) -> Result<Option<Utf8PathBuf>> {
    let tool = Tool::get(tool_id);

    match deps.prompt.confirm(tool) {
        Confirmation::Install => {}
        Confirmation::OpenManualInstructions => {
            println!(
                "Manual install instructions: {}",
                tool.manual_install_url.cyan()
            );
            deps.telemetry
                .record_install(tool_id, InstallOutcome::Cancelled);
            return Ok(None);
        }
        Confirmation::Dismiss => {
            deps.telemetry
                .record_install(tool_id, InstallOutcome::Cancelled);
            return Ok(None);
        }
    }

    let result = run_session(config, deps, tool).await;
    let outcome = if result.is_ok() {
        InstallOutcome::Succeeded
    } else {
        InstallOutcome::Failed
    };
    deps.telemetry.record_install(tool_id, outcome);

    match result {
        Ok(bin_dir) => Ok(Some(bin_dir)),
        Err(source) => Err(Error {
            tool: tool.display_name,
            manual_install_url: tool.manual_install_url,
            source,
        }),
    }
}

/// One install session. The scratch directory is released on every exit
/// path; removal is spawned and never awaited, and its failure never
/// overrides the session's outcome.
async fn run_session(
    config: &Config,
    deps: &InstallDeps<'_>,
    tool: &'static Tool,
) -> std::result::Result<Utf8PathBuf, FailureKind> {
    let scratch = Scratch::create_in(&config.scratch_parent).map_err(FailureKind::Scratch)?;
    let result = run_stages(config, deps, tool, scratch.path()).await;
    let _ = scratch.release();
    result
}

async fn run_stages(
    config: &Config,
    deps: &InstallDeps<'_>,
    tool: &'static Tool,
    scratch: &Utf8Path,
) -> std::result::Result<Utf8PathBuf, FailureKind> {
    let url = config.source_url(tool);
    let artifact = scratch.join(artifact_name(&url));
    println!("Downloading {}", url.cyan());
    deps.client
        .download_to(&url, &artifact, deps.reporter)
        .await?;

    let installer = installer_for(tool.id, config.os);
    let ctx = InstallContext {
        os: config.os,
        runner: deps.runner,
    };
    let bin_dir = installer
        .install(&ctx, &artifact, scratch, &config.install_dir)
        .await?;

    debug!("Verifying the {} inside {}", tool.id, config.install_dir);
    if probe::local_command(deps.runner, tool, config.os, &config.install_dir)
        .await
        .is_none()
    {
        return Err(InstallError::Verification.into());
    }

    Ok(bin_dir)
}

/// The artifact's filename, taken from the last segment of its URL.
fn artifact_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
