use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use miette::Result;

mod commands;
mod config;
mod progress;
mod prompt;
mod telemetry;

use commands::list::OutputFormat;
use config::Config;
use kitup_tools::ToolId;

#[derive(Parser)]
#[command(version, about = "Installs the native CLI tools the toolkit depends on", long_about = None)]
struct Cli {
    #[command(flatten)]
    global_args: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Storage root for managed tools and scratch space
    #[arg(global = true, long, env = "KITUP_STORAGE_DIR")]
    storage_dir: Option<Utf8PathBuf>,

    /// Download artifacts from this base URL instead of the canonical
    /// upstream locations (mirrors, testing)
    #[arg(global = true, long, env = "KITUP_SOURCE_BASE_URL")]
    source_base_url: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Download and install a tool into the managed directory")]
    Install {
        /// The tool to install
        tool: ToolId,

        /// Install without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    #[command(about = "Show the command the toolkit would use for a tool")]
    Which {
        /// The tool to look up
        tool: ToolId,
    },

    #[command(about = "List all known tools and their availability")]
    List {
        /// Output format for the tool list
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Show only tools that are currently available
        #[arg(long)]
        installed_only: bool,
    },

    #[command(about = "Remove a tool from the managed directory")]
    Uninstall {
        /// The tool to remove
        tool: ToolId,
    },

    #[command(about = "Show the managed install directory")]
    Dir,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(cli.global_args.verbosity.tracing_level_filter().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new(&cli.global_args)?;

    let code = match cli.command {
        Command::Install { tool, yes } => {
            commands::install::install(&config, tool, yes).await?;
            ExitCode::SUCCESS
        }
        Command::Which { tool } => commands::which::which(&config, tool).await,
        Command::List {
            format,
            installed_only,
        } => {
            commands::list::list(&config, format, installed_only).await?;
            ExitCode::SUCCESS
        }
        Command::Uninstall { tool } => {
            commands::uninstall::uninstall(&config, tool)?;
            ExitCode::SUCCESS
        }
        Command::Dir => {
            commands::dir::dir(&config);
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
