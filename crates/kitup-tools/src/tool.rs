use std::fmt;
use std::str::FromStr;

use kitup_platform::HostOs;
use serde::Serialize;

/// The native tools kitup knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ToolId {
    Aws,
    SessionManagerPlugin,
}

impl ToolId {
    /// All supported tools.
    pub fn all() -> &'static [Self] {
        &[Self::Aws, Self::SessionManagerPlugin]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::SessionManagerPlugin => "session-manager-plugin",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool {name}; expected one of: aws, session-manager-plugin")]
pub struct ParseToolIdError {
    pub name: String,
}

impl FromStr for ToolId {
    type Err = ParseToolIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(Self::Aws),
            "session-manager-plugin" => Ok(Self::SessionManagerPlugin),
            other => Err(ParseToolIdError {
                name: other.to_string(),
            }),
        }
    }
}

/// Relative executable path under the managed install directory, per OS
/// family. Windows gets its own layout, macOS and Linux share one.
#[derive(Debug, Clone, Copy)]
pub struct OsFamilyPaths {
    pub windows: &'static str,
    pub unix: &'static str,
}

/// One value per supported OS. No `Option` fields: a tool entry that
/// misses a platform does not compile.
#[derive(Debug, Clone, Copy)]
pub struct PerOs {
    pub windows: &'static str,
    pub macos: &'static str,
    pub linux: &'static str,
}

impl PerOs {
    pub fn get(&self, os: HostOs) -> &'static str {
        match os {
            HostOs::Windows => self.windows,
            HostOs::Macos => self.macos,
            HostOs::Linux => self.linux,
        }
    }
}

/// Static descriptor for one installable tool.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub id: ToolId,
    pub display_name: &'static str,
    /// Upstream documentation for installing the tool by hand, offered
    /// whenever an automatic install is declined or fails.
    pub manual_install_url: &'static str,
    pub command_path: OsFamilyPaths,
    /// Canonical upstream artifact to download, per OS.
    pub source: PerOs,
}

static TOOLS: [Tool; 2] = [
    Tool {
        id: ToolId::Aws,
        display_name: "AWS CLI",
        manual_install_url:
            "https://docs.aws.amazon.com/cli/latest/userguide/getting-started-install.html",
        command_path: OsFamilyPaths {
            windows: "Amazon/AWSCLIV2/aws.exe",
            unix: "aws-cli/aws",
        },
        source: PerOs {
            windows: "https://awscli.amazonaws.com/AWSCLIV2.msi",
            macos: "https://awscli.amazonaws.com/AWSCLIV2.pkg",
            linux: "https://awscli.amazonaws.com/awscli-exe-linux-x86_64.zip",
        },
    },
    Tool {
        id: ToolId::SessionManagerPlugin,
        display_name: "SSM Session Manager Plugin",
        manual_install_url:
            "https://docs.aws.amazon.com/systems-manager/latest/userguide/session-manager-working-with-install-plugin.html",
        command_path: OsFamilyPaths {
            windows: "sessionmanagerplugin/bin/session-manager-plugin.exe",
            unix: "sessionmanagerplugin/bin/session-manager-plugin",
        },
        source: PerOs {
            windows: "https://s3.amazonaws.com/session-manager-downloads/plugin/latest/windows/SessionManagerPlugin.zip",
            macos: "https://s3.amazonaws.com/session-manager-downloads/plugin/latest/mac/session-manager-plugin.pkg",
            linux: "https://s3.amazonaws.com/session-manager-downloads/plugin/latest/ubuntu_64bit/session-manager-plugin.deb",
        },
    },
];

impl Tool {
    /// Look up the descriptor for a tool. Total over `ToolId`.
    pub fn get(id: ToolId) -> &'static Tool {
        match id {
            ToolId::Aws => &TOOLS[0],
            ToolId::SessionManagerPlugin => &TOOLS[1],
        }
    }

    /// All tool descriptors, in registry order.
    pub fn all() -> &'static [Tool] {
        &TOOLS
    }

    /// The upstream download URL for `os`.
    pub fn source_url(&self, os: HostOs) -> &'static str {
        self.source.get(os)
    }

    /// The executable's path relative to the managed install directory.
    pub fn relative_command_path(&self, os: HostOs) -> &'static str {
        if os.is_windows() {
            self.command_path.windows
        } else {
            self.command_path.unix
        }
    }

    /// The bare command name, used when probing the system search path.
    pub fn command_name(&self, os: HostOs) -> &'static str {
        let path = self.relative_command_path(os);
        path.rsplit('/').next().unwrap_or(path)
    }

    /// The tool's top-level subtree under the managed install directory,
    /// i.e. what `uninstall` removes.
    pub fn install_subtree(&self, os: HostOs) -> &'static str {
        let path = self.relative_command_path(os);
        path.split('/').next().unwrap_or(path)
    }
}
