use std::fmt::Display;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use kitup_platform::{HostOs, InvalidPlatformError};

use crate::error::InstallError;
use crate::process::{ProcessRunner, RunRequest};
use crate::tool::ToolId;

mod aws;
mod ssm;

pub use aws::{AwsMsi, AwsPkg, AwsZip};
pub use ssm::{SsmDeb, SsmPkg, SsmZip};

/// Everything an installer needs from its environment: the OS it believes
/// it is running on and the process seam. Passed explicitly so sessions
/// stay independent and testable.
pub struct InstallContext<'a> {
    pub os: HostOs,
    pub runner: &'a dyn ProcessRunner,
}

/// One installation procedure for a (tool, OS) pair.
#[async_trait]
pub trait PlatformInstaller: Send + Sync {
    fn tool(&self) -> ToolId;
    fn os(&self) -> HostOs;

    /// Unpack or run the downloaded `artifact`, installing into `target`.
    /// `scratch` is the session's temporary directory and may be used
    /// freely for intermediate extraction.
    ///
    /// Returns the directory that ends up holding the tool's binaries.
    async fn install(
        &self,
        ctx: &InstallContext<'_>,
        artifact: &Utf8Path,
        scratch: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError>;
}

/// Select the installer for a (tool, OS) pair. Total over both enums:
/// adding a tool or an OS without an installer does not compile.
pub fn installer_for(tool: ToolId, os: HostOs) -> &'static dyn PlatformInstaller {
    match (tool, os) {
        (ToolId::Aws, HostOs::Windows) => &AwsMsi,
        (ToolId::Aws, HostOs::Macos) => &AwsPkg,
        (ToolId::Aws, HostOs::Linux) => &AwsZip,
        (ToolId::SessionManagerPlugin, HostOs::Windows) => &SsmZip,
        (ToolId::SessionManagerPlugin, HostOs::Macos) => &SsmPkg,
        (ToolId::SessionManagerPlugin, HostOs::Linux) => &SsmDeb,
    }
}

/// Installers refuse to run on any OS other than their own. A mismatch is
/// a caller bug, not a user-recoverable condition.
fn check_os(ctx: &InstallContext<'_>, expected: HostOs) -> Result<(), InstallError> {
    if ctx.os == expected {
        Ok(())
    } else {
        Err(InvalidPlatformError {
            platform: ctx.os.name().to_string(),
        }
        .into())
    }
}

/// Run an external command; a non-zero exit is fatal to the install.
async fn run_checked(
    ctx: &InstallContext<'_>,
    request: RunRequest,
    artifact: &Utf8Path,
) -> Result<(), InstallError> {
    let code = ctx.runner.run(&request).await?;
    if code != 0 {
        return Err(InstallError::CommandFailed {
            command: request.command_line(),
            code,
            artifact: artifact.to_owned(),
        });
    }
    Ok(())
}

fn bad_artifact(artifact: &Utf8Path, reason: impl Display) -> InstallError {
    InstallError::BadArtifact {
        artifact: artifact.to_owned(),
        reason: reason.to_string(),
    }
}

/// Extract a zip archive into `dest`.
fn unzip(archive: &Utf8Path, dest: &Utf8Path) -> Result<(), InstallError> {
    fs_err::create_dir_all(dest)?;
    let file = fs_err::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|err| bad_artifact(archive, err))?;
    zip.extract(dest).map_err(|err| bad_artifact(archive, err))?;
    Ok(())
}

/// Extract a gzipped tar archive into `dest`.
fn untar_gz(archive: &Utf8Path, dest: &Utf8Path) -> Result<(), InstallError> {
    fs_err::create_dir_all(dest)?;
    let file = fs_err::File::open(archive)?;
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));
    tar.unpack(dest).map_err(|err| bad_artifact(archive, err))?;
    Ok(())
}

/// Copy a directory tree into the managed install directory.
fn copy_tree(src: &Utf8Path, dest: &Utf8Path) -> Result<(), InstallError> {
    dircpy::copy_dir(src, dest)?;
    Ok(())
}
