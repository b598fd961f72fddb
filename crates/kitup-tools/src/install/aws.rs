use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use kitup_platform::HostOs;

use super::{InstallContext, PlatformInstaller, bad_artifact, check_os, run_checked, unzip};
use crate::error::InstallError;
use crate::process::RunRequest;
use crate::tool::ToolId;

/// AWS CLI on Windows: administrative extraction of the MSI into the
/// managed install directory.
pub struct AwsMsi;

#[async_trait]
impl PlatformInstaller for AwsMsi {
    fn tool(&self) -> ToolId {
        ToolId::Aws
    }

    fn os(&self) -> HostOs {
        HostOs::Windows
    }

    async fn install(
        &self,
        ctx: &InstallContext<'_>,
        artifact: &Utf8Path,
        _scratch: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError> {
        check_os(ctx, HostOs::Windows)?;

        let request = RunRequest::new("msiexec").args([
            "/a",
            artifact.as_str(),
            "/qn",
            &format!("TARGETDIR={target}"),
        ]);
        run_checked(ctx, request, artifact).await?;

        // `/a` extraction reproduces the MSI's directory table under the
        // target dir.
        Ok(target.join("Amazon/AWSCLIV2"))
    }
}

/// AWS CLI on macOS: drive the system `installer` with a choice-changes
/// plist that redirects the package into the managed install directory.
pub struct AwsPkg;

fn choice_changes_xml(target: &Utf8Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
  <array>
    <dict>
      <key>choiceAttribute</key>
      <string>customLocation</string>
      <key>attributeSetting</key>
      <string>{target}</string>
      <key>choiceIdentifier</key>
      <string>default</string>
    </dict>
  </array>
</plist>
"#
    )
}

#[async_trait]
impl PlatformInstaller for AwsPkg {
    fn tool(&self) -> ToolId {
        ToolId::Aws
    }

    fn os(&self) -> HostOs {
        HostOs::Macos
    }

    async fn install(
        &self,
        ctx: &InstallContext<'_>,
        artifact: &Utf8Path,
        scratch: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError> {
        check_os(ctx, HostOs::Macos)?;

        let choices = scratch.join("choices.xml");
        fs_err::write(&choices, choice_changes_xml(target))?;

        let request = RunRequest::new("installer").args([
            "-pkg",
            artifact.as_str(),
            "-target",
            "CurrentUserHomeDirectory",
            "-applyChoiceChangesXML",
            choices.as_str(),
        ]);
        run_checked(ctx, request, artifact).await?;

        Ok(target.join("aws-cli"))
    }
}

/// AWS CLI on Linux: unzip the bundle and run its install script with
/// explicit install and bin-link directories.
pub struct AwsZip;

#[async_trait]
impl PlatformInstaller for AwsZip {
    fn tool(&self) -> ToolId {
        ToolId::Aws
    }

    fn os(&self) -> HostOs {
        HostOs::Linux
    }

    async fn install(
        &self,
        ctx: &InstallContext<'_>,
        artifact: &Utf8Path,
        scratch: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError> {
        check_os(ctx, HostOs::Linux)?;

        let unpacked = scratch.join("unpacked");
        unzip(artifact, &unpacked)?;

        let script = unpacked.join("aws/install");
        if !script.is_file() {
            return Err(bad_artifact(artifact, "missing aws/install script"));
        }

        let install_dir = target.join("aws-cli");
        let request = RunRequest::new(script.as_str())
            .args(["-i", install_dir.as_str(), "-b", install_dir.as_str()])
            .cwd(&unpacked);
        run_checked(ctx, request, artifact).await?;

        Ok(install_dir)
    }
}
