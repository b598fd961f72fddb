use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use kitup_platform::HostOs;

use super::{
    InstallContext, PlatformInstaller, bad_artifact, check_os, copy_tree, run_checked, untar_gz,
    unzip,
};
use crate::error::InstallError;
use crate::process::RunRequest;
use crate::tool::ToolId;

const PLUGIN_DIR: &str = "sessionmanagerplugin";
/// Where the plugin tree lives inside the macOS payload and the Debian
/// data archive.
const PLUGIN_PAYLOAD_TREE: &str = "usr/local/sessionmanagerplugin";

/// Session Manager Plugin on Windows: a zip whose only interesting member
/// is a second zip, which holds the actual plugin tree.
pub struct SsmZip;

#[async_trait]
impl PlatformInstaller for SsmZip {
    fn tool(&self) -> ToolId {
        ToolId::SessionManagerPlugin
    }

    fn os(&self) -> HostOs {
        HostOs::Windows
    }

    async fn install(
        &self,
        ctx: &InstallContext<'_>,
        artifact: &Utf8Path,
        scratch: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError> {
        check_os(ctx, HostOs::Windows)?;

        let outer = scratch.join("outer");
        unzip(artifact, &outer)?;

        let inner = outer.join("package.zip");
        if !inner.is_file() {
            return Err(bad_artifact(artifact, "missing inner package.zip"));
        }

        let plugin_dir = target.join(PLUGIN_DIR);
        unzip(&inner, &plugin_dir)?;

        Ok(plugin_dir.join("bin"))
    }
}

/// Session Manager Plugin on macOS: expand the installer package with
/// `pkgutil`, decompress its payload, and copy the plugin tree over.
pub struct SsmPkg;

#[async_trait]
impl PlatformInstaller for SsmPkg {
    fn tool(&self) -> ToolId {
        ToolId::SessionManagerPlugin
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

        let expanded = scratch.join("expanded");
        let request = RunRequest::new("pkgutil").args([
            "--expand",
            artifact.as_str(),
            expanded.as_str(),
        ]);
        run_checked(ctx, request, artifact).await?;

        let payload = expanded.join("Payload");
        if !payload.is_file() {
            return Err(bad_artifact(artifact, "expanded package has no Payload"));
        }

        let unpacked = scratch.join("payload");
        untar_gz(&payload, &unpacked)?;

        let tree = unpacked.join(PLUGIN_PAYLOAD_TREE);
        if !tree.is_dir() {
            return Err(bad_artifact(
                artifact,
                format!("payload does not contain {PLUGIN_PAYLOAD_TREE}"),
            ));
        }

        let plugin_dir = target.join(PLUGIN_DIR);
        copy_tree(&tree, &plugin_dir)?;

        Ok(plugin_dir.join("bin"))
    }
}

/// Session Manager Plugin on Linux: a Debian package. Extract its members
/// with `ar`, decompress the data archive, and copy the plugin tree over.
pub struct SsmDeb;

#[async_trait]
impl PlatformInstaller for SsmDeb {
    fn tool(&self) -> ToolId {
        ToolId::SessionManagerPlugin
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

        let request = RunRequest::new("ar").args(["x", artifact.as_str()]).cwd(scratch);
        run_checked(ctx, request, artifact).await?;

        let data = scratch.join("data.tar.gz");
        if !data.is_file() {
            return Err(bad_artifact(artifact, "missing data.tar.gz member"));
        }

        let unpacked = scratch.join("data");
        untar_gz(&data, &unpacked)?;

        let tree = unpacked.join(PLUGIN_PAYLOAD_TREE);
        if !tree.is_dir() {
            return Err(bad_artifact(
                artifact,
                format!("data archive does not contain {PLUGIN_PAYLOAD_TREE}"),
            ));
        }

        let plugin_dir = target.join(PLUGIN_DIR);
        copy_tree(&tree, &plugin_dir)?;

        Ok(plugin_dir.join("bin"))
    }
}
