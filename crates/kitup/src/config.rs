use camino::Utf8PathBuf;
use kitup_platform::{HostOs, InvalidPlatformError};
use kitup_tools::Tool;

use crate::GlobalArgs;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Platform(#[from] InvalidPlatformError),
}

/// Resolved per-invocation settings. Sessions share nothing else.
#[derive(Debug, Clone)]
pub struct Config {
    pub os: HostOs,
    pub storage_root: Utf8PathBuf,
    /// The managed install directory. Every tool lives in its own named
    /// subtree under it.
    pub install_dir: Utf8PathBuf,
    /// Parent directory for per-session scratch directories.
    pub scratch_parent: Utf8PathBuf,
    pub source_base_url: Option<String>,
}

impl Config {
    pub fn new(global_args: &GlobalArgs) -> Result<Self, Error> {
        let os = HostOs::current()?;
        let storage_root = global_args
            .storage_dir
            .clone()
            .unwrap_or_else(kitup_dirs::user_storage_dir);
        let mut config = Self::for_storage_root(os, storage_root);
        config.source_base_url = global_args.source_base_url.clone();
        Ok(config)
    }

    pub fn for_storage_root(os: HostOs, storage_root: Utf8PathBuf) -> Self {
        let install_dir = kitup_dirs::managed_install_dir(&storage_root);
        let scratch_parent = kitup_dirs::scratch_parent_dir(&storage_root);
        Self {
            os,
            storage_root,
            install_dir,
            scratch_parent,
            source_base_url: None,
        }
    }

    /// The download URL for a tool on this host, honoring a configured
    /// mirror by swapping out everything but the artifact filename.
    pub fn source_url(&self, tool: &Tool) -> String {
        let url = tool.source_url(self.os);
        match &self.source_base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.rsplit('/').next().unwrap_or(url)
            ),
            None => url.to_string(),
        }
    }
}
