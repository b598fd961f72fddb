use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::{Builder, Utf8TempDir};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A scratch directory owned by a single install session.
///
/// Created under the storage root's `tmp/` directory and released with a
/// spawned, best-effort recursive removal so session completion is never
/// gated on cleanup latency. Dropping an unreleased `Scratch` (e.g. on a
/// panic) still removes the directory synchronously.
#[derive(Debug)]
pub struct Scratch {
    dir: Utf8TempDir,
}

impl Scratch {
    /// Create a fresh scratch directory under `parent`, creating `parent`
    /// itself if needed.
    pub fn create_in(parent: &Utf8Path) -> io::Result<Self> {
        fs_err::create_dir_all(parent)?;
        let dir = Builder::new().prefix("kitup-").tempdir_in(parent)?;
        debug!("Created scratch directory {}", dir.path());
        Ok(Self { dir })
    }

    /// The scratch directory path.
    pub fn path(&self) -> &Utf8Path {
        self.dir.path()
    }

    /// A path inside the scratch directory.
    pub fn join(&self, rest: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.dir.path().join(rest)
    }

    /// Release the scratch directory.
    ///
    /// Removal runs on a blocking task; its failure is logged and never
    /// escalated. The handle is returned so tests can await completion,
    /// production call sites ignore it.
    pub fn release(self) -> JoinHandle<()> {
        let dir = self.dir;
        tokio::task::spawn_blocking(move || {
            let path = dir.path().to_owned();
            match dir.close() {
                Ok(()) => debug!("Removed scratch directory {path}"),
                Err(err) => warn!("Failed to remove scratch directory {path}: {err}"),
            }
        })
    }
}
