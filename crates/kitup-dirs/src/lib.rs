use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use etcetera::BaseStrategy;

mod removal;
mod scratch;

pub use removal::{Removal, rm_rf};
pub use scratch::Scratch;

/// Returns the default user-level storage root for kitup.
///
/// Corresponds to `$XDG_DATA_HOME/kitup` on Unix, falling back to a
/// `kitup` directory under the system temp dir if no home can be resolved.
pub fn user_storage_dir() -> Utf8PathBuf {
    let data_path = etcetera::base_strategy::choose_base_strategy()
        .ok()
        .map(|dirs| dirs.data_dir().join("kitup"))
        .unwrap_or_else(|| std::env::temp_dir().join("kitup"));

    Utf8PathBuf::from(data_path.to_string_lossy().as_ref())
}

/// The managed install directory under a storage root.
///
/// Every auto-installed tool lives in its own named subtree under this
/// single directory.
pub fn managed_install_dir(storage_root: &Utf8Path) -> Utf8PathBuf {
    storage_root.join("cli")
}

/// The parent directory for per-session scratch directories.
pub fn scratch_parent_dir(storage_root: &Utf8Path) -> Utf8PathBuf {
    storage_root.join("tmp")
}

/// Create a directory and all of its parents.
pub fn create_dir_all(path: &Utf8Path) -> io::Result<()> {
    fs_err::create_dir_all(path)
}
