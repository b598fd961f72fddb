use std::fmt::Display;
use std::io;
use std::ops::{Add, AddAssign};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Remove a file or directory recursively, summing up what was removed.
///
/// A missing path removes nothing. Symlinks are removed themselves, never
/// followed, so a link out of the managed directory cannot drag unrelated
/// trees into the deletion.
pub fn rm_rf(path: impl AsRef<Utf8Path>) -> Result<Removal, io::Error> {
    let path = path.as_ref();
    debug!("Removing {path}");

    match fs_err::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => remove_dir_tree(path),
        Ok(metadata) => {
            fs_err::remove_file(path)?;
            Ok(Removal::new(0, metadata.len()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Removal::default()),
        Err(err) => Err(err),
    }
}

fn remove_dir_tree(path: &Utf8Path) -> Result<Removal, io::Error> {
    let mut removal = Removal::default();

    for entry in fs_err::read_dir(path)? {
        let entry = entry?;
        let entry_path = Utf8PathBuf::try_from(entry.path())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Invalid UTF-8 path"))?;

        if entry.file_type()?.is_dir() {
            removal += remove_dir_tree(&entry_path)?;
        } else {
            // Covers files and symlinks; DirEntry metadata never follows
            // the link.
            let metadata = entry.metadata()?;
            fs_err::remove_file(&entry_path)?;
            removal += Removal::new(0, metadata.len());
        }
    }

    fs_err::remove_dir(path)?;
    Ok(removal + Removal::new(1, 0))
}

/// A summary of the files and directories removed from the managed
/// install directory.
#[derive(Debug, Default, Clone)]
pub struct Removal {
    /// The number of directories removed.
    pub dirs: u64,
    /// The number of bytes removed.
    pub bytes: u64,
}

impl Removal {
    pub fn new(dirs: u64, bytes: u64) -> Self {
        Self { dirs, bytes }
    }

    /// Returns `true` if no files or directories were removed.
    pub fn is_empty(&self) -> bool {
        self.dirs == 0 && self.bytes == 0
    }
}

impl Add for Removal {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            dirs: self.dirs + other.dirs,
            bytes: self.bytes + other.bytes,
        }
    }
}

impl AddAssign for Removal {
    fn add_assign(&mut self, other: Self) {
        self.dirs += other.dirs;
        self.bytes += other.bytes;
    }
}

impl Display for Removal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dirs == 0 && self.bytes == 0 {
            write!(f, "Nothing to remove")
        } else if self.dirs == 0 {
            write!(f, "Removed {} bytes", self.bytes)
        } else if self.bytes == 0 {
            write!(f, "Removed {} directories", self.dirs)
        } else {
            write!(
                f,
                "Removed {} directories ({} bytes)",
                self.dirs, self.bytes
            )
        }
    }
}
