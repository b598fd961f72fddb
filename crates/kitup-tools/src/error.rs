use camino::Utf8PathBuf;
use kitup_platform::InvalidPlatformError;

/// Errors raised while installing a tool. All of them are fatal to the
/// current install attempt; nothing in this module retries.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("`{command}` exited with status {code} while installing {artifact}")]
    CommandFailed {
        command: String,
        code: i32,
        artifact: Utf8PathBuf,
    },
    #[error("unexpected artifact layout in {artifact}: {reason}")]
    BadArtifact {
        artifact: Utf8PathBuf,
        reason: String,
    },
    #[error("Could not verify installed CLIs")]
    Verification,
    #[error(transparent)]
    Platform(#[from] InvalidPlatformError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
