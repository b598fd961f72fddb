use current_platform::CURRENT_PLATFORM;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

/// Error returned when the current platform is not supported by kitup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("kitup does not support your platform ({platform})")]
pub struct InvalidPlatformError {
    pub platform: String,
}

/// The operating-system families kitup can install tools on.
///
/// Using an enum with no wildcard fallback ensures the compiler enforces
/// exhaustive handling: every tool descriptor must carry a download URL and
/// a binary path for every variant, checked at definition time rather than
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum HostOs {
    Windows,
    Macos,
    Linux,
}

impl HostOs {
    /// Detect the current host OS.
    ///
    /// Checks the `KITUP_TEST_OS` env var first (for testing), then falls
    /// back to the compile-time `CURRENT_PLATFORM` target triple.
    pub fn current() -> Result<Self, InvalidPlatformError> {
        if let Ok(os) = std::env::var("KITUP_TEST_OS") {
            Self::from_name(&os)
        } else {
            Self::from_target_triple(CURRENT_PLATFORM)
        }
    }

    /// Parse a Rust target triple (e.g. `aarch64-apple-darwin`) into a `HostOs`.
    pub fn from_target_triple(triple: &str) -> Result<Self, InvalidPlatformError> {
        let os = triple.split('-').nth(2).unwrap_or(triple);
        match os {
            "windows" => Ok(Self::Windows),
            "darwin" => Ok(Self::Macos),
            "linux" => Ok(Self::Linux),
            _ => Err(InvalidPlatformError {
                platform: triple.to_string(),
            }),
        }
    }

    /// Parse a normalized OS name (`"windows"`, `"macos"`, `"linux"`).
    pub fn from_name(name: &str) -> Result<Self, InvalidPlatformError> {
        match name {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::Macos),
            "linux" => Ok(Self::Linux),
            other => Err(InvalidPlatformError {
                platform: other.to_string(),
            }),
        }
    }

    /// The normalized OS name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Linux => "linux",
        }
    }

    /// Whether this is the Windows family.
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// The executable filename suffix for this OS family.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Macos | Self::Linux => "",
        }
    }

    /// All supported OS families.
    ///
    /// **Maintainer note:** When adding a new variant, add it here too.
    /// The exhaustive matches in every other method will force a compiler
    /// error when you add a variant, bringing you into this file.
    pub fn all() -> &'static [Self] {
        &[Self::Windows, Self::Macos, Self::Linux]
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
