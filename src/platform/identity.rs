// YouTube Downloader - platform/identity.rs
//
// Host platform identity as a closed enum. Platform-specific behaviour is
// selected by exhaustive `match` on `Platform`, so adding a platform is a
// compile-checked change.

use std::fmt;

/// The operating system family the process is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

/// How a file or folder is handed to the desktop environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// The OS shell-association primitive.
    Native,
    /// An external opener executable given the path as its only argument.
    Command(&'static str),
}

impl Platform {
    /// Identity of the host. Not cached; a pure function of the build target.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a host OS name to a platform, case-insensitively.
    ///
    /// Accepts both `darwin` (uname style) and `macos` (Rust target style).
    pub fn from_os_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "windows" => Self::Windows,
            "darwin" | "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Unknown,
        }
    }

    /// Lower-case identifier (`windows`, `macos`, `linux`, `unknown`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Unknown => "unknown",
        }
    }

    /// The mechanism used to reveal a folder or open a file.
    ///
    /// Unknown Unix-likes get `xdg-open` as the best available guess.
    pub fn open_action(self) -> OpenAction {
        match self {
            Self::Windows => OpenAction::Native,
            Self::MacOs => OpenAction::Command("open"),
            Self::Linux | Self::Unknown => OpenAction::Command("xdg-open"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
