// YouTube Downloader - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The public platform and tool operations stay total (bool / Option /
// fallback); these types live at the seams underneath them so each call site
// decides which failures it masks.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type for fallible YouTube Downloader operations.
#[derive(Debug)]
pub enum AppError {
    /// External tool version query failed.
    Probe(ProbeError),

    /// Opening a file, folder or URL failed.
    Launch(LaunchError),

    /// User input was rejected.
    Validation(ValidationError),

    /// Settings could not be read or written.
    Settings(SettingsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe(e) => write!(f, "Tool probe error: {e}"),
            Self::Launch(e) => write!(f, "Launch error: {e}"),
            Self::Validation(e) => write!(f, "{e}"),
            Self::Settings(e) => write!(f, "Settings error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Probe(e) => Some(e),
            Self::Launch(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Settings(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Probe errors
// ---------------------------------------------------------------------------

/// Ways the external tool version query can fail.
#[derive(Debug)]
pub enum ProbeError {
    /// The executable was not found on the search path.
    NotFound { program: String },

    /// The process did not exit within the allowed time and was killed.
    TimedOut { program: String, timeout: Duration },

    /// The process exited unsuccessfully. `code` is `None` when terminated
    /// by a signal.
    NonZeroExit { program: String, code: Option<i32> },

    /// Any other launch or wait failure.
    Io { program: String, source: io::Error },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { program } => write!(f, "'{program}' was not found on PATH"),
            Self::TimedOut { program, timeout } => {
                write!(f, "'{program}' did not exit within {}s", timeout.as_secs())
            }
            Self::NonZeroExit {
                program,
                code: Some(code),
            } => write!(f, "'{program}' exited with status {code}"),
            Self::NonZeroExit {
                program,
                code: None,
            } => write!(f, "'{program}' was terminated by a signal"),
            Self::Io { program, source } => write!(f, "failed to run '{program}': {source}"),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ProbeError> for AppError {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

// ---------------------------------------------------------------------------
// Launch errors
// ---------------------------------------------------------------------------

/// Ways a platform "open" action can fail.
#[derive(Debug)]
pub enum LaunchError {
    /// The opener executable (`open`, `xdg-open`) is not installed.
    NotFound { program: &'static str },

    /// The opener ran but reported failure.
    NonZeroExit {
        program: &'static str,
        code: Option<i32>,
    },

    /// The opener could not be started.
    Io {
        program: &'static str,
        source: io::Error,
    },

    /// The native open primitive (shell association) failed.
    Native { target: String, source: io::Error },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { program } => write!(f, "'{program}' is not installed"),
            Self::NonZeroExit {
                program,
                code: Some(code),
            } => write!(f, "'{program}' exited with status {code}"),
            Self::NonZeroExit {
                program,
                code: None,
            } => write!(f, "'{program}' was terminated by a signal"),
            Self::Io { program, source } => write!(f, "failed to start '{program}': {source}"),
            Self::Native { target, source } => write!(f, "could not open '{target}': {source}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Native { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LaunchError> for AppError {
    fn from(e: LaunchError) -> Self {
        Self::Launch(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Rejected user input. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyUrl,
    NotYouTubeUrl,
    PlaylistUnsupported,
    EmptyDirectory,
    DirectoryNotWritable { path: PathBuf },
    CannotCreateDirectory { path: PathBuf },
    EmptyCookieFile,
    CookieFileMissing { path: PathBuf },
    CookieFileEmpty { path: PathBuf },
    CookieFileUnreadable { path: PathBuf },
    EmptyQuality,
    UnknownQuality { code: String, valid: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Please enter a URL"),
            Self::NotYouTubeUrl => write!(f, "Please enter a valid YouTube URL"),
            Self::PlaylistUnsupported => write!(f, "Playlist URLs are not supported yet"),
            Self::EmptyDirectory => write!(f, "Please enter a directory path"),
            Self::DirectoryNotWritable { .. } => write!(f, "Directory is not writable"),
            Self::CannotCreateDirectory { .. } => {
                write!(f, "Cannot create directory at this path")
            }
            Self::EmptyCookieFile => write!(f, "Please select a cookie file"),
            Self::CookieFileMissing { .. } => write!(f, "Cookie file does not exist"),
            Self::CookieFileEmpty { .. } => write!(f, "Cookie file is empty"),
            Self::CookieFileUnreadable { .. } => write!(f, "Cannot read cookie file"),
            Self::EmptyQuality => write!(f, "Please select a quality"),
            Self::UnknownQuality { valid, .. } => {
                write!(f, "Invalid quality. Must be one of: {valid}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Settings errors
// ---------------------------------------------------------------------------

/// Errors reading or writing the persisted user settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// JSON (de)serialisation failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "Invalid settings JSON '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

// ---------------------------------------------------------------------------
// App-data errors
// ---------------------------------------------------------------------------

/// Why the per-user app-data folder cannot be used.
#[derive(Debug)]
pub enum AppDataError {
    /// The platform has no convention or the required variable is unset.
    NoLocation,

    /// The folder (or a parent) could not be created.
    Create { path: PathBuf, source: io::Error },
}

impl fmt::Display for AppDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLocation => write!(f, "no app data location for this platform"),
            Self::Create { path, source } => {
                write!(f, "cannot create '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AppDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Create { source, .. } => Some(source),
            Self::NoLocation => None,
        }
    }
}

/// Convenience type alias for YouTube Downloader results.
pub type Result<T> = std::result::Result<T, AppError>;
