// YouTube Downloader - platform/paths.rs
//
// Platform-correct locations: downloads folder, app-data folder, bundled
// resources, and filesystem-safe file names.
//
// Every public function is total. The `*_for` variants take the platform,
// home directory and environment explicitly so each platform's rules can be
// exercised from any host.

use super::identity::Platform;
use crate::util::constants;
use crate::util::error::AppDataError;
use directories::BaseDirs;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// The current user's home directory, if the OS reports one.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

// =============================================================================
// Downloads
// =============================================================================

/// Default download folder for the host.
pub fn default_download_folder() -> PathBuf {
    default_download_folder_for(Platform::current(), home_dir().as_deref())
}

/// `~/Downloads` on the three supported platforms when it exists, otherwise
/// the relative `./downloads`.
pub fn default_download_folder_for(platform: Platform, home: Option<&Path>) -> PathBuf {
    let candidate = match platform {
        Platform::Windows | Platform::MacOs | Platform::Linux => {
            home.map(|h| h.join(constants::DOWNLOADS_DIR_NAME))
        }
        Platform::Unknown => None,
    };

    match candidate {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from(constants::FALLBACK_DOWNLOAD_DIR),
    }
}

// =============================================================================
// App data
// =============================================================================

/// Per-user application data folder for the host, or `None` when the
/// platform has no convention or the required variable is unset.
pub fn app_data_folder() -> Option<PathBuf> {
    app_data_folder_for(Platform::current(), home_dir().as_deref(), |key| {
        std::env::var_os(key)
    })
}

/// Resolve the app-data folder using the given environment lookup.
///
/// - Windows: `%APPDATA%\YouTubeDownloader`
/// - macOS: `~/Library/Application Support/YouTubeDownloader`
/// - Linux: `$XDG_CONFIG_HOME/YouTubeDownloader`, else `~/.config/YouTubeDownloader`
pub fn app_data_folder_for(
    platform: Platform,
    home: Option<&Path>,
    env: impl Fn(&str) -> Option<OsString>,
) -> Option<PathBuf> {
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    match platform {
        Platform::Windows => non_empty(constants::ENV_APPDATA).map(|d| d.join(constants::APP_ID)),
        Platform::MacOs => home.map(|h| {
            h.join("Library")
                .join("Application Support")
                .join(constants::APP_ID)
        }),
        Platform::Linux => non_empty(constants::ENV_XDG_CONFIG_HOME)
            .or_else(|| home.map(|h| h.join(".config")))
            .map(|d| d.join(constants::APP_ID)),
        Platform::Unknown => None,
    }
}

/// Create the host app-data folder if needed and return it.
///
/// Falls back to `.` when there is no app-data location or it cannot be
/// created; storage there is a convenience, not a requirement.
pub fn ensure_app_data_folder() -> PathBuf {
    ensure_folder_or_fallback(app_data_folder())
}

/// Create `folder` (and parents) or return the `.` fallback, logging why.
pub fn ensure_folder_or_fallback(folder: Option<PathBuf>) -> PathBuf {
    try_ensure_folder(folder).unwrap_or_else(|e| {
        log_app_data_fallback(&e);
        PathBuf::from(constants::FALLBACK_APP_DATA_DIR)
    })
}

/// Create `folder` (and parents), reporting why it cannot be used.
///
/// For callers that must pick a folder before logging is initialised and
/// report the reason afterwards with [`log_app_data_fallback`].
pub fn try_ensure_folder(folder: Option<PathBuf>) -> Result<PathBuf, AppDataError> {
    let folder = folder.ok_or(AppDataError::NoLocation)?;
    std::fs::create_dir_all(&folder).map_err(|source| AppDataError::Create {
        path: folder.clone(),
        source,
    })?;
    Ok(folder)
}

/// Log an app-data fallback: permission problems at warn, the rest at debug.
pub fn log_app_data_fallback(e: &AppDataError) {
    match e {
        AppDataError::Create { path, source } if source.kind() == io::ErrorKind::PermissionDenied => {
            tracing::warn!(
                path = %path.display(),
                error = %source,
                "Permission denied creating app data folder, using current directory"
            );
        }
        AppDataError::Create { path, source } => {
            tracing::debug!(
                path = %path.display(),
                error = %source,
                "Could not create app data folder, using current directory"
            );
        }
        AppDataError::NoLocation => {
            tracing::debug!("No app data location for this platform, using current directory");
        }
    }
}

// =============================================================================
// Packaged resources
// =============================================================================

/// Directory holding bundled resources for an executable at `exe`, if the
/// executable is laid out as a packaged build.
///
/// Recognised layouts:
/// - macOS bundle: `Foo.app/Contents/MacOS/<exe>` with `Contents/Resources`
/// - installer layout: `<exe dir>/resources/`
pub fn bundle_resource_dir(exe: &Path) -> Option<PathBuf> {
    let exe_dir = exe.parent()?;

    if exe_dir.file_name().is_some_and(|n| n == "MacOS") {
        if let Some(contents) = exe_dir.parent() {
            if contents.file_name().is_some_and(|n| n == "Contents") {
                let resources = contents.join("Resources");
                if resources.is_dir() {
                    return Some(resources);
                }
            }
        }
    }

    let sibling = exe_dir.join(constants::RESOURCES_DIR_NAME);
    sibling.is_dir().then_some(sibling)
}

/// True when running as a packaged build rather than from a development tree.
pub fn is_packaged_executable() -> bool {
    std::env::current_exe()
        .ok()
        .and_then(|exe| bundle_resource_dir(&exe))
        .is_some()
}

/// Resolve `relative` against the bundled resources when packaged, otherwise
/// against the current working directory.
pub fn resource_path(relative: impl AsRef<Path>) -> PathBuf {
    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| bundle_resource_dir(&exe));
    let base = bundled.unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join(relative)
}

// =============================================================================
// Filenames
// =============================================================================

/// Make `name` safe to use as a file name on Windows, macOS and Linux.
///
/// Invalid and control characters become `_`, the result is capped at 255
/// UTF-8 bytes on a character boundary, leading/trailing dots and spaces are
/// stripped, and an empty result becomes `download`. Idempotent.
pub fn safe_filename(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len().min(constants::MAX_FILENAME_BYTES));
    for c in name.chars() {
        let c = if c.is_control() || constants::INVALID_FILENAME_CHARS.contains(&c) {
            constants::FILENAME_REPLACEMENT_CHAR
        } else {
            c
        };
        if replaced.len() + c.len_utf8() > constants::MAX_FILENAME_BYTES {
            break;
        }
        replaced.push(c);
    }

    // Strip after truncating: the cut can expose a trailing dot or space.
    let trimmed = replaced.trim_matches(|c| c == '.' || c == ' ');

    if trimmed.is_empty() {
        constants::DEFAULT_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}
