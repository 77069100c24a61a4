// YouTube Downloader - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "YouTube Downloader";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "YouTubeDownloader";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Platform paths
// =============================================================================

/// Name of the per-user downloads folder under the home directory.
pub const DOWNLOADS_DIR_NAME: &str = "Downloads";

/// Download folder used when no platform downloads folder exists.
pub const FALLBACK_DOWNLOAD_DIR: &str = "./downloads";

/// Directory returned when the app-data folder cannot be resolved or created.
pub const FALLBACK_APP_DATA_DIR: &str = ".";

/// Environment variable holding the roaming app-data root on Windows.
pub const ENV_APPDATA: &str = "APPDATA";

/// Environment variable overriding the config root on Linux.
pub const ENV_XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";

/// Resource directory placed next to the executable by the installer layout.
pub const RESOURCES_DIR_NAME: &str = "resources";

/// Candidate terminal emulators probed on Linux, in preference order.
pub const LINUX_TERMINALS: &[&str] = &["gnome-terminal", "konsole", "xterm", "x-terminal-emulator"];

// =============================================================================
// Filenames
// =============================================================================

/// Characters that are invalid in filenames on at least one supported platform.
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replacement for each invalid filename character.
pub const FILENAME_REPLACEMENT_CHAR: char = '_';

/// Name substituted when sanitising leaves nothing behind.
pub const DEFAULT_FILENAME: &str = "download";

/// Maximum filename length in UTF-8 bytes. ext4 limits names to 255 bytes;
/// staying within it also keeps NTFS (255 UTF-16 units) and APFS happy.
pub const MAX_FILENAME_BYTES: usize = 255;

// =============================================================================
// External tool
// =============================================================================

/// Executable name of the media-processing tool.
pub const DEFAULT_TOOL_PROGRAM: &str = "ffmpeg";

/// Human-readable tool name used in status and warning text.
pub const TOOL_DISPLAY_NAME: &str = "FFmpeg";

/// Argument that makes the tool print its version and exit.
pub const TOOL_VERSION_ARG: &str = "-version";

/// Marker token preceding the version number on the first output line.
pub const TOOL_VERSION_MARKER: &str = "version";

/// Installation guide opened from the "tool missing" dialog.
pub const DEFAULT_GUIDE_URL: &str =
    "https://docs.google.com/document/d/1P9kSEdciggUlDxPvz-gbpKtTGatBlRskyylPLwpvQtI/edit?usp=sharing";

/// Default upper bound on the version query, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Minimum user-configurable probe timeout (seconds).
pub const MIN_PROBE_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable probe timeout (seconds).
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 60;

/// How often a running probe is polled for exit (ms).
pub const PROBE_POLL_INTERVAL_MS: u64 = 25;

/// Suffix appended to preset labels offered without the tool.
pub const LIMITED_LABEL_SUFFIX: &str = " (Limited)";

// =============================================================================
// Downloads
// =============================================================================

/// yt-dlp output template appended to the chosen output directory.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Container used when merging separate video and audio streams.
pub const MERGE_CONTAINER: &str = "mp4";

/// Audio codec for audio-only extraction.
pub const AUDIO_CODEC: &str = "mp3";

/// Audio bitrate for audio-only extraction.
pub const AUDIO_BITRATE: &str = "192K";

/// Quality preset selected on first run.
pub const DEFAULT_QUALITY: &str = "1080p";

/// Window geometry persisted for the GUI on first run.
pub const DEFAULT_WINDOW_GEOMETRY: &str = "900x700";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name (stored in the app-data folder).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User settings file name (stored in the app-data folder).
pub const SETTINGS_FILE_NAME: &str = "settings.json";
