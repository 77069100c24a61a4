// YouTube Downloader - core/validate.rs
//
// Validation of user input before a download is planned: YouTube URLs,
// output directories, cookie files and quality codes.
//
// Rejections carry a `ValidationError` whose `Display` is the message the
// UI shows verbatim.

use super::quality::Quality;
use crate::util::error::ValidationError;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Single-video URL shapes. Group 1 is the 11-character video id.
const VIDEO_PATTERNS: &[&str] = &[
    r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
    r"^(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})",
    r"^(?:https?://)?youtu\.be/([a-zA-Z0-9_-]{11})",
    r"^(?:https?://)?(?:www\.)?youtube\.com/v/([a-zA-Z0-9_-]{11})",
    r"^(?:https?://)?(?:m\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
];

/// Playlist URL shapes. Group 1 is the playlist id.
const PLAYLIST_PATTERNS: &[&str] = &[
    r"^(?:https?://)?(?:www\.)?youtube\.com/playlist\?list=([a-zA-Z0-9_-]+)",
    r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?.*list=([a-zA-Z0-9_-]+)",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .expect("built-in URL pattern must compile")
        })
        .collect()
}

fn video_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(VIDEO_PATTERNS))
}

fn playlist_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(PLAYLIST_PATTERNS))
}

// =============================================================================
// URLs
// =============================================================================

/// True for any recognised YouTube video or playlist URL.
pub fn is_valid_youtube_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty()
        && video_regexes()
            .iter()
            .chain(playlist_regexes())
            .any(|re| re.is_match(url))
}

pub fn is_playlist_url(url: &str) -> bool {
    let url = url.trim();
    playlist_regexes().iter().any(|re| re.is_match(url))
}

/// The 11-character video id of a single-video URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    video_regexes()
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Accept a single-video YouTube URL and return its video id.
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_valid_youtube_url(url) {
        return Err(ValidationError::NotYouTubeUrl);
    }
    if is_playlist_url(url) {
        return Err(ValidationError::PlaylistUnsupported);
    }
    extract_video_id(url).ok_or(ValidationError::NotYouTubeUrl)
}

// =============================================================================
// Paths
// =============================================================================

/// Outcome of a successful output directory check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDirStatus {
    /// The directory exists and is writable.
    Exists,
    /// The directory does not exist yet but its parent is writable.
    WillBeCreated,
}

impl OutputDirStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::Exists => "Valid output directory",
            Self::WillBeCreated => "Directory will be created",
        }
    }
}

/// True if the current user can create files in `path`.
///
/// Permission bits alone cannot answer this (ownership, ACLs, read-only
/// mounts), so a throwaway file is created and removed.
fn is_writable_dir(path: &Path) -> bool {
    path.is_dir()
        && tempfile::Builder::new()
            .prefix(".ytdownloader-write-check")
            .tempfile_in(path)
            .is_ok()
}

/// True if a directory exists at `path` or could be created there.
pub fn can_create_directory(path: &Path) -> bool {
    if path.exists() {
        return is_writable_dir(path);
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => is_writable_dir(parent),
        _ => true,
    }
}

/// Check that `path` is usable as a download destination.
pub fn validate_output_directory(path: &str) -> Result<OutputDirStatus, ValidationError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDirectory);
    }
    let dir = PathBuf::from(trimmed);

    if dir.is_dir() {
        return if is_writable_dir(&dir) {
            Ok(OutputDirStatus::Exists)
        } else {
            Err(ValidationError::DirectoryNotWritable { path: dir })
        };
    }

    if can_create_directory(&dir) {
        Ok(OutputDirStatus::WillBeCreated)
    } else {
        Err(ValidationError::CannotCreateDirectory { path: dir })
    }
}

/// Check that `path` names an existing, non-empty cookie file.
pub fn validate_cookie_file(path: &str) -> Result<PathBuf, ValidationError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCookieFile);
    }
    let file = PathBuf::from(trimmed);

    if !file.is_file() {
        return Err(ValidationError::CookieFileMissing { path: file });
    }
    match std::fs::metadata(&file) {
        Ok(m) if m.len() == 0 => Err(ValidationError::CookieFileEmpty { path: file }),
        Ok(_) => Ok(file),
        Err(_) => Err(ValidationError::CookieFileUnreadable { path: file }),
    }
}

// =============================================================================
// Quality
// =============================================================================

pub fn is_valid_quality(code: &str) -> bool {
    Quality::from_code(code).is_some()
}

pub fn validate_quality(code: &str) -> Result<Quality, ValidationError> {
    code.parse()
}
