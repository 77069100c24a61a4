// YouTube Downloader - core/quality.rs
//
// Download quality presets, their yt-dlp format selection, and whether they
// need the external media tool (stream merging or audio transcoding).
//
// Presets are ordered best-first; that order is what the user sees.

use crate::util::constants;
use crate::util::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A selectable quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Best,
    P1080,
    P720,
    P480,
    P360,
    Audio,
}

impl Quality {
    /// Every preset, best-first.
    pub const ALL: [Quality; 6] = [
        Quality::Best,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
        Quality::Audio,
    ];

    /// Stable identifier persisted in settings and accepted on the CLI.
    pub fn code(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
            Self::Audio => "audio",
        }
    }

    /// Label shown in the quality picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Best => "Best Available",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
            Self::Audio => "Audio Only (MP3)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.code() == code)
    }

    /// True when the output is produced by merging separate video and audio
    /// streams, or by transcoding audio.
    pub fn requires_tool(self) -> bool {
        match self {
            Self::Best | Self::P1080 | Self::P720 | Self::Audio => true,
            Self::P480 | Self::P360 => false,
        }
    }

    /// yt-dlp `-f` format selector.
    ///
    /// Merged presets prefer H.264 video with AAC audio so the resulting mp4
    /// plays everywhere; single-file presets only pick pre-muxed streams.
    pub fn format_selector(self) -> String {
        match self {
            Self::Best => merged_selector(None),
            Self::P1080 => merged_selector(Some(1080)),
            Self::P720 => merged_selector(Some(720)),
            Self::P480 => single_file_selector(480),
            Self::P360 => single_file_selector(360),
            Self::Audio => "bestaudio[acodec^=mp4a]/bestaudio/best".to_string(),
        }
    }

    /// yt-dlp arguments selecting this preset, including post-processing.
    pub fn ytdlp_args(self) -> Vec<String> {
        let mut args = vec!["-f".to_string(), self.format_selector()];
        match self {
            Self::Best | Self::P1080 | Self::P720 => {
                args.push("--merge-output-format".to_string());
                args.push(constants::MERGE_CONTAINER.to_string());
            }
            Self::Audio => {
                args.push("-x".to_string());
                args.push("--audio-format".to_string());
                args.push(constants::AUDIO_CODEC.to_string());
                args.push("--audio-quality".to_string());
                args.push(constants::AUDIO_BITRATE.to_string());
            }
            Self::P480 | Self::P360 => {}
        }
        args
    }

    /// Comma-separated list of every code, for error messages.
    pub fn valid_codes() -> String {
        Self::ALL.map(Quality::code).join(", ")
    }
}

fn merged_selector(max_height: Option<u32>) -> String {
    let h = max_height
        .map(|h| format!("[height<={h}]"))
        .unwrap_or_default();
    format!(
        "bestvideo{h}[vcodec^=avc1][ext=mp4]+bestaudio[acodec^=mp4a][ext=m4a]/\
         bestvideo{h}[ext=mp4]+bestaudio[ext=m4a]/best{h}[ext=mp4]/best"
    )
}

fn single_file_selector(max_height: u32) -> String {
    format!("best[height<={max_height}][ext=mp4]/best[height<={max_height}]/worst")
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Quality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ValidationError::EmptyQuality);
        }
        Self::from_code(code).ok_or_else(|| ValidationError::UnknownQuality {
            code: code.to_string(),
            valid: Self::valid_codes(),
        })
    }
}

/// A `(label, code)` entry offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    pub label: String,
    pub code: &'static str,
}

/// Presets to offer given the tool's availability.
///
/// With the tool: every preset. Without it: only presets that work without
/// it, each labelled "(Limited)". Both lists keep best-first order.
pub fn supported_formats(tool_available: bool) -> Vec<FormatOption> {
    Quality::ALL
        .into_iter()
        .filter(|q| tool_available || !q.requires_tool())
        .map(|q| FormatOption {
            label: if tool_available {
                q.label().to_string()
            } else {
                format!("{}{}", q.label(), constants::LIMITED_LABEL_SUFFIX)
            },
            code: q.code(),
        })
        .collect()
}
