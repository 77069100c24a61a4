// YouTube Downloader - app/plan.rs
//
// Download preflight: validate the user's request and build the yt-dlp
// argument vector. Running the download is left to the caller.

use crate::app::tool::ToolAvailability;
use crate::core::cookies::CookieOptions;
use crate::core::quality::Quality;
use crate::core::validate::{self, OutputDirStatus};
use crate::platform::launch::Launcher;
use crate::platform::probe::ToolProbe;
use crate::util::constants;
use crate::util::error::ValidationError;
use std::path::PathBuf;

/// A validated download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub video_id: String,
    pub quality: Quality,
    pub output_dir: PathBuf,
    pub output_dir_status: OutputDirStatus,
    /// Set when the preset needs the media tool and it is missing. The
    /// download may still be attempted.
    pub tool_warning: Option<String>,
    /// Arguments for yt-dlp, ending with the URL.
    pub ytdlp_args: Vec<String>,
}

/// Builds download plans against the current tool status and cookie choice.
pub struct DownloadPlanner<'a, P, L> {
    tool: &'a mut ToolAvailability<P, L>,
    cookies: CookieOptions,
}

impl<'a, P: ToolProbe, L: Launcher> DownloadPlanner<'a, P, L> {
    pub fn new(tool: &'a mut ToolAvailability<P, L>, cookies: CookieOptions) -> Self {
        Self { tool, cookies }
    }

    /// Validate `url`, `quality` and `output_dir` in that order and build the
    /// argument vector. The first rejection is returned.
    pub fn plan(
        &mut self,
        url: &str,
        quality: &str,
        output_dir: &str,
    ) -> Result<DownloadPlan, ValidationError> {
        let video_id = validate::validate_url(url)?;
        let quality = validate::validate_quality(quality)?;
        let output_dir_status = validate::validate_output_directory(output_dir)?;
        let output_dir = PathBuf::from(output_dir.trim());

        let tool_warning = (quality.requires_tool() && !self.tool.is_available(false))
            .then(|| self.tool.quality_warning_message(quality.code()));
        if tool_warning.is_some() {
            tracing::warn!(quality = %quality, "Selected quality needs the media tool, which is missing");
        }

        let mut args = quality.ytdlp_args();
        args.extend(self.cookies.ytdlp_args());
        if self.tool.is_explicit_path() {
            args.push("--ffmpeg-location".to_string());
            args.push(self.tool.program().to_string());
        }
        args.push("-o".to_string());
        args.push(
            output_dir
                .join(constants::OUTPUT_TEMPLATE)
                .to_string_lossy()
                .into_owned(),
        );
        args.push(url.trim().to_string());

        tracing::info!(
            video_id = %video_id,
            quality = %quality,
            output_dir = %output_dir.display(),
            "Download planned"
        );

        Ok(DownloadPlan {
            video_id,
            quality,
            output_dir,
            output_dir_status,
            tool_warning,
            ytdlp_args: args,
        })
    }
}
