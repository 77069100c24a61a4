// YouTube Downloader - app/tool.rs
//
// Availability of the external media tool (FFmpeg) and the user-facing
// status, warnings and preset list derived from it.
//
// Cache lifecycle: `None` until the first check, then `Some(bool)` for the
// life of the instance. Only a forced check overwrites it.

use crate::core::quality::{self, FormatOption, Quality};
use crate::platform::config::AppConfig;
use crate::platform::launch::{self, Launcher, SystemLauncher};
use crate::platform::probe::{SystemProbe, ToolProbe};
use crate::util::constants;
use crate::util::error::ProbeError;
use std::path::Path;

/// Status indicator colour for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
}

impl StatusColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

/// Tracks whether the media tool is installed.
#[derive(Debug)]
pub struct ToolAvailability<P = SystemProbe, L = SystemLauncher> {
    program: String,
    display_name: String,
    guide_url: String,
    probe: P,
    launcher: L,
    cached: Option<bool>,
}

impl ToolAvailability {
    /// FFmpeg on PATH with the default guide URL and a 10 s probe timeout.
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Build from validated config.toml values.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_parts(
            config.tool_program.clone(),
            config.guide_url.clone(),
            SystemProbe::new(config.probe_timeout),
            SystemLauncher,
        )
    }
}

impl Default for ToolAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ToolProbe, L: Launcher> ToolAvailability<P, L> {
    pub fn with_parts(
        program: impl Into<String>,
        guide_url: impl Into<String>,
        probe: P,
        launcher: L,
    ) -> Self {
        Self {
            program: program.into(),
            display_name: constants::TOOL_DISPLAY_NAME.to_string(),
            guide_url: guide_url.into(),
            probe,
            launcher,
            cached: None,
        }
    }

    /// Executable name or path being probed.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// True when the program was configured as an explicit path rather than
    /// a bare name looked up on PATH.
    pub fn is_explicit_path(&self) -> bool {
        Path::new(&self.program).components().count() > 1
    }

    pub fn guide_url(&self) -> &str {
        &self.guide_url
    }

    /// Last known availability without probing.
    pub fn cached(&self) -> Option<bool> {
        self.cached
    }

    /// Whether the tool is installed. Uses the cached answer unless
    /// `force_check` is set or no check has run yet.
    ///
    /// Not-found, timeout, non-zero exit and launch errors all count as
    /// "not available"; the reason is logged, never returned.
    pub fn is_available(&mut self, force_check: bool) -> bool {
        if let (Some(available), false) = (self.cached, force_check) {
            return available;
        }

        let available = match self.probe.query_version(&self.program) {
            Ok(_) => true,
            Err(e) => {
                log_probe_failure(&e);
                false
            }
        };

        tracing::info!(program = %self.program, available, "Checked media tool availability");
        self.cached = Some(available);
        available
    }

    /// Discard the cached answer and probe again.
    pub fn recheck_availability(&mut self) -> bool {
        self.cached = None;
        self.is_available(true)
    }

    /// Version string reported by the tool, e.g. `6.1.1`.
    ///
    /// Returns `None` without spawning anything when the tool is known to be
    /// unavailable.
    pub fn version(&mut self) -> Option<String> {
        if !self.is_available(false) {
            return None;
        }
        match self.probe.query_version(&self.program) {
            Ok(stdout) => parse_version(&stdout),
            Err(e) => {
                log_probe_failure(&e);
                None
            }
        }
    }

    /// One-line status for the status bar.
    pub fn status_text(&mut self) -> String {
        let name = self.display_name.clone();
        if !self.is_available(false) {
            return format!("⚠ {name}: Not Found");
        }
        match self.version() {
            Some(v) => format!("✓ {name}: Available (v{v})"),
            None => format!("✓ {name}: Available"),
        }
    }

    pub fn status_color(&mut self) -> StatusColor {
        if self.is_available(false) {
            StatusColor::Green
        } else {
            StatusColor::Red
        }
    }

    /// True if `quality` is a known preset that needs the tool.
    pub fn requires_tool(&self, quality: &str) -> bool {
        Quality::from_code(quality).is_some_and(Quality::requires_tool)
    }

    /// Guidance shown when the tool is missing at startup.
    pub fn warning_message(&self) -> String {
        let name = &self.display_name;
        format!(
            "{name} is not detected on your system.\n\n\
             {name} is required for:\n\
             • High-quality video downloads (1080p, Best Available)\n\
             • Audio-only downloads (MP3 conversion)\n\
             • Merging video and audio streams\n\n\
             Some basic downloads might still work, but for full functionality, \
             please install {name}.\n\n\
             Would you like to see installation instructions?"
        )
    }

    /// Guidance shown when the chosen preset needs the missing tool.
    pub fn quality_warning_message(&self, quality: &str) -> String {
        let name = &self.display_name;
        format!(
            "The selected quality '{quality}' requires {name}, which is not installed.\n\n\
             You can:\n\
             • Install {name} and try again (Recommended)\n\
             • Continue anyway (may fail or download lower quality)\n\
             • Cancel and change quality settings\n\n\
             Do you want to see {name} installation instructions?"
        )
    }

    /// Open the installation guide in the default browser.
    pub fn open_installation_guide(&self) -> bool {
        launch::open_url_with(&self.guide_url, &self.launcher)
    }

    /// Presets to offer, reduced to "(Limited)" ones when the tool is missing.
    pub fn supported_formats(&mut self) -> Vec<FormatOption> {
        quality::supported_formats(self.is_available(false))
    }
}

fn log_probe_failure(e: &ProbeError) {
    match e {
        ProbeError::NotFound { .. } | ProbeError::NonZeroExit { .. } => {
            tracing::debug!(error = %e, "Media tool not usable");
        }
        ProbeError::TimedOut { .. } | ProbeError::Io { .. } => {
            tracing::warn!(error = %e, "Media tool probe failed");
        }
    }
}

/// Extract the version from `<tool> version <v> ...` on the first line.
pub fn parse_version(stdout: &str) -> Option<String> {
    let first_line = stdout.lines().next()?;
    if !first_line.contains(constants::TOOL_VERSION_MARKER) {
        return None;
    }
    let mut tokens = first_line.split_whitespace();
    tokens.find(|t| *t == constants::TOOL_VERSION_MARKER)?;
    tokens.next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::LaunchError;
    use std::cell::{Cell, RefCell};
    use std::ffi::OsStr;
    use std::time::Duration;

    const FFMPEG_STDOUT: &str = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\n\
                                 built with gcc 13 (Ubuntu 13.2.0-23ubuntu3)\n";

    /// Probe returning a scripted sequence of outcomes, counting calls.
    struct ScriptedProbe {
        outcomes: RefCell<Vec<Result<String, ProbeError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedProbe {
        fn new(outcomes: Vec<Result<String, ProbeError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes),
                calls: Cell::new(0),
            }
        }

        fn installed() -> Self {
            Self::new((0..8).map(|_| Ok(FFMPEG_STDOUT.to_string())).collect())
        }

        fn missing() -> Self {
            Self::new((0..8).map(|_| Err(not_found())).collect())
        }
    }

    impl ToolProbe for ScriptedProbe {
        fn query_version(&self, program: &str) -> Result<String, ProbeError> {
            self.calls.set(self.calls.get() + 1);
            let mut outcomes = self.outcomes.borrow_mut();
            if outcomes.is_empty() {
                return Err(ProbeError::NotFound {
                    program: program.to_string(),
                });
            }
            outcomes.remove(0)
        }
    }

    fn not_found() -> ProbeError {
        ProbeError::NotFound {
            program: "ffmpeg".to_string(),
        }
    }

    #[derive(Default)]
    struct UrlLauncher {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Launcher for UrlLauncher {
        fn run(&self, program: &'static str, _target: &OsStr) -> Result<(), LaunchError> {
            Err(LaunchError::NotFound { program })
        }

        fn open_native(&self, target: &OsStr) -> Result<(), LaunchError> {
            self.opened
                .borrow_mut()
                .push(target.to_string_lossy().into_owned());
            if self.fail {
                Err(LaunchError::Native {
                    target: target.to_string_lossy().into_owned(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "no browser"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn tool(probe: ScriptedProbe) -> ToolAvailability<ScriptedProbe, UrlLauncher> {
        ToolAvailability::with_parts(
            "ffmpeg",
            constants::DEFAULT_GUIDE_URL,
            probe,
            UrlLauncher::default(),
        )
    }

    #[test]
    fn test_cache_hit_skips_second_probe() {
        let mut t = tool(ScriptedProbe::installed());
        assert_eq!(t.cached(), None);
        assert!(t.is_available(false));
        assert!(t.is_available(false));
        assert_eq!(t.probe.calls.get(), 1);
        assert_eq!(t.cached(), Some(true));
    }

    #[test]
    fn test_force_check_always_probes() {
        let mut t = tool(ScriptedProbe::new(vec![
            Err(not_found()),
            Ok(FFMPEG_STDOUT.to_string()),
        ]));
        assert!(!t.is_available(false));
        assert!(t.is_available(true));
        assert_eq!(t.probe.calls.get(), 2);
        assert_eq!(t.cached(), Some(true));
    }

    #[test]
    fn test_recheck_overwrites_cache() {
        let mut t = tool(ScriptedProbe::new(vec![
            Ok(FFMPEG_STDOUT.to_string()),
            Err(ProbeError::TimedOut {
                program: "ffmpeg".to_string(),
                timeout: Duration::from_secs(10),
            }),
        ]));
        assert!(t.is_available(false));
        assert!(!t.recheck_availability());
        assert_eq!(t.cached(), Some(false));
    }

    #[test]
    fn test_every_failure_mode_is_unavailable() {
        let failures = vec![
            not_found(),
            ProbeError::NonZeroExit {
                program: "ffmpeg".to_string(),
                code: Some(1),
            },
            ProbeError::TimedOut {
                program: "ffmpeg".to_string(),
                timeout: Duration::from_secs(10),
            },
            ProbeError::Io {
                program: "ffmpeg".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            },
        ];
        for failure in failures {
            let mut t = tool(ScriptedProbe::new(vec![Err(failure)]));
            assert!(!t.is_available(false));
        }
    }

    #[test]
    fn test_version_skips_probe_when_unavailable() {
        let mut t = tool(ScriptedProbe::missing());
        assert!(!t.is_available(false));
        assert_eq!(t.version(), None);
        assert_eq!(t.probe.calls.get(), 1);
    }

    #[test]
    fn test_status_when_available() {
        let mut t = tool(ScriptedProbe::installed());
        assert_eq!(t.status_text(), "✓ FFmpeg: Available (v6.1.1-3ubuntu5)");
        assert_eq!(t.status_color(), StatusColor::Green);
    }

    #[test]
    fn test_status_without_parseable_version() {
        let mut t = tool(ScriptedProbe::new(vec![
            Ok("something else entirely\n".to_string()),
            Ok("something else entirely\n".to_string()),
        ]));
        assert_eq!(t.status_text(), "✓ FFmpeg: Available");
    }

    #[test]
    fn test_status_when_missing() {
        let mut t = tool(ScriptedProbe::missing());
        assert_eq!(t.status_text(), "⚠ FFmpeg: Not Found");
        assert_eq!(t.status_color(), StatusColor::Red);
        assert_eq!(t.status_color().as_str(), "red");
    }

    #[test]
    fn test_supported_formats_follow_availability() {
        let mut present = tool(ScriptedProbe::installed());
        assert_eq!(present.supported_formats().len(), Quality::ALL.len());

        let mut absent = tool(ScriptedProbe::missing());
        let limited = absent.supported_formats();
        assert!(!limited.is_empty());
        assert!(limited.iter().all(|f| !absent.requires_tool(f.code)));
    }

    #[test]
    fn test_requires_tool_rejects_unknown_codes() {
        let t = tool(ScriptedProbe::missing());
        assert!(t.requires_tool("best"));
        assert!(t.requires_tool("audio"));
        assert!(!t.requires_tool("480p"));
        assert!(!t.requires_tool("4k"));
        assert!(!t.requires_tool(""));
    }

    #[test]
    fn test_messages_mention_tool_and_quality() {
        let t = tool(ScriptedProbe::missing());
        assert!(t.warning_message().starts_with("FFmpeg is not detected on your system."));
        let q = t.quality_warning_message("1080p");
        assert!(q.starts_with("The selected quality '1080p' requires FFmpeg"));
        assert!(q.ends_with("Do you want to see FFmpeg installation instructions?"));
    }

    #[test]
    fn test_open_installation_guide() {
        let t = tool(ScriptedProbe::missing());
        assert!(t.open_installation_guide());
        assert_eq!(*t.launcher.opened.borrow(), vec![constants::DEFAULT_GUIDE_URL]);

        let failing = ToolAvailability::with_parts(
            "ffmpeg",
            "https://example.com/guide",
            ScriptedProbe::missing(),
            UrlLauncher {
                fail: true,
                ..UrlLauncher::default()
            },
        );
        assert!(!failing.open_installation_guide());
    }

    #[test]
    fn test_explicit_path_detection() {
        assert!(!tool(ScriptedProbe::missing()).is_explicit_path());
        let t = ToolAvailability::with_parts(
            "/opt/ffmpeg/bin/ffmpeg",
            "https://example.com",
            ScriptedProbe::missing(),
            UrlLauncher::default(),
        );
        assert!(t.is_explicit_path());
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version(FFMPEG_STDOUT).as_deref(), Some("6.1.1-3ubuntu5"));
        assert_eq!(
            parse_version("ffmpeg version N-113348-g0a5813fc68 Copyright").as_deref(),
            Some("N-113348-g0a5813fc68")
        );
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("ffmpeg version"), None);
        assert_eq!(parse_version("usage: ffmpeg\nffmpeg version 6.0"), None);
    }
}
