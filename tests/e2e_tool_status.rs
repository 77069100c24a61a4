// YouTube Downloader - tests/e2e_tool_status.rs
//
// End-to-end tests for media tool detection and the download preflight.
//
// These tests spawn real processes through `SystemProbe`, write real
// settings files, and never substitute a test double for the probe.

use std::time::Duration;
use tempfile::TempDir;
use ytdownloader::app::plan::DownloadPlanner;
use ytdownloader::app::settings::{settings_path, Settings, SettingsStore};
use ytdownloader::app::tool::{StatusColor, ToolAvailability};
use ytdownloader::platform::config::{load_config, AppConfig};
use ytdownloader::platform::launch::SystemLauncher;
use ytdownloader::platform::probe::{SystemProbe, ToolProbe};
use ytdownloader::util::constants;
use ytdownloader::util::error::ProbeError;

const MISSING_PROGRAM: &str = "ytdownloader-e2e-no-such-tool-7f3c";
const URL: &str = "https://youtu.be/dQw4w9WgXcQ";

fn missing_tool() -> ToolAvailability {
    ToolAvailability::with_parts(
        MISSING_PROGRAM,
        constants::DEFAULT_GUIDE_URL,
        SystemProbe::new(Duration::from_secs(5)),
        SystemLauncher,
    )
}

// =============================================================================
// Missing tool
// =============================================================================

#[test]
fn e2e_missing_tool_is_reported_not_found() {
    let err = SystemProbe::default()
        .query_version(MISSING_PROGRAM)
        .unwrap_err();
    assert!(matches!(err, ProbeError::NotFound { .. }), "got {err:?}");
}

#[test]
fn e2e_missing_tool_status_and_limited_formats() {
    let mut tool = missing_tool();

    assert!(!tool.is_available(false));
    assert_eq!(tool.cached(), Some(false));
    assert_eq!(tool.status_text(), "⚠ FFmpeg: Not Found");
    assert_eq!(tool.status_color(), StatusColor::Red);
    assert_eq!(tool.version(), None);

    let codes: Vec<_> = tool.supported_formats().iter().map(|f| f.code).collect();
    assert_eq!(codes, vec!["480p", "360p"]);
    assert!(tool
        .supported_formats()
        .iter()
        .all(|f| f.label.ends_with(" (Limited)")));
}

#[test]
fn e2e_recheck_still_reports_missing() {
    let mut tool = missing_tool();
    assert!(!tool.is_available(false));
    assert!(!tool.recheck_availability());
    assert_eq!(tool.cached(), Some(false));
}

// =============================================================================
// Config -> tool
// =============================================================================

#[test]
fn e2e_config_selects_program_and_timeout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[tool]\nprogram = \"{MISSING_PROGRAM}\"\nprobe_timeout_secs = 3\n"),
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.probe_timeout, Duration::from_secs(3));

    let mut tool = ToolAvailability::from_config(&config);
    assert_eq!(tool.program(), MISSING_PROGRAM);
    assert!(!tool.is_available(false));
}

#[test]
fn e2e_default_config_probes_ffmpeg() {
    let tool = ToolAvailability::from_config(&AppConfig::default());
    assert_eq!(tool.program(), "ffmpeg");
    assert_eq!(tool.guide_url(), constants::DEFAULT_GUIDE_URL);
    assert!(!tool.is_explicit_path());
}

// =============================================================================
// Preflight with persisted settings
// =============================================================================

#[test]
fn e2e_plan_warns_for_merged_quality_without_tool() {
    let dir = TempDir::new().unwrap();
    let downloads = dir.path().join("downloads");
    std::fs::create_dir(&downloads).unwrap();

    let store = SettingsStore::load(
        settings_path(dir.path()),
        Settings::with_output_path(downloads.clone()),
    );
    let mut tool = missing_tool();

    let plan = DownloadPlanner::new(&mut tool, store.settings().cookie_options())
        .plan(
            URL,
            &store.settings().last_quality,
            &downloads.to_string_lossy(),
        )
        .unwrap();

    assert_eq!(plan.video_id, "dQw4w9WgXcQ");
    assert!(plan
        .tool_warning
        .as_deref()
        .is_some_and(|w| w.contains("'1080p' requires FFmpeg")));
    assert_eq!(plan.ytdlp_args.last().map(String::as_str), Some(URL));
}

#[test]
fn e2e_plan_limited_quality_has_no_warning() {
    let dir = TempDir::new().unwrap();
    let mut tool = missing_tool();
    let plan = DownloadPlanner::new(&mut tool, Default::default())
        .plan(URL, "480p", &dir.path().to_string_lossy())
        .unwrap();
    assert_eq!(plan.tool_warning, None);
}
