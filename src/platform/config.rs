// YouTube Downloader - platform/config.rs
//
// config.toml loading with startup validation.
//
// The file lives in the app-data folder next to settings.json. It holds
// operator-level knobs (which tool binary to probe, how long to wait, where
// to log) rather than the user's GUI choices.

use crate::util::constants;
use std::path::Path;
use std::time::Duration;

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[tool]` section.
    pub tool: ToolSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[tool]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToolSection {
    /// Executable name or absolute path of the media tool.
    pub program: Option<String>,
    /// Installation guide URL.
    pub guide_url: Option<String>,
    /// Version query timeout in seconds.
    pub probe_timeout_secs: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Executable name or path of the media tool.
    pub tool_program: String,
    /// Installation guide URL.
    pub guide_url: String,
    /// Version query timeout.
    pub probe_timeout: Duration,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool_program: constants::DEFAULT_TOOL_PROGRAM.to_string(),
            guide_url: constants::DEFAULT_GUIDE_URL.to_string(),
            probe_timeout: Duration::from_secs(constants::DEFAULT_PROBE_TIMEOUT_SECS),
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from `config_dir`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults and one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, field_warnings) = validate(raw);
    warnings.extend(field_warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field, falling back to its default on a bad value.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Tool: program --
    if let Some(program) = raw.tool.program {
        let program = program.trim();
        if program.is_empty() {
            warnings.push(format!(
                "[tool] program is empty. Using default ({}).",
                constants::DEFAULT_TOOL_PROGRAM
            ));
        } else {
            config.tool_program = program.to_string();
        }
    }

    // -- Tool: guide_url --
    if let Some(url) = raw.tool.guide_url {
        if url.starts_with("https://") || url.starts_with("http://") {
            config.guide_url = url;
        } else {
            warnings.push(format!(
                "[tool] guide_url = \"{url}\" is not an http(s) URL. Using default."
            ));
        }
    }

    // -- Tool: probe_timeout_secs --
    if let Some(secs) = raw.tool.probe_timeout_secs {
        if (constants::MIN_PROBE_TIMEOUT_SECS..=constants::MAX_PROBE_TIMEOUT_SECS).contains(&secs)
        {
            config.probe_timeout = Duration::from_secs(secs);
        } else {
            warnings.push(format!(
                "[tool] probe_timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_PROBE_TIMEOUT_SECS,
                constants::MAX_PROBE_TIMEOUT_SECS,
                constants::DEFAULT_PROBE_TIMEOUT_SECS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join("config.toml"), body).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_are_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[tool]
program = "/opt/ffmpeg/bin/ffmpeg"
guide_url = "https://ffmpeg.org/download.html"
probe_timeout_secs = 3

[logging]
level = "debug"
file = "/tmp/ytdownloader.log"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.tool_program, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.guide_url, "https://ffmpeg.org/download.html");
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/ytdownloader.log"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_individually() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[tool]
program = "  "
guide_url = "ftp://nope"
probe_timeout_secs = 0

[logging]
level = "loud"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_file_warns_once() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[tool\nprogram = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[future]\nflag = true\n[tool]\nprobe_timeout_secs = 60\n");
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.probe_timeout, Duration::from_secs(60));
    }
}
