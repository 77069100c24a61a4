// YouTube Downloader - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr by default, or the configured log file (append mode).

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive by priority:
/// RUST_LOG env var > CLI --debug flag > config level > default "info".
///
/// Returns `None` when RUST_LOG should be used as-is.
fn filter_directive(
    rust_log_set: bool,
    debug_flag: bool,
    config_level: Option<&str>,
) -> Option<String> {
    if rust_log_set {
        None
    } else if debug_flag {
        Some("debug".to_string())
    } else if let Some(level) = config_level {
        Some(level.to_lowercase())
    } else {
        Some(super::constants::DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
/// `log_file` is the optional log file path from config.toml.
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&str>) {
    let filter = match filter_directive(std::env::var("RUST_LOG").is_ok(), debug_flag, config_level)
    {
        None => EnvFilter::from_default_env(),
        Some(directive) => EnvFilter::new(directive),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let mut file_error = None;
    let file = log_file.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Some(f),
            Err(e) => {
                file_error = Some((path.to_string(), e));
                None
            }
        }
    });

    match file {
        Some(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }

    if let Some((path, e)) = file_error {
        tracing::warn!(path = %path, error = %e, "Could not open log file; logging to stderr");
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
