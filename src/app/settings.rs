// YouTube Downloader - app/settings.rs
//
// Persisted user choices (output folder, cookies, last quality, window size).
//
// - Stored as settings.json in the app-data folder.
// - Saved atomically (write temp -> rename) so a crash never corrupts the
//   previous good file.
// - Missing fields take the defaults; a missing or corrupt file means
//   "start with defaults" and is logged, not surfaced.

use crate::core::cookies::{Browser, CookieOptions, CookieSource};
use crate::platform::paths;
use crate::util::constants;
use crate::util::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which cookie source the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieSourceKind {
    Browser,
    File,
}

/// The user's persisted choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub output_path: PathBuf,
    pub use_cookies: bool,
    pub cookie_source: CookieSourceKind,
    pub browser_choice: String,
    /// Empty when no cookie file is selected.
    pub cookie_file_path: String,
    pub last_quality: String,
    pub window_geometry: String,
}

impl Settings {
    /// First-run settings with `output_path` as the download folder.
    pub fn with_output_path(output_path: PathBuf) -> Self {
        Self {
            output_path,
            use_cookies: false,
            cookie_source: CookieSourceKind::Browser,
            browser_choice: Browser::Chrome.as_str().to_string(),
            cookie_file_path: String::new(),
            last_quality: constants::DEFAULT_QUALITY.to_string(),
            window_geometry: constants::DEFAULT_WINDOW_GEOMETRY.to_string(),
        }
    }

    /// Cookie options for the download engine.
    ///
    /// An unrecognised browser name falls back to Chrome.
    pub fn cookie_options(&self) -> CookieOptions {
        let source = match self.cookie_source {
            CookieSourceKind::Browser => {
                let browser = self.browser_choice.parse().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Falling back to chrome cookies");
                    Browser::Chrome
                });
                CookieSource::Browser(browser)
            }
            CookieSourceKind::File => CookieSource::File(PathBuf::from(&self.cookie_file_path)),
        };
        CookieOptions {
            enabled: self.use_cookies,
            source,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_output_path(paths::default_download_folder())
    }
}

/// On-disk shape: every field optional so older files still load.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredSettings {
    output_path: Option<PathBuf>,
    use_cookies: Option<bool>,
    cookie_source: Option<CookieSourceKind>,
    browser_choice: Option<String>,
    cookie_file_path: Option<String>,
    last_quality: Option<String>,
    window_geometry: Option<String>,
}

impl StoredSettings {
    fn merge_onto(self, base: &Settings) -> Settings {
        let base = base.clone();
        Settings {
            output_path: self.output_path.unwrap_or(base.output_path),
            use_cookies: self.use_cookies.unwrap_or(base.use_cookies),
            cookie_source: self.cookie_source.unwrap_or(base.cookie_source),
            browser_choice: self.browser_choice.unwrap_or(base.browser_choice),
            cookie_file_path: self.cookie_file_path.unwrap_or(base.cookie_file_path),
            last_quality: self.last_quality.unwrap_or(base.last_quality),
            window_geometry: self.window_geometry.unwrap_or(base.window_geometry),
        }
    }
}

/// Resolve the settings file path inside the app-data folder.
pub fn settings_path(app_data_dir: &Path) -> PathBuf {
    app_data_dir.join(constants::SETTINGS_FILE_NAME)
}

/// Settings bound to the file they are persisted in.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    defaults: Settings,
    settings: Settings,
}

impl SettingsStore {
    /// Load `path`, merging stored values over `defaults`.
    ///
    /// Stale paths are repaired: a missing output folder reverts to the
    /// default and a missing cookie file is cleared.
    pub fn load(path: PathBuf, defaults: Settings) -> Self {
        let settings = match read_stored(&path) {
            Some(stored) => {
                let mut merged = stored.merge_onto(&defaults);
                repair_paths(&mut merged, &defaults);
                merged
            }
            None => defaults.clone(),
        };
        Self {
            path,
            defaults,
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply `change` and optionally persist immediately.
    pub fn update(
        &mut self,
        change: impl FnOnce(&mut Settings),
        save: bool,
    ) -> Result<(), SettingsError> {
        change(&mut self.settings);
        if save {
            self.save()
        } else {
            Ok(())
        }
    }

    /// Restore defaults and persist.
    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.settings = self.defaults.clone();
        self.save()
    }

    /// Write the current settings atomically, creating parent directories.
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(&self.settings).map_err(|e| SettingsError::Json {
                path: self.path.clone(),
                source: e,
            })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|e| SettingsError::Io {
            path: tmp.clone(),
            operation: "write",
            source: e,
        })?;

        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            SettingsError::Io {
                path: self.path.clone(),
                operation: "rename",
                source: e,
            }
        })?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// The output folder, created if needed.
    ///
    /// If the configured folder cannot be created, the default folder is
    /// used instead and persisted.
    pub fn output_directory(&mut self) -> PathBuf {
        let configured = self.settings.output_path.clone();
        match std::fs::create_dir_all(&configured) {
            Ok(()) => configured,
            Err(e) => {
                let fallback = self.defaults.output_path.clone();
                tracing::warn!(
                    path = %configured.display(),
                    fallback = %fallback.display(),
                    error = %e,
                    "Cannot create output directory; using default"
                );
                if let Err(e) = std::fs::create_dir_all(&fallback) {
                    tracing::warn!(path = %fallback.display(), error = %e, "Cannot create default output directory");
                }
                let target = fallback.clone();
                if let Err(e) = self.update(|s| s.output_path = target, true) {
                    tracing::warn!(error = %e, "Could not persist output directory fallback");
                }
                fallback
            }
        }
    }
}

fn read_stored(path: &Path) -> Option<StoredSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read settings file; using defaults");
            }
        })
        .ok()?;

    let stored = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Settings file is malformed; using defaults"
            );
        })
        .ok()?;

    tracing::info!(path = %path.display(), "Settings loaded");
    Some(stored)
}

fn repair_paths(settings: &mut Settings, defaults: &Settings) {
    if !settings.output_path.exists() {
        tracing::debug!(path = %settings.output_path.display(), "Saved output folder is gone; using default");
        settings.output_path = defaults.output_path.clone();
    }
    if !settings.cookie_file_path.is_empty() && !Path::new(&settings.cookie_file_path).exists() {
        tracing::debug!(path = %settings.cookie_file_path, "Saved cookie file is gone; clearing");
        settings.cookie_file_path.clear();
    }
}
