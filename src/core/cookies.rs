// YouTube Downloader - core/cookies.rs
//
// Cookie options for age-restricted videos: read cookies straight from a
// browser profile, or from an exported Netscape cookie file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Browsers yt-dlp can read cookies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
    Safari,
    Opera,
}

impl Browser {
    pub const ALL: [Browser; 5] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Edge,
        Browser::Safari,
        Browser::Opera,
    ];

    /// Identifier yt-dlp expects after `--cookies-from-browser`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
            Self::Safari => "safari",
            Self::Opera => "opera",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised browser name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedBrowser(pub String);

impl fmt::Display for UnsupportedBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported browser: {}", self.0)
    }
}

impl std::error::Error for UnsupportedBrowser {}

impl FromStr for Browser {
    type Err = UnsupportedBrowser;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == name)
            .ok_or_else(|| UnsupportedBrowser(s.to_string()))
    }
}

/// Where cookies come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieSource {
    Browser(Browser),
    File(PathBuf),
}

/// Cookie configuration for a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub enabled: bool,
    pub source: CookieSource,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            source: CookieSource::Browser(Browser::Chrome),
        }
    }
}

impl CookieOptions {
    /// yt-dlp arguments for these options.
    ///
    /// A file source whose file is missing contributes nothing; the download
    /// proceeds without cookies.
    pub fn ytdlp_args(&self) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }
        match &self.source {
            CookieSource::Browser(browser) => {
                tracing::debug!(browser = %browser, "Using cookies from browser");
                vec!["--cookies-from-browser".to_string(), browser.to_string()]
            }
            CookieSource::File(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Using cookies from file");
                vec![
                    "--cookies".to_string(),
                    path.to_string_lossy().into_owned(),
                ]
            }
            CookieSource::File(path) => {
                tracing::warn!(path = %path.display(), "Cookie file not found; continuing without cookies");
                Vec::new()
            }
        }
    }

    /// False only when cookies are enabled from a file that is missing or
    /// empty.
    pub fn is_ready(&self) -> bool {
        match (&self.enabled, &self.source) {
            (true, CookieSource::File(path)) => std::fs::metadata(path)
                .map(|m| m.is_file() && m.len() > 0)
                .unwrap_or(false),
            _ => true,
        }
    }
}

/// Troubleshooting text for a failed cookie export.
pub fn export_error_help(browser: Browser, error: &str) -> String {
    if error.to_lowercase().contains("browser") {
        format!(
            "Failed to export cookies from {browser}:\n\n\
             Common solutions:\n\
             1. Make sure {browser} is installed\n\
             2. Make sure you're logged into YouTube in {browser}\n\
             3. Close {browser} completely and try again\n\
             4. Try a different browser\n\n\
             Error details: {error}"
        )
    } else {
        format!("Failed to export cookies:\n{error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_browser_parse() {
        assert_eq!("Firefox".parse::<Browser>(), Ok(Browser::Firefox));
        assert_eq!(" edge ".parse::<Browser>(), Ok(Browser::Edge));
        assert_eq!(
            "netscape".parse::<Browser>(),
            Err(UnsupportedBrowser("netscape".to_string()))
        );
    }

    #[test]
    fn test_disabled_gives_no_args() {
        assert!(CookieOptions::default().ytdlp_args().is_empty());
    }

    #[test]
    fn test_browser_args() {
        let opts = CookieOptions {
            enabled: true,
            source: CookieSource::Browser(Browser::Firefox),
        };
        assert_eq!(opts.ytdlp_args(), vec!["--cookies-from-browser", "firefox"]);
        assert!(opts.is_ready());
    }

    #[test]
    fn test_file_args_require_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cookies.txt");
        let opts = CookieOptions {
            enabled: true,
            source: CookieSource::File(path.clone()),
        };
        assert!(opts.ytdlp_args().is_empty());
        assert!(!opts.is_ready());

        std::fs::write(&path, b"").unwrap();
        assert!(!opts.is_ready(), "empty file is not ready");

        std::fs::write(&path, b"# Netscape HTTP Cookie File\n").unwrap();
        assert_eq!(
            opts.ytdlp_args(),
            vec!["--cookies".to_string(), path.to_string_lossy().into_owned()]
        );
        assert!(opts.is_ready());
    }

    #[test]
    fn test_export_error_help() {
        let help = export_error_help(Browser::Chrome, "could not find chrome browser profile");
        assert!(help.starts_with("Failed to export cookies from chrome:"));
        assert!(help.contains("3. Close chrome completely"));

        let plain = export_error_help(Browser::Chrome, "disk full");
        assert_eq!(plain, "Failed to export cookies:\ndisk full");
    }
}
