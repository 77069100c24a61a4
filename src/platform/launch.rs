// YouTube Downloader - platform/launch.rs
//
// Hand files, folders and URLs to the desktop environment, and locate a
// terminal emulator.
//
// The `Launcher` trait is the thin seam over the OS: it reports *why* an
// action failed via `LaunchError`. The public helpers collapse that into a
// boolean for the UI after logging the reason.

use super::identity::{OpenAction, Platform};
use crate::util::constants;
use crate::util::error::LaunchError;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Performs OS-level open actions.
pub trait Launcher {
    /// Run `program target` to completion; success means exit status zero.
    fn run(&self, program: &'static str, target: &OsStr) -> Result<(), LaunchError>;

    /// Open `target` with the OS shell association (path or URL).
    fn open_native(&self, target: &OsStr) -> Result<(), LaunchError>;
}

/// `Launcher` backed by real processes and the `open` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, program: &'static str, target: &OsStr) -> Result<(), LaunchError> {
        let status = Command::new(program)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    LaunchError::NotFound { program }
                } else {
                    LaunchError::Io { program, source: e }
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::NonZeroExit {
                program,
                code: status.code(),
            })
        }
    }

    fn open_native(&self, target: &OsStr) -> Result<(), LaunchError> {
        open::that(target).map_err(|e| LaunchError::Native {
            target: target.to_string_lossy().into_owned(),
            source: e,
        })
    }
}

/// Reveal `path` in the system file manager. False if it does not exist or
/// the OS action fails.
pub fn open_folder(path: &Path) -> bool {
    open_path_with(Platform::current(), path, &SystemLauncher)
}

/// Open `path` with its default application. False if it does not exist or
/// the OS action fails.
pub fn open_file(path: &Path) -> bool {
    open_path_with(Platform::current(), path, &SystemLauncher)
}

/// Shared implementation of `open_folder` / `open_file`.
///
/// A missing path short-circuits before any launcher call.
pub fn open_path_with(platform: Platform, path: &Path, launcher: &impl Launcher) -> bool {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Not opening missing path");
        return false;
    }

    let result = match platform.open_action() {
        OpenAction::Native => launcher.open_native(path.as_os_str()),
        OpenAction::Command(program) => launcher.run(program, path.as_os_str()),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Open action failed");
            false
        }
    }
}

/// Open `url` in the default browser. False on any failure.
pub fn open_url_with(url: &str, launcher: &impl Launcher) -> bool {
    match launcher.open_native(OsStr::new(url)) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(url, error = %e, "Could not open URL");
            false
        }
    }
}

/// Terminal launcher for the host, if one is known or installed.
pub fn terminal_command() -> Option<&'static str> {
    terminal_command_for(Platform::current(), |name| which::which(name).is_ok())
}

/// `cmd` on Windows, `Terminal` on macOS, and on Linux the first installed
/// candidate from `LINUX_TERMINALS` according to `on_path`.
pub fn terminal_command_for(
    platform: Platform,
    on_path: impl Fn(&str) -> bool,
) -> Option<&'static str> {
    match platform {
        Platform::Windows => Some("cmd"),
        Platform::MacOs => Some("Terminal"),
        Platform::Linux => constants::LINUX_TERMINALS
            .iter()
            .copied()
            .find(|name| on_path(*name)),
        Platform::Unknown => None,
    }
}
