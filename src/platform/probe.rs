// YouTube Downloader - platform/probe.rs
//
// Bounded version query against an external executable.
//
// The probe reports exactly what went wrong (`ProbeError`); deciding which
// failures mean "not installed" is left to the caller.

use crate::util::constants;
use crate::util::error::ProbeError;
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

/// Suppresses the console window a GUI process would otherwise flash.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs an external tool's version query.
pub trait ToolProbe {
    /// Invoke `program` with its version argument and return captured stdout
    /// on a zero exit status.
    fn query_version(&self, program: &str) -> Result<String, ProbeError>;
}

/// `ToolProbe` that spawns the real executable with a timeout.
#[derive(Debug, Clone, Copy)]
pub struct SystemProbe {
    timeout: Duration,
}

impl SystemProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(constants::DEFAULT_PROBE_TIMEOUT_SECS))
    }
}

impl ToolProbe for SystemProbe {
    fn query_version(&self, program: &str) -> Result<String, ProbeError> {
        let mut cmd = Command::new(program);
        cmd.arg(constants::TOOL_VERSION_ARG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProbeError::NotFound {
                    program: program.to_string(),
                }
            } else {
                ProbeError::Io {
                    program: program.to_string(),
                    source: e,
                }
            }
        })?;

        let deadline = Instant::now() + self.timeout;
        let timed_out = || ProbeError::TimedOut {
            program: program.to_string(),
            timeout: self.timeout,
        };

        // Drain stdout on a separate thread so a chatty child can never block
        // on a full pipe while we poll for exit. A background grandchild may
        // hold the pipe open after the child exits, so the read is bounded by
        // the same deadline and the thread is abandoned on expiry.
        let (tx, rx) = mpsc::channel();
        match child.stdout.take() {
            Some(mut out) => {
                thread::spawn(move || {
                    let mut buf = Vec::new();
                    let _ = out.read_to_end(&mut buf);
                    let _ = tx.send(buf);
                });
            }
            None => drop(tx),
        }

        let status = wait_until(&mut child, deadline).map_err(|e| match e {
            WaitError::TimedOut => timed_out(),
            WaitError::Io(source) => ProbeError::Io {
                program: program.to_string(),
                source,
            },
        })?;

        let stdout = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(RecvTimeoutError::Disconnected) => String::new(),
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!(program, "Tool exited but its stdout stayed open past the deadline");
                return Err(timed_out());
            }
        };

        if status.success() {
            Ok(stdout)
        } else {
            Err(ProbeError::NonZeroExit {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}

enum WaitError {
    TimedOut,
    Io(io::Error),
}

/// Poll `child` until it exits or `deadline` passes. On expiry the child is
/// killed and reaped.
fn wait_until(child: &mut Child, deadline: Instant) -> Result<std::process::ExitStatus, WaitError> {
    let poll = Duration::from_millis(constants::PROBE_POLL_INTERVAL_MS);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(WaitError::TimedOut);
            }
            Ok(None) => thread::sleep(poll),
            Err(e) => return Err(WaitError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let probe = SystemProbe::default();
        let result = probe.query_version("ytdownloader-no-such-tool-7f3a9c");
        assert!(
            matches!(result, Err(ProbeError::NotFound { .. })),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        assert_eq!(SystemProbe::default().timeout(), Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_reported() {
        // `false` ignores its arguments and exits 1.
        let result = SystemProbe::default().query_version("false");
        assert!(
            matches!(result, Err(ProbeError::NonZeroExit { code: Some(1), .. })),
            "expected NonZeroExit, got {result:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_exit_captures_stdout() {
        // `echo -version` prints its argument and exits 0.
        let out = SystemProbe::default().query_version("echo").unwrap();
        assert_eq!(out.trim(), "-version");
    }

    /// Write an executable shell script into `dir`.
    #[cfg(unix)]
    fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Run the probe, retrying while a concurrently forked test process still
    /// holds the freshly written script open (ETXTBSY).
    #[cfg(unix)]
    fn query_script(probe: &SystemProbe, script: &std::path::Path) -> Result<String, ProbeError> {
        let program = script.to_string_lossy();
        for _ in 0..20 {
            match probe.query_version(&program) {
                Err(ProbeError::Io { source, .. }) if source.raw_os_error() == Some(26) => {
                    thread::sleep(Duration::from_millis(50));
                }
                other => return other,
            }
        }
        probe.query_version(&program)
    }

    #[cfg(unix)]
    #[test]
    fn test_background_grandchild_cannot_outlast_timeout() {
        // The script exits at once but a backgrounded `sleep` keeps stdout
        // open; the read must still respect the deadline.
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(
            dir.path(),
            "wrapper.sh",
            "sleep 6 &\necho 'ffmpeg version 9.9 x'\nexit 0",
        );

        let probe = SystemProbe::new(Duration::from_secs(1));
        let started = Instant::now();
        let result = query_script(&probe, &script);
        let elapsed = started.elapsed();

        assert!(
            matches!(result, Err(ProbeError::TimedOut { .. })),
            "expected TimedOut, got {result:?}"
        );
        assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_script_output_is_captured_within_deadline() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(dir.path(), "tool.sh", "echo 'ffmpeg version 9.9 x'");
        let out = query_script(&SystemProbe::new(Duration::from_secs(5)), &script).unwrap();
        assert_eq!(out.trim(), "ffmpeg version 9.9 x");
    }
}
