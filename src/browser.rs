//! Open article links in the system web browser.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

const WINDOWS_START: &[&str] = &["/c", "start", ""];
const NO_ARGS: &[&str] = &[];

/// Launcher command for the current platform.
fn launcher() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "windows") {
        ("cmd", WINDOWS_START)
    } else if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Open `url` without blocking the UI.  Failures are logged, never shown.
pub fn open_url(url: &str) {
    if url.is_empty() {
        return;
    }
    tracing::info!(url, "opening article in browser");

    // Never spawn real browsers from tests.
    #[cfg(not(test))]
    {
        let (program, args) = launcher();
        if let Err(e) = launch(program, args, url) {
            tracing::warn!(program, error = %e, "failed to launch browser");
        }
    }
}

/// Spawn `program args.. url` detached from the terminal.  The child is
/// waited on from a background thread so it does not linger as a zombie.
fn launch(
    program: &str,
    args: &[&str],
    url: &str,
) -> io::Result<thread::JoinHandle<Option<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let program = program.to_string();
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            tracing::debug!(program, %status, "browser launcher exited");
            Some(status)
        }
        Err(e) => {
            tracing::warn!(program, error = %e, "failed to wait for browser launcher");
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_is_known_per_platform() {
        let (program, _) = launcher();
        assert!(["cmd", "open", "xdg-open"].contains(&program));
    }

    #[cfg(unix)]
    #[test]
    fn launched_process_is_reaped() {
        let waiter = launch("true", NO_ARGS, "https://example.com/story").unwrap();
        let status = waiter.join().unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }

    #[test]
    fn missing_launcher_is_an_error() {
        assert!(launch("headlines-no-such-launcher", NO_ARGS, "https://example.com").is_err());
    }

    #[test]
    fn open_url_is_inert_in_tests() {
        open_url("https://example.com/story");
        open_url("");
    }
}
