// SPDX-License-Identifier: MPL-2.0
//! Opens URLs in the user's default browser.

use std::io;
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
fn command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn command(url: &str) -> Command {
    // Avoids `cmd /C start`, which would interpret `&` in the query string.
    let mut cmd = Command::new("rundll32");
    cmd.arg("url.dll,FileProtocolHandler").arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Launches the platform opener for `url` without waiting for it.
pub fn open(url: &str) -> io::Result<()> {
    command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
