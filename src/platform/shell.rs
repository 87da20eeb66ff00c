//! Discovery of open Explorer windows.
//!
//! Explorer exposes its windows through the `Shell.Application` automation
//! object. We query it through a hidden PowerShell process and read one
//! folder path per line from stdout.

use crate::core::windows::{DirectorySnapshot, WindowEnumerator};
use std::collections::HashSet;
use std::path::PathBuf;

#[cfg(windows)]
const SHELL_WINDOWS_SCRIPT: &str = "$ErrorActionPreference = 'SilentlyContinue'; \
[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; \
(New-Object -ComObject Shell.Application).Windows() | \
ForEach-Object { $_.Document.Folder.Self.Path }";

/// Enumerates folders shown by Explorer windows on the current desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellWindows;

impl WindowEnumerator for ShellWindows {
    fn list_open_directories(&self) -> DirectorySnapshot {
        match query_shell_windows() {
            Some(output) => Box::new(parse_shell_output(&output).into_iter()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(windows)]
fn query_shell_windows() -> Option<String> {
    use std::os::windows::process::CommandExt;
    use std::process::Command;

    let output = Command::new("powershell")
        .args([
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            SHELL_WINDOWS_SCRIPT,
        ])
        .creation_flags(0x08000000) // CREATE_NO_WINDOW
        .output();

    match output {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            log::debug!(
                "Shell window query exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(e) => {
            log::debug!("Could not run shell window query: {}", e);
            None
        }
    }
}

#[cfg(not(windows))]
fn query_shell_windows() -> Option<String> {
    None
}

/// Keep real filesystem folders, in window order, without duplicates.
/// Virtual folders (`::{GUID}`, libraries, search results) are dropped.
pub fn parse_shell_output(output: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();

    output
        .lines()
        .map(|line| line.trim().trim_start_matches('\u{feff}'))
        .filter(|line| is_filesystem_path(line))
        .filter(|line| seen.insert(line.to_lowercase()))
        .map(PathBuf::from)
        .collect()
}

fn is_filesystem_path(line: &str) -> bool {
    let bytes = line.as_bytes();
    let drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');

    drive || line.starts_with(r"\\")
}
