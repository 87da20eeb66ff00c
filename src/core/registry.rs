//! Durable ledger of files hidden by this process.
//!
//! One absolute path per line. Only one process is expected to write the
//! file at a time; there is no cross-process locking.

use crate::error::{ExhideError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Registry content split into usable paths and lines that failed to decode
#[derive(Debug, Default)]
pub struct RegistryEntries {
    pub paths: Vec<PathBuf>,
    pub undecodable: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HiddenRegistry {
    path: PathBuf,
}

impl HiddenRegistry {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every recorded path in file order. A missing registry is empty.
    /// Lines that are not valid UTF-8 are logged and left out.
    pub fn read_all(&self) -> Result<Vec<PathBuf>> {
        let entries = self.read_entries()?;
        for line in &entries.undecodable {
            log::warn!("Skipping undecodable registry line: {}", line);
        }
        Ok(entries.paths)
    }

    /// Like [`read_all`](Self::read_all), but hands back the undecodable
    /// lines instead of logging them.
    pub fn read_entries(&self) -> Result<RegistryEntries> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RegistryEntries::default()),
            Err(e) => return Err(ExhideError::registry(&self.path, e)),
        };

        let mut entries = RegistryEntries::default();
        for line in String::from_utf8_lossy(&bytes).lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if line.contains(char::REPLACEMENT_CHARACTER) {
                entries.undecodable.push(line.to_string());
            } else {
                entries.paths.push(PathBuf::from(line));
            }
        }

        Ok(entries)
    }

    pub fn contains(&self, path: &Path) -> Result<bool> {
        Ok(self
            .read_entries()?
            .paths
            .iter()
            .any(|p| same_path(p, path)))
    }

    /// Record `path` unless it is already present.
    /// Returns `true` when a new line was written.
    pub fn append(&self, path: &Path) -> Result<bool> {
        if self.contains(path)? {
            return Ok(false);
        }

        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ExhideError::registry(&self.path, e))?;

        writeln!(file, "{}", path.display()).map_err(|e| ExhideError::registry(&self.path, e))?;

        Ok(true)
    }

    /// Empty the registry. The new content is written to a sibling temp file
    /// and renamed over the registry so readers see either the old file or
    /// an empty one.
    pub fn clear(&self) -> Result<()> {
        self.ensure_parent()?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "registry".to_string());
        let tmp_path = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, std::process::id()));

        fs::write(&tmp_path, b"").map_err(|e| ExhideError::registry(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ExhideError::registry(&self.path, e));
        }

        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ExhideError::registry(parent, e))?;
            }
        }
        Ok(())
    }
}

/// Windows paths are case-insensitive, so `C:\D\A.meta` and `c:\d\a.meta`
/// are one entry there.
#[cfg(windows)]
fn same_path(a: &Path, b: &Path) -> bool {
    a == b || a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

#[cfg(not(windows))]
fn same_path(a: &Path, b: &Path) -> bool {
    a == b
}
