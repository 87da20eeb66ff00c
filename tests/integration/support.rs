// Shared fakes for window enumeration and file attributes

#![allow(dead_code)]

use exhide::core::{DirectorySnapshot, VisibilityAttributes, WindowEnumerator};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Windows whose shown directories can be changed between ticks
#[derive(Default)]
pub struct StaticWindows {
    dirs: Mutex<Vec<PathBuf>>,
}

impl StaticWindows {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs: Mutex::new(dirs),
        }
    }

    pub fn set(&self, dirs: Vec<PathBuf>) {
        *self.dirs.lock().unwrap() = dirs;
    }
}

impl WindowEnumerator for StaticWindows {
    fn list_open_directories(&self) -> DirectorySnapshot {
        Box::new(self.dirs.lock().unwrap().clone().into_iter())
    }
}

/// Hidden flags kept in memory; every call fails for files that do not exist
#[derive(Default)]
pub struct MemoryAttributes {
    hidden: Mutex<HashSet<PathBuf>>,
    refuse_hide: Mutex<HashSet<PathBuf>>,
    mutations: AtomicUsize,
}

impl MemoryAttributes {
    pub fn mark_hidden(&self, path: &Path) {
        self.hidden.lock().unwrap().insert(path.to_path_buf());
    }

    /// Make every later `hide` of `path` fail with a permission error
    pub fn refuse_hide(&self, path: &Path) {
        self.refuse_hide.lock().unwrap().insert(path.to_path_buf());
    }

    pub fn hidden(&self, path: &Path) -> bool {
        self.hidden.lock().unwrap().contains(path)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

impl VisibilityAttributes for MemoryAttributes {
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path)?;
        Ok(self.hidden(path))
    }

    fn hide(&self, path: &Path) -> io::Result<()> {
        fs::metadata(path)?;
        if self.refuse_hide.lock().unwrap().contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        }
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.hidden.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn unhide(&self, path: &Path) -> io::Result<()> {
        fs::metadata(path)?;
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.hidden.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Create `dir` with the given (empty) files
pub fn make_dir(dir: &Path, files: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in files {
        fs::write(dir.join(name), "content").unwrap();
    }
}

pub fn log_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
