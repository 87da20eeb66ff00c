//! Per-tick reconciliation: hide matching files in open windows.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use exhide::core::{EventLog, FsAttributes, HiddenRegistry, Hider, PatternStore};
//! use exhide::platform::ShellWindows;
//!
//! let hider = Hider::new(
//!     Arc::new(PatternStore::parse("*.meta")),
//!     HiddenRegistry::new("hidden-files.txt"),
//!     Arc::new(ShellWindows),
//!     Arc::new(FsAttributes),
//!     EventLog::new("exhide.log"),
//! );
//!
//! let report = hider.tick();
//! println!("Hid {} files", report.hidden.len());
//! ```

use crate::core::event_log::EventLog;
use crate::core::patterns::PatternStore;
use crate::core::registry::HiddenRegistry;
use crate::core::visibility::VisibilityAttributes;
use crate::core::windows::WindowEnumerator;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a single tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub directories: usize,
    /// Files whose hidden attribute was set this tick, in discovery order
    pub hidden: Vec<PathBuf>,
    /// New registry lines written
    pub recorded: usize,
    pub already_hidden: usize,
    pub failures: usize,
}

pub struct Hider {
    patterns: Arc<PatternStore>,
    registry: HiddenRegistry,
    windows: Arc<dyn WindowEnumerator>,
    attributes: Arc<dyn VisibilityAttributes>,
    log: EventLog,
}

impl Hider {
    pub fn new(
        patterns: Arc<PatternStore>,
        registry: HiddenRegistry,
        windows: Arc<dyn WindowEnumerator>,
        attributes: Arc<dyn VisibilityAttributes>,
        log: EventLog,
    ) -> Self {
        Self {
            patterns,
            registry,
            windows,
            attributes,
            log,
        }
    }

    /// Hide every matching, still visible file in the directories currently
    /// shown. Failures are logged and never abort the tick.
    pub fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        if self.patterns.is_empty() {
            return report;
        }

        for dir in self.windows.list_open_directories() {
            report.directories += 1;

            let mut entry_errors = Vec::new();
            let files = self.matching_files(&dir, &mut entry_errors);
            self.record_entry_errors(entry_errors, &mut report);

            let files = match files {
                Ok(files) => files,
                Err(e) => {
                    report.failures += 1;
                    self.log
                        .failure(format!("Could not read directory {}: {}", dir.display(), e));
                    continue;
                }
            };

            for path in files {
                self.hide_file(&path, &mut report);
            }
        }

        if !report.hidden.is_empty() || report.failures > 0 {
            log::info!(
                "Tick: {} dirs, {} hidden, {} recorded, {} failures",
                report.directories,
                report.hidden.len(),
                report.recorded,
                report.failures
            );
        }

        report
    }

    /// Files the next tick would hide. Nothing is modified.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if self.patterns.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for dir in self.windows.list_open_directories() {
            let Ok(files) = self.matching_files(&dir, &mut Vec::new()) else {
                continue;
            };
            candidates.extend(
                files
                    .into_iter()
                    .filter(|path| matches!(self.attributes.is_hidden(path), Ok(false))),
            );
        }
        candidates
    }

    fn hide_file(&self, path: &Path, report: &mut TickReport) {
        match self.attributes.is_hidden(path) {
            Ok(true) => {
                report.already_hidden += 1;
                return;
            }
            Ok(false) => {}
            Err(e) => {
                report.failures += 1;
                self.log
                    .failure(format!("Could not read attributes of {}: {}", path.display(), e));
                return;
            }
        }

        // Record before mutating so a crash in between never leaves an
        // unrecorded hidden file behind.
        match self.registry.append(path) {
            Ok(true) => report.recorded += 1,
            Ok(false) => {}
            Err(e) => {
                report.failures += 1;
                self.log
                    .failure(format!("Could not record hidden file {}: {}", path.display(), e));
                return;
            }
        }

        match self.attributes.hide(path) {
            Ok(()) => report.hidden.push(path.to_path_buf()),
            Err(e) => {
                report.failures += 1;
                self.log
                    .failure(format!("Could not hide file {}: {}", path.display(), e));
            }
        }
    }

    fn record_entry_errors(&self, errors: Vec<(PathBuf, io::Error)>, report: &mut TickReport) {
        for (path, e) in errors {
            report.failures += 1;
            self.log
                .failure(format!("Could not read directory entry {}: {}", path.display(), e));
        }
    }

    /// Regular files directly inside `dir` that match a pattern. Ordered by
    /// pattern, then by file name; each file appears once. Entries that could
    /// not be inspected are pushed to `entry_errors` and left out.
    fn matching_files(
        &self,
        dir: &Path,
        entry_errors: &mut Vec<(PathBuf, io::Error)>,
    ) -> io::Result<Vec<PathBuf>> {
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    entry_errors.push((dir.to_path_buf(), e));
                    continue;
                }
            };
            match entry.file_type() {
                Ok(file_type) if file_type.is_file() => {
                    files.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
                }
                Ok(_) => {}
                Err(e) => entry_errors.push((entry.path(), e)),
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut seen = HashSet::new();
        let mut matching = Vec::new();
        for pattern in self.patterns.iter() {
            for (name, path) in &files {
                if pattern.matches(name) && seen.insert(path.clone()) {
                    matching.push(path.clone());
                }
            }
        }

        Ok(matching)
    }
}
