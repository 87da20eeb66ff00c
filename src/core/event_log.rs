//! Append-only failure log.
//!
//! Every operational failure the service swallows ends up here as a line of
//! the form `<timestamp> : <message>`. The same message is forwarded to the
//! `log` facade so it also shows up on the console when running in the
//! foreground.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a failure. Writing the log itself never fails the caller.
    pub fn failure<S: AsRef<str>>(&self, message: S) {
        let message = message.as_ref();
        log::warn!("{}", message);

        if let Err(e) = self.append_line(message) {
            log::error!("Failed to write to log file {:?}: {}", self.path, e);
        }
    }

    fn append_line(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} : {}", Local::now().format(TIMESTAMP_FORMAT), message)
    }
}
