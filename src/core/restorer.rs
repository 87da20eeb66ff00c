use crate::core::event_log::EventLog;
use crate::core::registry::HiddenRegistry;
use crate::core::visibility::VisibilityAttributes;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of draining the registry
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl RestoreReport {
    pub fn attempted(&self) -> usize {
        self.restored.len() + self.failed.len()
    }
}

/// Makes visible again every file left in the registry by a previous run
pub struct Restorer {
    registry: HiddenRegistry,
    attributes: Arc<dyn VisibilityAttributes>,
    log: EventLog,
}

impl Restorer {
    pub fn new(
        registry: HiddenRegistry,
        attributes: Arc<dyn VisibilityAttributes>,
        log: EventLog,
    ) -> Self {
        Self {
            registry,
            attributes,
            log,
        }
    }

    /// Unhide every recorded path, then empty the registry whatever the
    /// individual outcomes were. Only a failure to empty the registry is
    /// returned as an error.
    pub fn restore(&self) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();

        let paths = match self.registry.read_entries() {
            Ok(entries) => {
                for line in &entries.undecodable {
                    self.log
                        .failure(format!("Skipping unreadable hidden files entry: {}", line));
                }
                entries.paths
            }
            Err(e) => {
                self.log.failure(format!("Could not read hidden files list: {}", e));
                Vec::new()
            }
        };

        for path in paths {
            match self.attributes.unhide(&path) {
                Ok(()) => report.restored.push(path),
                Err(e) => {
                    self.log
                        .failure(format!("Could not restore file {}: {}", path.display(), e));
                    report.failed.push(path);
                }
            }
        }

        self.registry.clear()?;

        if report.attempted() > 0 {
            log::info!(
                "Restored {} files ({} failed)",
                report.restored.len(),
                report.failed.len()
            );
        }

        Ok(report)
    }
}
