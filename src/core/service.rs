//! Process lifecycle.
//!
//! ```text
//! Stopped -> Starting (restore) -> Running <-> Paused -> Stopping -> Stopped
//! ```
//!
//! The restore pass runs on every `start`, never on `resume`.

use crate::core::config::Config;
use crate::core::event_log::EventLog;
use crate::core::hider::Hider;
use crate::core::patterns::PatternStore;
use crate::core::registry::HiddenRegistry;
use crate::core::restorer::{RestoreReport, Restorer};
use crate::core::scheduler::Scheduler;
use crate::core::visibility::{FsAttributes, VisibilityAttributes};
use crate::core::windows::WindowEnumerator;
use crate::error::{ExhideError, Result};
use crate::platform::ShellWindows;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Paused,
    Stopping,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceState::Stopped => "stopped",
            ServiceState::Starting => "starting",
            ServiceState::Running => "running",
            ServiceState::Paused => "paused",
            ServiceState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

pub struct Service {
    config: Config,
    windows: Arc<dyn WindowEnumerator>,
    attributes: Arc<dyn VisibilityAttributes>,
    state: ServiceState,
    scheduler: Option<Scheduler>,
}

impl Service {
    pub fn new(
        config: Config,
        windows: Arc<dyn WindowEnumerator>,
        attributes: Arc<dyn VisibilityAttributes>,
    ) -> Self {
        Self {
            config,
            windows,
            attributes,
            state: ServiceState::Stopped,
            scheduler: None,
        }
    }

    /// Service wired to Explorer windows and real file attributes
    pub fn with_platform_defaults(config: Config) -> Self {
        Self::new(config, Arc::new(ShellWindows), Arc::new(FsAttributes))
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Completed ticks since the last start
    pub fn ticks(&self) -> u64 {
        self.scheduler.as_ref().map(Scheduler::ticks).unwrap_or(0)
    }

    /// Create missing files, load patterns, restore files left hidden by a
    /// previous run, then start ticking.
    pub fn start(&mut self) -> Result<RestoreReport> {
        if self.state != ServiceState::Stopped {
            return Err(ExhideError::invalid_transition(self.state, "start"));
        }

        self.state = ServiceState::Starting;
        log::info!("Starting, data directory {:?}", self.config.base_dir);

        let started = self.prepare().and_then(|(hider, report)| {
            let scheduler = Scheduler::start(Arc::new(hider), self.config.interval)?;
            Ok((scheduler, report))
        });

        match started {
            Ok((scheduler, report)) => {
                self.scheduler = Some(scheduler);
                self.state = ServiceState::Running;
                Ok(report)
            }
            Err(e) => {
                self.state = ServiceState::Stopped;
                Err(e)
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.state != ServiceState::Running {
            return Err(ExhideError::invalid_transition(self.state, "pause"));
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.pause();
        }
        self.state = ServiceState::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if self.state != ServiceState::Paused {
            return Err(ExhideError::invalid_transition(self.state, "resume"));
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.resume();
        }
        self.state = ServiceState::Running;
        Ok(())
    }

    /// Halt the scheduler. A tick in flight runs to completion first and is
    /// included in the returned tick count.
    pub fn stop(&mut self) -> Result<u64> {
        if !matches!(self.state, ServiceState::Running | ServiceState::Paused) {
            return Err(ExhideError::invalid_transition(self.state, "stop"));
        }

        self.state = ServiceState::Stopping;
        let result = match self.scheduler.take() {
            Some(scheduler) => scheduler.stop(),
            None => Ok(0),
        };
        self.state = ServiceState::Stopped;
        log::info!("Stopped");

        result
    }

    fn prepare(&self) -> Result<(Hider, RestoreReport)> {
        self.config.ensure_files()?;

        let log = EventLog::new(&self.config.log_file);
        let registry = HiddenRegistry::new(&self.config.registry_file);
        let patterns = PatternStore::load(&self.config.patterns_file)?;
        log::info!("Loaded {} patterns", patterns.len());

        let report = Restorer::new(registry.clone(), Arc::clone(&self.attributes), log.clone())
            .restore()?;

        let hider = Hider::new(
            Arc::new(patterns),
            registry,
            Arc::clone(&self.windows),
            Arc::clone(&self.attributes),
            log,
        );

        Ok((hider, report))
    }
}

impl Drop for Service {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            if let Err(e) = scheduler.stop() {
                log::error!("{}", e);
            }
        }
    }
}
