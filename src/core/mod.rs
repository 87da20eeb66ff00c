// Core business logic module

pub mod config;
pub mod event_log;
pub mod hider;
pub mod patterns;
pub mod registry;
pub mod restorer;
pub mod scheduler;
pub mod service;
pub mod visibility;
pub mod windows;

// Re-export commonly used items
pub use config::Config;
pub use event_log::EventLog;
pub use hider::{Hider, TickReport};
pub use patterns::{ExtensionPattern, PatternStore};
pub use registry::{HiddenRegistry, RegistryEntries};
pub use restorer::{RestoreReport, Restorer};
pub use scheduler::Scheduler;
pub use service::{Service, ServiceState};
pub use visibility::{FsAttributes, VisibilityAttributes};
pub use windows::{DirectorySnapshot, WindowEnumerator};
