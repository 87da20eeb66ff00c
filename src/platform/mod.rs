// Platform-specific code module

pub mod fs;
pub mod shell;

// Re-exports for cleaner imports
pub use fs::{is_hidden, set_hidden};
pub use shell::ShellWindows;
