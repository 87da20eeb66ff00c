use std::io;
use std::path::Path;

/// Access to the per-file hidden attribute.
///
/// The core never touches file attributes directly so that the reconciliation
/// logic can run against an in-memory table in tests.
pub trait VisibilityAttributes: Send + Sync {
    fn is_hidden(&self, path: &Path) -> io::Result<bool>;

    /// Set the hidden attribute, keeping any other attributes
    fn hide(&self, path: &Path) -> io::Result<()>;

    /// Clear the hidden attribute
    fn unhide(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem attributes
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAttributes;

impl VisibilityAttributes for FsAttributes {
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        crate::platform::is_hidden(path)
    }

    fn hide(&self, path: &Path) -> io::Result<()> {
        crate::platform::set_hidden(path, true)
    }

    fn unhide(&self, path: &Path) -> io::Result<()> {
        crate::platform::set_hidden(path, false)
    }
}
