use std::path::PathBuf;

/// Snapshot of directories displayed by open file-browser windows.
///
/// The iterator is consumed once per tick. Directories may disappear between
/// enumeration and use, and the snapshot may be empty.
pub type DirectorySnapshot = Box<dyn Iterator<Item = PathBuf> + Send>;

pub trait WindowEnumerator: Send + Sync {
    /// List the directories currently shown. Enumeration failures yield an
    /// empty snapshot rather than an error.
    fn list_open_directories(&self) -> DirectorySnapshot;
}
