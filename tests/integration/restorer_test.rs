// Integration tests for the startup restore pass

use super::support::{log_lines, make_dir, MemoryAttributes};
use exhide::core::{EventLog, HiddenRegistry, Restorer};
use exhide::ExhideError;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn restorer(temp_dir: &TempDir, attributes: Arc<MemoryAttributes>) -> Restorer {
    Restorer::new(
        HiddenRegistry::new(temp_dir.path().join("hidden-files.txt")),
        attributes,
        EventLog::new(temp_dir.path().join("exhide.log")),
    )
}

#[test]
fn test_missing_file_logged_and_rest_restored() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["b.meta"]);
    let attributes = Arc::new(MemoryAttributes::default());
    attributes.mark_hidden(&dir.join("b.meta"));

    let registry = HiddenRegistry::new(temp_dir.path().join("hidden-files.txt"));
    registry.append(&dir.join("a.meta")).unwrap();
    registry.append(&dir.join("b.meta")).unwrap();

    let report = restorer(&temp_dir, attributes.clone()).restore().unwrap();

    assert_eq!(report.failed, vec![dir.join("a.meta")]);
    assert_eq!(report.restored, vec![dir.join("b.meta")]);
    assert!(!attributes.hidden(&dir.join("b.meta")));
    assert!(registry.read_all().unwrap().is_empty());

    let log = log_lines(&temp_dir.path().join("exhide.log"));
    assert_eq!(log.len(), 1);
    assert!(log[0].contains("a.meta"));
}

#[test]
fn test_absent_registry_is_created_empty() {
    let temp_dir = TempDir::new().unwrap();
    let attributes = Arc::new(MemoryAttributes::default());

    let report = restorer(&temp_dir, attributes.clone()).restore().unwrap();

    assert_eq!(report.attempted(), 0);
    assert_eq!(attributes.mutations(), 0);
    let registry_file = temp_dir.path().join("hidden-files.txt");
    assert!(registry_file.is_file());
    assert_eq!(fs::read_to_string(registry_file).unwrap(), "");
}

#[test]
fn test_registry_emptied_even_when_everything_fails() {
    let temp_dir = TempDir::new().unwrap();
    let registry = HiddenRegistry::new(temp_dir.path().join("hidden-files.txt"));
    registry.append(&temp_dir.path().join("gone1.meta")).unwrap();
    registry.append(&temp_dir.path().join("gone2.meta")).unwrap();

    let report = restorer(&temp_dir, Arc::new(MemoryAttributes::default()))
        .restore()
        .unwrap();

    assert_eq!(report.failed.len(), 2);
    assert!(report.restored.is_empty());
    assert!(registry.read_all().unwrap().is_empty());
}

#[test]
fn test_blank_lines_in_registry_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["a.meta"]);
    let attributes = Arc::new(MemoryAttributes::default());
    attributes.mark_hidden(&dir.join("a.meta"));

    fs::write(
        temp_dir.path().join("hidden-files.txt"),
        format!("\n{}\n\n", dir.join("a.meta").display()),
    )
    .unwrap();

    let report = restorer(&temp_dir, attributes.clone()).restore().unwrap();

    assert_eq!(report.attempted(), 1);
    assert!(!attributes.hidden(&dir.join("a.meta")));
}

#[test]
fn test_undecodable_line_does_not_block_restore() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["a.meta", "b.meta"]);
    let attributes = Arc::new(MemoryAttributes::default());
    attributes.mark_hidden(&dir.join("a.meta"));
    attributes.mark_hidden(&dir.join("b.meta"));

    let mut content = Vec::new();
    content.extend_from_slice(format!("{}\n", dir.join("a.meta").display()).as_bytes());
    content.extend_from_slice(format!("{}\n", dir.join("b.meta").display()).as_bytes());
    content.extend_from_slice(b"/d/\xff.meta\n");
    let registry_file = temp_dir.path().join("hidden-files.txt");
    fs::write(&registry_file, content).unwrap();

    let report = restorer(&temp_dir, attributes.clone()).restore().unwrap();

    assert_eq!(report.restored, vec![dir.join("a.meta"), dir.join("b.meta")]);
    assert!(report.failed.is_empty());
    assert!(!attributes.hidden(&dir.join("a.meta")));
    assert!(!attributes.hidden(&dir.join("b.meta")));
    assert_eq!(fs::read(&registry_file).unwrap(), b"");

    let log = log_lines(&temp_dir.path().join("exhide.log"));
    assert_eq!(log.len(), 1);
    assert!(log[0].contains("Skipping unreadable hidden files entry"));
}

#[test]
fn test_unreadable_registry_is_logged_and_nothing_restored() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the registry file should be cannot be read or replaced
    fs::create_dir(temp_dir.path().join("hidden-files.txt")).unwrap();
    let attributes = Arc::new(MemoryAttributes::default());

    let result = restorer(&temp_dir, attributes.clone()).restore();

    assert!(matches!(result, Err(ExhideError::Registry { .. })));
    assert_eq!(attributes.mutations(), 0);

    let log = log_lines(&temp_dir.path().join("exhide.log"));
    assert_eq!(log.len(), 1);
    assert!(log[0].contains("Could not read hidden files list"));
}
