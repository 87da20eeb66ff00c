// Integration tests for the service lifecycle

use super::support::{make_dir, MemoryAttributes, StaticWindows};
use exhide::core::{HiddenRegistry, VisibilityAttributes};
use exhide::{Config, ExhideError, Service, ServiceState};
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn wait_for_ticks(service: &Service, count: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while service.ticks() < count && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
}

fn config(temp_dir: &TempDir) -> Config {
    Config::in_dir(&temp_dir.path().join("data")).with_interval(Duration::from_millis(10))
}

#[test]
fn test_start_restores_before_hiding() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["old.meta", "new.meta"]);

    // Leftover from a run that never shut down cleanly
    let attributes = Arc::new(MemoryAttributes::default());
    attributes.mark_hidden(&dir.join("old.meta"));
    let registry = HiddenRegistry::new(&config.registry_file);
    registry.append(&dir.join("old.meta")).unwrap();

    fs::create_dir_all(&config.base_dir).unwrap();
    fs::write(&config.patterns_file, "*.meta\n").unwrap();

    let windows = Arc::new(StaticWindows::default());
    let mut service = Service::new(config, windows.clone(), attributes.clone());

    let report = service.start().unwrap();
    assert_eq!(report.restored, vec![dir.join("old.meta")]);
    assert!(!attributes.hidden(&dir.join("old.meta")));

    // Open a window on D once running
    windows.set(vec![dir.clone()]);
    let ticks = service.ticks();
    wait_for_ticks(&service, ticks + 2);
    let stopped_after = service.stop().unwrap();
    assert!(stopped_after >= ticks + 2);

    assert!(attributes.hidden(&dir.join("old.meta")));
    assert!(attributes.hidden(&dir.join("new.meta")));
    assert_eq!(
        registry.read_all().unwrap(),
        vec![dir.join("new.meta"), dir.join("old.meta")]
    );
}

#[test]
fn test_resume_does_not_restore_again() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["a.meta"]);
    fs::create_dir_all(&config.base_dir).unwrap();
    fs::write(&config.patterns_file, "*.meta\n").unwrap();
    let registry = HiddenRegistry::new(&config.registry_file);

    let attributes = Arc::new(MemoryAttributes::default());
    let windows = Arc::new(StaticWindows::new(vec![dir.clone()]));
    let mut service = Service::new(config, windows, attributes.clone());

    service.start().unwrap();
    wait_for_ticks(&service, 1);
    service.pause().unwrap();
    service.resume().unwrap();
    assert_eq!(service.state(), ServiceState::Running);

    assert!(attributes.hidden(&dir.join("a.meta")));
    assert_eq!(registry.read_all().unwrap(), vec![dir.join("a.meta")]);

    service.stop().unwrap();
}

#[test]
fn test_paused_service_makes_no_changes() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["a.meta"]);
    fs::create_dir_all(&config.base_dir).unwrap();
    fs::write(&config.patterns_file, "*.meta\n").unwrap();

    let attributes = Arc::new(MemoryAttributes::default());
    let windows = Arc::new(StaticWindows::default());
    let mut service = Service::new(config, windows.clone(), attributes.clone());

    service.start().unwrap();
    service.pause().unwrap();
    // Let any tick that started before the pause finish
    thread::sleep(Duration::from_millis(30));

    windows.set(vec![dir.clone()]);
    thread::sleep(Duration::from_millis(60));
    assert!(!attributes.hidden(&dir.join("a.meta")));

    service.stop().unwrap();
    assert_eq!(service.state(), ServiceState::Stopped);
}

#[test]
fn test_bad_settings_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("settings.json"), "{ not json").unwrap();

    let result = Config::load_from(temp_dir.path());
    assert!(matches!(result, Err(ExhideError::Settings(_))));
}

#[test]
fn test_restart_restores_files_from_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    let dir = temp_dir.path().join("D");
    make_dir(&dir, &["a.meta"]);
    fs::create_dir_all(&config.base_dir).unwrap();
    fs::write(&config.patterns_file, "*.meta\n").unwrap();

    let attributes = Arc::new(MemoryAttributes::default());
    let windows = Arc::new(StaticWindows::new(vec![dir.clone()]));

    let mut service = Service::new(config.clone(), windows.clone(), attributes.clone());
    service.start().unwrap();
    wait_for_ticks(&service, 1);
    service.stop().unwrap();
    assert!(attributes.hidden(&dir.join("a.meta")));

    // Restart with the window closed
    windows.set(Vec::new());
    let mut restarted = Service::new(config, windows, attributes.clone());
    let report = restarted.start().unwrap();
    restarted.stop().unwrap();

    assert_eq!(report.restored, vec![dir.join("a.meta")]);
    assert!(!attributes.is_hidden(&dir.join("a.meta")).unwrap());
}
