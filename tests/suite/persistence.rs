//! Saving and restoring cycles across app restarts.

use chrono::Duration;
use tempfile::tempdir;

use pomo_engine::{Control, CycleStatus, CycleStore, STORE_VERSION};

use crate::common::{app_with_store, ctrl, start_cycle, test_clock};

#[test]
fn running_cycle_survives_restart() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cycles.json");
    let clock = test_clock();

    let mut app = app_with_store(&clock, path.clone());
    start_cycle(&mut app, "Deep work", 50);
    drop(app);

    clock.advance(Duration::minutes(20));
    let app = app_with_store(&clock, path);

    assert_eq!(app.control(), Control::Interrupt);
    assert_eq!(app.countdown().to_string(), "30:00");
}

#[test]
fn saved_file_is_versioned_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cycles.json");
    let clock = test_clock();

    let mut app = app_with_store(&clock, path.clone());
    start_cycle(&mut app, "Deep work", 50);
    ctrl(&mut app, 'x');

    let raw = std::fs::read_to_string(&path).expect("store written");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(json["version"], STORE_VERSION);
    assert_eq!(json["cycles"][0]["task"], "Deep work");
    assert_eq!(json["cycles"][0]["minutes_amount"], 50);
    assert!(json["cycles"][0]["interrupted_date"].is_string());
    assert!(json["active_cycle_id"].is_null());
}

#[test]
fn restart_keeps_history_order_and_status() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cycles.json");
    let clock = test_clock();

    let mut app = app_with_store(&clock, path.clone());
    start_cycle(&mut app, "First", 5);
    clock.advance(Duration::minutes(5));
    app.tick();
    start_cycle(&mut app, "Second", 10);
    ctrl(&mut app, 'x');
    drop(app);

    let state = CycleStore::new(&path).load().expect("load");
    let statuses: Vec<CycleStatus> = state.cycles().iter().map(|c| c.status()).collect();
    assert_eq!(statuses, vec![CycleStatus::Finished, CycleStatus::Interrupted]);
    assert!(state.active_cycle_id().is_none());
}

#[test]
fn corrupt_store_starts_empty() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cycles.json");
    std::fs::write(&path, "{\"version\":1,\"cycles\":[").expect("write");
    let clock = test_clock();

    let app = app_with_store(&clock, path);

    assert!(app.cycles().cycles().is_empty());
    assert!(matches!(app.control(), Control::Start { .. }));
    assert!(app.notification().is_some());
}
