//! Countdown and cycle completion over a hand-driven clock.

use chrono::Duration;

use pomo_engine::{Control, CycleStatus, TickOutcome};

use crate::common::{app_with_clock, start_cycle, test_clock};

#[test]
fn countdown_tracks_elapsed_time() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Write", 25);
    assert_eq!(app.countdown().to_string(), "25:00");

    clock.advance(Duration::seconds(1));
    app.tick();
    assert_eq!(app.countdown().to_string(), "24:59");

    clock.advance(Duration::minutes(10));
    app.tick();
    assert_eq!(app.countdown().to_string(), "14:59");
    assert_eq!(app.terminal_title().as_deref(), Some("14:59"));
}

#[test]
fn reaching_zero_finishes_the_cycle() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Write", 5);

    clock.advance(Duration::minutes(5));
    let outcome = app.tick();

    assert!(matches!(outcome, TickOutcome::Finished(_)));
    assert_eq!(app.countdown().to_string(), "00:00");
    assert_eq!(app.cycles().cycles()[0].status(), CycleStatus::Finished);
    assert!(matches!(app.control(), Control::Start { .. }));
    assert_eq!(app.notification(), Some("Cycle finished: Write"));
}

#[test]
fn late_tick_still_finishes_once() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Write", 5);

    clock.advance(Duration::hours(2));
    assert!(matches!(app.tick(), TickOutcome::Finished(_)));
    assert_eq!(app.tick(), TickOutcome::Idle);

    let cycle = &app.cycles().cycles()[0];
    assert_eq!(cycle.status(), CycleStatus::Finished);
    assert_eq!(cycle.finished_date, Some(cycle.start_date + Duration::hours(2)));
}

#[test]
fn history_shows_relative_start_and_status() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Write", 5);
    clock.advance(Duration::minutes(5));
    app.tick();
    clock.advance(Duration::minutes(55));

    let rows = app.history_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].duration, "5 minutes");
    assert_eq!(rows[0].started, "about 1 hour ago");
    assert_eq!(rows[0].status, CycleStatus::Finished);
}
