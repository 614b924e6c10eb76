//! Home screen flows driven through key events.

use crossterm::event::KeyCode;

use pomo_engine::{Control, CycleStatus, FormField};

use crate::common::{app_with_clock, ctrl, press, start_cycle, test_clock, type_text};

#[test]
fn valid_submission_creates_exactly_one_cycle_and_resets_form() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);

    start_cycle(&mut app, "Study", 25);

    assert_eq!(app.cycles().cycles().len(), 1);
    let cycle = &app.cycles().cycles()[0];
    assert_eq!(cycle.task.as_str(), "Study");
    assert_eq!(cycle.minutes_amount.get(), 25);
    assert_eq!(app.form().task().text(), "");
    assert_eq!(app.form().minutes_amount(), 0);
    assert_eq!(app.control(), Control::Interrupt);
}

#[test]
fn start_is_disabled_until_task_has_three_characters() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);

    assert_eq!(app.control(), Control::Start { disabled: true });
    type_text(&mut app, "ab");
    assert_eq!(app.control(), Control::Start { disabled: true });
    press(&mut app, KeyCode::Enter);
    assert!(app.cycles().cycles().is_empty());

    type_text(&mut app, "c");
    assert_eq!(app.control(), Control::Start { disabled: false });
}

#[test]
fn out_of_range_minutes_block_submission() {
    for minutes in [0_u32, 4, 61, 120] {
        let clock = test_clock();
        let mut app = app_with_clock(&clock);

        start_cycle(&mut app, "Study", minutes);

        assert!(
            app.cycles().cycles().is_empty(),
            "{minutes} minutes should be rejected"
        );
        assert!(app.form().error_for(FormField::MinutesAmount).is_some());
    }
}

#[test]
fn too_long_task_is_rejected_with_message() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);

    start_cycle(&mut app, &"x".repeat(51), 25);

    assert!(app.cycles().cycles().is_empty());
    assert_eq!(
        app.form()
            .error_for(FormField::Task)
            .map(|e| e.to_string()),
        Some("Task is too long".to_string())
    );
}

#[test]
fn interrupt_control_replaces_start_and_interrupts_once() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Study", 25);

    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.control(), Control::Start { .. }));
    let cycles = app.cycles().cycles();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].status(), CycleStatus::Interrupted);
    assert_eq!(app.cycles().revision(), 2);
}

#[test]
fn typing_is_ignored_while_counting_down() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Study", 25);

    type_text(&mut app, "more");
    press(&mut app, KeyCode::Backspace);

    assert_eq!(app.form().task().text(), "");
}

#[test]
fn ctrl_x_without_cycle_does_nothing() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);

    ctrl(&mut app, 'x');

    assert!(app.cycles().cycles().is_empty());
    assert_eq!(app.cycles().revision(), 0);
}

#[test]
fn right_arrow_accepts_previous_task() {
    let clock = test_clock();
    let mut app = app_with_clock(&clock);
    start_cycle(&mut app, "Read the paper", 25);
    ctrl(&mut app, 'x');

    type_text(&mut app, "Read");
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);

    let cycles = app.cycles().cycles();
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[1].task.as_str(), "Read the paper");
    assert_eq!(cycles[1].minutes_amount.get(), 5);
}
