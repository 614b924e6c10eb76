//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use pomo_engine::{App, AppBuildParts, CyclesContext, ManualClock};
use pomo_tui::apply_event;

/// Fixed start instant so relative times and countdowns are stable.
pub fn test_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap())
}

/// An app with no persistence, driven by `clock`.
pub fn app_with_clock(clock: &ManualClock) -> App {
    App::from_parts(AppBuildParts {
        cycles: CyclesContext::new(Box::new(clock.clone())),
        ..AppBuildParts::default()
    })
}

/// An app saving to `path`, driven by `clock`.
pub fn app_with_store(clock: &ManualClock, path: PathBuf) -> App {
    App::with_store(None, Some(path), Box::new(clock.clone()))
}

pub fn press(app: &mut App, code: KeyCode) {
    apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn ctrl(app: &mut App, c: char) {
    apply_event(
        app,
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)),
    );
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Fill in the form through the keyboard and press Enter.
pub fn start_cycle(app: &mut App, task: &str, minutes: u32) {
    type_text(app, task);
    press(app, KeyCode::Tab);
    type_text(app, &minutes.to_string());
    press(app, KeyCode::Enter);
}
