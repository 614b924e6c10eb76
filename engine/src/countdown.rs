//! Remaining time of the active cycle, as shown on screen and in the title.

use std::fmt;

use pomo_types::Cycle;

pub const APP_TITLE: &str = "pomo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    current_seconds: u64,
    active: bool,
}

impl Countdown {
    /// Zero when there is no active cycle.
    #[must_use]
    pub fn new(active_cycle: Option<&Cycle>, amount_seconds_passed: u64) -> Self {
        match active_cycle {
            Some(cycle) => Self {
                current_seconds: cycle.total_seconds().saturating_sub(amount_seconds_passed),
                active: true,
            },
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.active
    }

    #[must_use]
    pub fn current_seconds(self) -> u64 {
        self.current_seconds
    }

    #[must_use]
    pub fn minutes(self) -> u64 {
        self.current_seconds / 60
    }

    #[must_use]
    pub fn seconds(self) -> u64 {
        self.current_seconds % 60
    }

    /// The four `MM:SS` digits, for large-digit rendering.
    #[must_use]
    pub fn digits(self) -> [u8; 4] {
        let (m, s) = (self.minutes().min(99), self.seconds());
        [(m / 10) as u8, (m % 10) as u8, (s / 10) as u8, (s % 10) as u8]
    }

    /// Terminal title: the countdown while a cycle runs, the app name otherwise.
    #[must_use]
    pub fn title(self) -> String {
        if self.active {
            self.to_string()
        } else {
            APP_TITLE.to_string()
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}
