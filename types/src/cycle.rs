use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::{CycleRequest, MinutesAmount, TaskName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(Uuid);

impl CycleId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    InProgress,
    Interrupted,
    Finished,
}

impl CycleStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Interrupted => "Interrupted",
            Self::Finished => "Finished",
        }
    }
}

/// A single timed work session.
///
/// Once either end date is set the cycle is closed; the cycles context never
/// sets both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    pub task: TaskName,
    pub minutes_amount: MinutesAmount,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub interrupted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_date: Option<DateTime<Utc>>,
}

impl Cycle {
    /// Open a new cycle for a validated request, starting at `now`.
    #[must_use]
    pub fn start(request: CycleRequest, now: DateTime<Utc>) -> Self {
        let (task, minutes_amount) = request.into_parts();
        Self {
            id: CycleId::new(),
            task,
            minutes_amount,
            start_date: now,
            interrupted_date: None,
            finished_date: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> CycleStatus {
        if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else if self.finished_date.is_some() {
            CycleStatus::Finished
        } else {
            CycleStatus::InProgress
        }
    }

    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.minutes_amount.total_seconds()
    }

    /// Whole seconds since the cycle started; zero if `now` precedes the start.
    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.start_date).num_seconds()).unwrap_or(0)
    }
}
