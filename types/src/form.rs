//! New-cycle form payload and its validation.
//!
//! Validation is a pure function from the raw form values to either a
//! [`CycleRequest`] or the full list of field errors. Nothing here knows about
//! the terminal, key events or the cycles context.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

pub const TASK_MIN_LEN: usize = 3;
pub const TASK_MAX_LEN: usize = 50;
pub const MINUTES_MIN: u32 = 5;
pub const MINUTES_MAX: u32 = 60;

/// Length of a task label as the user perceives it (grapheme clusters).
#[must_use]
pub fn task_len(task: &str) -> usize {
    task.graphemes(true).count()
}

/// Cheap gate for the start control, independent of the full schema.
#[must_use]
pub fn is_submit_disabled(task: &str) -> bool {
    task.is_empty() || task_len(task) < TASK_MIN_LEN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Task,
    MinutesAmount,
}

impl FormField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::MinutesAmount => "minutes",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Task => Self::MinutesAmount,
            Self::MinutesAmount => Self::Task,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        // Two fields: previous and next coincide.
        self.next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Task is too short")]
    TaskTooShort,
    #[error("Task is too long")]
    TaskTooLong,
    #[error("Cycle must be at least 5 minutes")]
    CycleTooShort,
    #[error("Cycle must be at most 60 minutes")]
    CycleTooLong,
}

impl FieldError {
    #[must_use]
    pub const fn field(self) -> FormField {
        match self {
            Self::TaskTooShort | Self::TaskTooLong => FormField::Task,
            Self::CycleTooShort | Self::CycleTooLong => FormField::MinutesAmount,
        }
    }
}

/// Every field error found in one validation pass, in field order.
///
/// Never empty: a pass without errors yields a [`CycleRequest`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {e}", e.field().label()))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors.iter().copied()
    }

    #[must_use]
    pub fn for_field(&self, field: FormField) -> Option<FieldError> {
        self.iter().find(|e| e.field() == field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A task label between [`TASK_MIN_LEN`] and [`TASK_MAX_LEN`] graphemes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        let len = task_len(&value);
        if len < TASK_MIN_LEN {
            Err(FieldError::TaskTooShort)
        } else if len > TASK_MAX_LEN {
            Err(FieldError::TaskTooLong)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TaskName {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskName> for String {
    fn from(value: TaskName) -> Self {
        value.0
    }
}

impl Deref for TaskName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cycle duration between [`MINUTES_MIN`] and [`MINUTES_MAX`] minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MinutesAmount(u32);

impl MinutesAmount {
    pub const fn new(minutes: u32) -> Result<Self, FieldError> {
        if minutes < MINUTES_MIN {
            Err(FieldError::CycleTooShort)
        } else if minutes > MINUTES_MAX {
            Err(FieldError::CycleTooLong)
        } else {
            Ok(Self(minutes))
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn total_seconds(self) -> u64 {
        self.0 as u64 * 60
    }
}

impl TryFrom<u32> for MinutesAmount {
    type Error = FieldError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinutesAmount> for u32 {
    fn from(value: MinutesAmount) -> Self {
        value.0
    }
}

/// Proof that a form payload passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRequest {
    task: TaskName,
    minutes_amount: MinutesAmount,
}

impl CycleRequest {
    #[must_use]
    pub fn new(task: TaskName, minutes_amount: MinutesAmount) -> Self {
        Self {
            task,
            minutes_amount,
        }
    }

    #[must_use]
    pub fn task(&self) -> &TaskName {
        &self.task
    }

    #[must_use]
    pub fn minutes_amount(&self) -> MinutesAmount {
        self.minutes_amount
    }

    #[must_use]
    pub fn into_parts(self) -> (TaskName, MinutesAmount) {
        (self.task, self.minutes_amount)
    }
}

/// Raw values as typed into the form. `Default` is the form's reset state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCycleFormData {
    pub task: String,
    pub minutes_amount: u32,
}

impl NewCycleFormData {
    #[must_use]
    pub fn new(task: impl Into<String>, minutes_amount: u32) -> Self {
        Self {
            task: task.into(),
            minutes_amount,
        }
    }

    /// Validate every field, collecting all errors rather than stopping at the first.
    pub fn validate(&self) -> Result<CycleRequest, ValidationErrors> {
        let task = TaskName::new(self.task.as_str());
        let minutes = MinutesAmount::new(self.minutes_amount);

        match (task, minutes) {
            (Ok(task), Ok(minutes)) => Ok(CycleRequest::new(task, minutes)),
            (task, minutes) => {
                let errors = [task.err(), minutes.err()].into_iter().flatten().collect();
                Err(ValidationErrors { errors })
            }
        }
    }
}
