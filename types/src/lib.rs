//! Core domain types for pomo.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.
//!
//! - [`form`]: the new-cycle form payload and its validation
//! - [`cycle`]: cycles as owned by the cycles context
//! - [`ui`]: draft text input and UI options shared by engine and tui

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod cycle;
pub mod form;
pub mod ui;

pub use cycle::{Cycle, CycleId, CycleStatus};
pub use form::{
    CycleRequest, FieldError, FormField, MINUTES_MAX, MINUTES_MIN, MinutesAmount,
    NewCycleFormData, TASK_MAX_LEN, TASK_MIN_LEN, TaskName, ValidationErrors, is_submit_disabled,
    task_len,
};
