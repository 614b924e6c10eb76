//! Core engine for pomo - state machine and orchestration.
//!
//! This crate contains the `App` state machine without TUI dependencies, providing:
//!
//! - **Cycles context**: the single owner of all cycles and the active-cycle pointer
//! - **Form controller**: the new-cycle form and its start/interrupt control
//! - **Countdown**: remaining time of the active cycle
//! - **History**: display rows for past cycles
//! - **Persistence**: the versioned cycle store and the config file
//!
//! # Architecture
//!
//! Cycle state changes only through a reducer ([`CycleAction`]). The form
//! controller never reaches for that state itself: it is handed a
//! [`CycleContext`] on every call and can only read the active cycle, ask for
//! a new one, or ask for the running one to be interrupted.
//!
//! The TUI layer (`pomo_tui`) reads state from `App` and forwards input back to it.
//! No rendering logic lives in this crate.
//!
//! # Type-Driven Design
//!
//! - [`CycleRequest`]: proof that form values passed validation
//! - [`FormEditor`]: borrow-scoped edit access, only handed out while no cycle runs
//! - [`Clock`]: injectable time so the countdown is deterministic under test

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::must_use_candidate)] // Accessors are obviously pure

mod app;
mod clock;
mod config;
mod countdown;
mod cycles;
mod form;
mod history;
mod store;

pub use app::{App, AppBuildParts};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AppConfig, ConfigError, CyclesConfig, PomoConfig, ascii_forced_by_env, config_path, data_dir,
};
pub use countdown::{APP_TITLE, Countdown};
pub use cycles::{CycleAction, CycleContext, CyclesContext, CyclesState, TickOutcome};
pub use form::{
    Control, ControlOutcome, DEFAULT_MINUTES_STEP, FormEditor, NewCycleForm, SubmitOutcome,
};
pub use history::{HistoryRow, history_rows, relative_time};
pub use store::{CycleStore, STORE_VERSION, StoreError};

pub use pomo_types::{
    Cycle, CycleId, CycleRequest, CycleStatus, FieldError, FormField, NewCycleFormData,
    ValidationErrors,
};
pub use pomo_types::ui::{DraftInput, Screen, UiOptions};
