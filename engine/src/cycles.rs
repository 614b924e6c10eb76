//! Cycles context: the owner of every cycle and of the active-cycle pointer.
//!
//! State only changes through [`CyclesState::reduce`]. Screens talk to it
//! through the narrow [`CycleContext`] trait, which is passed to them
//! explicitly rather than looked up.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::info;

use pomo_types::{Cycle, CycleId, CycleRequest, CycleStatus};

use crate::clock::{Clock, SystemClock};
use crate::countdown::Countdown;

/// What a screen may read from and request of the cycles context.
pub trait CycleContext {
    fn active_cycle(&self) -> Option<&Cycle>;
    fn create_new_cycle(&mut self, request: CycleRequest);
    fn interrupt_current_cycle(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleAction {
    AddNewCycle(Cycle),
    InterruptCurrentCycle { at: DateTime<Utc> },
    MarkCurrentCycleAsFinished { at: DateTime<Utc> },
}

/// All cycles plus the id of the one counting down, if any.
///
/// Invariant: `active_cycle_id` names an in-progress cycle in `cycles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CyclesState {
    cycles: Vec<Cycle>,
    active_cycle_id: Option<CycleId>,
}

impl CyclesState {
    /// Rebuild state from persisted parts, dropping an active id that does not
    /// name an in-progress cycle.
    #[must_use]
    pub fn restore(cycles: Vec<Cycle>, active_cycle_id: Option<CycleId>) -> Self {
        let active_cycle_id = active_cycle_id.filter(|id| {
            cycles
                .iter()
                .any(|c| c.id == *id && c.status() == CycleStatus::InProgress)
        });
        Self {
            cycles,
            active_cycle_id,
        }
    }

    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    #[must_use]
    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.active_cycle_id
    }

    #[must_use]
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let id = self.active_cycle_id?;
        self.cycles.iter().find(|c| c.id == id)
    }

    fn active_cycle_mut(&mut self) -> Option<&mut Cycle> {
        let id = self.active_cycle_id?;
        self.cycles.iter_mut().find(|c| c.id == id)
    }

    /// Apply one action. Returns `false` when the action changed nothing.
    pub fn reduce(&mut self, action: CycleAction) -> bool {
        match action {
            CycleAction::AddNewCycle(cycle) => {
                if let Some(previous) = self.active_cycle_mut() {
                    // A new cycle closes any running one.
                    previous.interrupted_date = Some(cycle.start_date);
                }
                info!(id = %cycle.id, task = %cycle.task, minutes = cycle.minutes_amount.get(), "Cycle started");
                self.active_cycle_id = Some(cycle.id);
                self.cycles.push(cycle);
                true
            }
            CycleAction::InterruptCurrentCycle { at } => {
                let Some(cycle) = self.active_cycle_mut() else {
                    return false;
                };
                cycle.interrupted_date = Some(at);
                info!(id = %cycle.id, task = %cycle.task, "Cycle interrupted");
                self.active_cycle_id = None;
                true
            }
            CycleAction::MarkCurrentCycleAsFinished { at } => {
                let Some(cycle) = self.active_cycle_mut() else {
                    return false;
                };
                cycle.finished_date = Some(at);
                info!(id = %cycle.id, task = %cycle.task, "Cycle finished");
                self.active_cycle_id = None;
                true
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active cycle.
    Idle,
    /// The active cycle is still counting down.
    Counting,
    /// The active cycle reached zero on this tick and was closed.
    Finished(CycleId),
}

/// Cycles state plus the countdown bookkeeping that goes with it.
pub struct CyclesContext {
    state: CyclesState,
    amount_seconds_passed: u64,
    clock: Box<dyn Clock>,
    revision: u64,
}

impl fmt::Debug for CyclesContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CyclesContext")
            .field("state", &self.state)
            .field("amount_seconds_passed", &self.amount_seconds_passed)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Default for CyclesContext {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl CyclesContext {
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_state(CyclesState::default(), clock)
    }

    /// Resume from a saved state. A restored active cycle keeps counting from
    /// its original start date.
    #[must_use]
    pub fn with_state(state: CyclesState, clock: Box<dyn Clock>) -> Self {
        let amount_seconds_passed = state
            .active_cycle()
            .map_or(0, |cycle| cycle.elapsed_seconds(clock.now()));
        Self {
            state,
            amount_seconds_passed,
            clock,
            revision: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        self.state.cycles()
    }

    #[must_use]
    pub fn amount_seconds_passed(&self) -> u64 {
        self.amount_seconds_passed
    }

    /// Bumped on every state change; used to decide when to persist.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn countdown(&self) -> Countdown {
        Countdown::new(self.state.active_cycle(), self.amount_seconds_passed)
    }

    fn dispatch(&mut self, action: CycleAction) -> bool {
        let changed = self.state.reduce(action);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Advance the countdown to the clock's current time.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let Some(cycle) = self.state.active_cycle() else {
            return TickOutcome::Idle;
        };
        let id = cycle.id;
        let total = cycle.total_seconds();
        let elapsed = cycle.elapsed_seconds(now);

        if elapsed >= total {
            self.dispatch(CycleAction::MarkCurrentCycleAsFinished { at: now });
            self.amount_seconds_passed = total;
            TickOutcome::Finished(id)
        } else {
            self.amount_seconds_passed = elapsed;
            TickOutcome::Counting
        }
    }
}

impl CycleContext for CyclesContext {
    fn active_cycle(&self) -> Option<&Cycle> {
        self.state.active_cycle()
    }

    fn create_new_cycle(&mut self, request: CycleRequest) {
        let cycle = Cycle::start(request, self.clock.now());
        self.dispatch(CycleAction::AddNewCycle(cycle));
        self.amount_seconds_passed = 0;
    }

    fn interrupt_current_cycle(&mut self) {
        let at = self.clock.now();
        self.dispatch(CycleAction::InterruptCurrentCycle { at });
    }
}
