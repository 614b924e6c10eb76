//! The `App` state machine: one cycles context, one form, two screens.
//!
//! The TUI reads state through accessors and forwards input back through the
//! action methods. Persistence piggybacks on the cycles context revision: any
//! action that changed cycles is followed by a save.

mod init;

pub use init::AppBuildParts;

use pomo_types::FormField;
use pomo_types::ui::{Screen, UiOptions};

use crate::countdown::Countdown;
use crate::cycles::{CycleContext, CyclesContext, TickOutcome};
use crate::form::{Control, ControlOutcome, FormEditor, NewCycleForm};
use crate::history::{self, HistoryRow};
use crate::store::CycleStore;

/// State owned by the screens.
#[derive(Debug)]
struct AppUi {
    screen: Screen,
    form: NewCycleForm,
    history_scroll: usize,
    ui_options: UiOptions,
    notification: Option<String>,
    should_quit: bool,
}

/// The cycles context and where it is saved.
#[derive(Debug)]
struct AppCore {
    cycles: CyclesContext,
    store: Option<CycleStore>,
    saved_revision: u64,
    save_warning_shown: bool,
}

#[derive(Debug)]
pub struct App {
    ui: AppUi,
    core: AppCore,
}

impl App {
    pub fn should_quit(&self) -> bool {
        self.ui.should_quit
    }

    pub fn request_quit(&mut self) {
        self.ui.should_quit = true;
    }

    pub fn ui_options(&self) -> UiOptions {
        self.ui.ui_options
    }

    pub fn screen(&self) -> Screen {
        self.ui.screen
    }

    pub fn toggle_screen(&mut self) {
        self.ui.screen = self.ui.screen.toggle();
        self.ui.history_scroll = 0;
    }

    pub fn show_home(&mut self) {
        self.ui.screen = Screen::Home;
    }

    pub fn cycles(&self) -> &CyclesContext {
        &self.core.cycles
    }

    pub fn form(&self) -> &NewCycleForm {
        &self.ui.form
    }

    pub fn countdown(&self) -> Countdown {
        self.core.cycles.countdown()
    }

    pub fn control(&self) -> Control {
        self.ui.form.control(&self.core.cycles)
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.ui.form.is_submit_disabled()
    }

    pub fn task_suggestions(&self) -> Vec<&str> {
        self.ui.form.task_suggestions(self.core.cycles.cycles())
    }

    pub fn notification(&self) -> Option<&str> {
        self.ui.notification.as_deref()
    }

    pub fn clear_notification(&mut self) {
        self.ui.notification = None;
    }

    pub(crate) fn push_notification(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Notification");
        self.ui.notification = Some(message);
    }

    /// Title for the terminal window, or `None` when title updates are off.
    pub fn terminal_title(&self) -> Option<String> {
        self.ui
            .ui_options
            .terminal_title
            .then(|| self.countdown().title())
    }

    // ---- home screen -------------------------------------------------------

    pub fn focus_next_field(&mut self) {
        self.ui.form.focus_next();
    }

    pub fn focus_prev_field(&mut self) {
        self.ui.form.focus_prev();
    }

    /// Edit access to the form; `None` while a cycle is counting down.
    pub fn form_editor(&mut self) -> Option<FormEditor<'_>> {
        self.ui.form.editor(&self.core.cycles)
    }

    /// Press the visible control: start a cycle or interrupt the running one.
    pub fn activate_control(&mut self) -> ControlOutcome {
        let outcome = self.ui.form.activate_control(&mut self.core.cycles);
        if outcome == ControlOutcome::Created {
            self.clear_notification();
        }
        self.persist_if_changed();
        outcome
    }

    /// Interrupt the running cycle. Returns `false` when none was running.
    pub fn interrupt_current_cycle(&mut self) -> bool {
        if self.core.cycles.active_cycle().is_none() {
            return false;
        }
        self.core.cycles.interrupt_current_cycle();
        self.persist_if_changed();
        true
    }

    /// Complete the task field with the first suggestion.
    ///
    /// Only applies with the task field focused and the cursor at its end.
    pub fn accept_task_suggestion(&mut self) -> bool {
        if self.ui.form.focus() != FormField::Task || !self.ui.form.task().is_cursor_at_end() {
            return false;
        }
        let Some(suggestion) = self.task_suggestions().first().map(|s| (*s).to_string()) else {
            return false;
        };
        match self.form_editor() {
            Some(mut editor) => {
                editor.set_task(&suggestion);
                true
            }
            None => false,
        }
    }

    // ---- history screen ----------------------------------------------------

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        history::history_rows(self.core.cycles.cycles(), self.core.cycles.now())
    }

    /// Index of the first visible history row.
    pub fn history_scroll(&self) -> usize {
        self.ui.history_scroll
    }

    pub fn scroll_history_up(&mut self) {
        self.ui.history_scroll = self.ui.history_scroll.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        let last = self.core.cycles.cycles().len().saturating_sub(1);
        self.ui.history_scroll = (self.ui.history_scroll + 1).min(last);
    }

    // ---- frame loop --------------------------------------------------------

    /// Advance the countdown. Called once per frame.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.core.cycles.tick();
        if let TickOutcome::Finished(id) = &outcome {
            let task = self
                .core
                .cycles
                .cycles()
                .iter()
                .find(|cycle| cycle.id == *id)
                .map(|cycle| cycle.task.to_string())
                .unwrap_or_default();
            self.push_notification(format!("Cycle finished: {task}"));
        }
        self.persist_if_changed();
        outcome
    }

    /// Save the cycles when they changed since the last save.
    ///
    /// A failed save is retried on the next call. The first failure is
    /// surfaced in the status bar; the app keeps running.
    pub fn persist_if_changed(&mut self) -> bool {
        let revision = self.core.cycles.revision();
        if revision == self.core.saved_revision {
            return false;
        }
        let Some(store) = &self.core.store else {
            self.core.saved_revision = revision;
            return false;
        };

        match store.save(self.core.cycles.state()) {
            Ok(()) => {
                self.core.saved_revision = revision;
                true
            }
            Err(e) if self.core.save_warning_shown => {
                tracing::debug!("Saving cycles failed again: {e}");
                false
            }
            Err(e) => {
                tracing::warn!("Saving cycles failed: {e}");
                self.core.save_warning_shown = true;
                self.push_notification("Saving cycles failed; changes may not persist.");
                false
            }
        }
    }
}
