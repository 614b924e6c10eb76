//! Home screen controller: the new-cycle form and its start/interrupt control.
//!
//! The form holds only local input state. Everything about cycles goes through
//! the [`CycleContext`] passed into each call.

use tracing::debug;

use pomo_types::ui::DraftInput;
use pomo_types::{
    Cycle, FieldError, FormField, MINUTES_MAX, MINUTES_MIN, NewCycleFormData, ValidationErrors,
    is_submit_disabled,
};

use crate::cycles::CycleContext;

pub const DEFAULT_MINUTES_STEP: u32 = 5;
const MAX_MINUTE_DIGITS_VALUE: u32 = 999;
const MAX_SUGGESTIONS: usize = 3;

/// The single control under the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start { disabled: bool },
    Interrupt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    Created,
    Rejected,
    Interrupted,
    /// The start control was disabled.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct NewCycleForm {
    task: DraftInput,
    minutes_amount: u32,
    focus: FormField,
    errors: Option<ValidationErrors>,
    /// Set by a rejected submit; from then on every edit re-validates.
    revalidate: bool,
    minutes_step: u32,
}

impl Default for NewCycleForm {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES_STEP)
    }
}

impl NewCycleForm {
    #[must_use]
    pub fn new(minutes_step: u32) -> Self {
        Self {
            task: DraftInput::default(),
            minutes_amount: 0,
            focus: FormField::Task,
            errors: None,
            revalidate: false,
            minutes_step: minutes_step.max(1),
        }
    }

    #[must_use]
    pub fn values(&self) -> NewCycleFormData {
        NewCycleFormData::new(self.task.text(), self.minutes_amount)
    }

    #[must_use]
    pub fn task(&self) -> &DraftInput {
        &self.task
    }

    #[must_use]
    pub fn minutes_amount(&self) -> u32 {
        self.minutes_amount
    }

    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    #[must_use]
    pub fn error_for(&self, field: FormField) -> Option<FieldError> {
        self.errors.as_ref().and_then(|e| e.for_field(field))
    }

    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        is_submit_disabled(self.task.text())
    }

    #[must_use]
    pub fn control<C: CycleContext + ?Sized>(&self, ctx: &C) -> Control {
        if ctx.active_cycle().is_some() {
            Control::Interrupt
        } else {
            Control::Start {
                disabled: self.is_submit_disabled(),
            }
        }
    }

    /// Validate and, when valid, hand the request to the context and reset.
    pub fn handle_submit<C: CycleContext + ?Sized>(&mut self, ctx: &mut C) -> SubmitOutcome {
        match self.values().validate() {
            Ok(request) => {
                ctx.create_new_cycle(request);
                self.reset();
                SubmitOutcome::Created
            }
            Err(errors) => {
                debug!(%errors, "New cycle rejected");
                self.errors = Some(errors.clone());
                self.revalidate = true;
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    /// Back to the default values: empty task, zero minutes, no errors.
    pub fn reset(&mut self) {
        self.task.clear();
        self.minutes_amount = 0;
        self.focus = FormField::Task;
        self.errors = None;
        self.revalidate = false;
    }

    /// Press whichever control is visible.
    pub fn activate_control<C: CycleContext + ?Sized>(&mut self, ctx: &mut C) -> ControlOutcome {
        match self.control(ctx) {
            Control::Interrupt => {
                ctx.interrupt_current_cycle();
                ControlOutcome::Interrupted
            }
            Control::Start { disabled: true } => ControlOutcome::Ignored,
            Control::Start { disabled: false } => match self.handle_submit(ctx) {
                SubmitOutcome::Created => ControlOutcome::Created,
                SubmitOutcome::Rejected(_) => ControlOutcome::Rejected,
            },
        }
    }

    /// Edit access to the inputs; `None` while a cycle runs (inputs disabled).
    pub fn editor<C: CycleContext + ?Sized>(&mut self, ctx: &C) -> Option<FormEditor<'_>> {
        if ctx.active_cycle().is_some() {
            None
        } else {
            Some(FormEditor { form: self })
        }
    }

    /// Earlier task names extending what has been typed, most recent first.
    #[must_use]
    pub fn task_suggestions<'a>(&self, cycles: &'a [Cycle]) -> Vec<&'a str> {
        let typed = self.task.text().to_lowercase();
        if typed.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<&str> = Vec::new();
        for cycle in cycles.iter().rev() {
            let name = cycle.task.as_str();
            let lower = name.to_lowercase();
            if lower != typed && lower.starts_with(&typed) && !out.contains(&name) {
                out.push(name);
                if out.len() == MAX_SUGGESTIONS {
                    break;
                }
            }
        }
        out
    }

    fn touched(&mut self) {
        if self.revalidate {
            self.errors = self.values().validate().err();
        }
    }
}

/// Borrow-scoped edit access to the form inputs.
///
/// Holding one proves no cycle was active when it was handed out.
pub struct FormEditor<'a> {
    form: &'a mut NewCycleForm,
}

impl FormEditor<'_> {
    fn on_task(&mut self, edit: impl FnOnce(&mut DraftInput)) {
        edit(&mut self.form.task);
        self.form.touched();
    }

    fn on_minutes(&mut self, edit: impl FnOnce(u32, u32) -> u32) {
        self.form.minutes_amount = edit(self.form.minutes_amount, self.form.minutes_step);
        self.form.touched();
    }

    pub fn enter_char(&mut self, c: char) {
        match self.form.focus {
            FormField::Task => self.on_task(|t| t.enter_char(c)),
            FormField::MinutesAmount => {
                if let Some(digit) = c.to_digit(10) {
                    self.on_minutes(|m, _| push_digit(m, digit));
                }
            }
        }
    }

    pub fn enter_text(&mut self, text: &str) {
        match self.form.focus {
            FormField::Task => self.on_task(|t| t.enter_text(text)),
            FormField::MinutesAmount => {
                self.on_minutes(|m, _| {
                    text.chars()
                        .filter_map(|c| c.to_digit(10))
                        .fold(m, push_digit)
                });
            }
        }
    }

    pub fn delete_char(&mut self) {
        match self.form.focus {
            FormField::Task => self.on_task(DraftInput::delete_char),
            FormField::MinutesAmount => self.on_minutes(|m, _| m / 10),
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.form.focus == FormField::Task {
            self.on_task(DraftInput::delete_char_forward);
        }
    }

    pub fn delete_word_backwards(&mut self) {
        match self.form.focus {
            FormField::Task => self.on_task(DraftInput::delete_word_backwards),
            FormField::MinutesAmount => self.on_minutes(|_, _| 0),
        }
    }

    pub fn clear_line(&mut self) {
        match self.form.focus {
            FormField::Task => self.on_task(DraftInput::clear),
            FormField::MinutesAmount => self.on_minutes(|_, _| 0),
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.form.task.move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.form.task.move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.form.task.reset_cursor();
    }

    pub fn move_cursor_end(&mut self) {
        self.form.task.move_cursor_end();
    }

    pub fn set_task(&mut self, task: &str) {
        self.on_task(|t| t.set_text(task));
    }

    pub fn step_up(&mut self) {
        self.on_minutes(step_up);
    }

    pub fn step_down(&mut self) {
        self.on_minutes(step_down);
    }
}

fn push_digit(minutes: u32, digit: u32) -> u32 {
    let next = minutes * 10 + digit;
    if next > MAX_MINUTE_DIGITS_VALUE {
        minutes
    } else {
        next
    }
}

/// Stepped numeric input semantics: snap to the `MINUTES_MIN + k * step` grid
/// and clamp to the allowed range.
fn step_up(minutes: u32, step: u32) -> u32 {
    if minutes < MINUTES_MIN {
        return MINUTES_MIN;
    }
    let k = (minutes - MINUTES_MIN) / step + 1;
    (MINUTES_MIN + k * step).min(MINUTES_MAX)
}

fn step_down(minutes: u32, step: u32) -> u32 {
    if minutes <= MINUTES_MIN {
        return MINUTES_MIN;
    }
    if minutes > MINUTES_MAX {
        return MINUTES_MAX;
    }
    let offset = minutes - MINUTES_MIN;
    let k = if offset % step == 0 {
        offset / step - 1
    } else {
        offset / step
    };
    MINUTES_MIN + k * step
}

#[cfg(test)]
mod tests {
    use pomo_types::{Cycle, CycleRequest, FieldError, FormField, NewCycleFormData};

    use super::{Control, ControlOutcome, NewCycleForm, SubmitOutcome, step_down, step_up};
    use crate::cycles::CycleContext;

    /// Records every call the form makes.
    #[derive(Default)]
    struct RecordingContext {
        active: Option<Cycle>,
        created: Vec<CycleRequest>,
        interrupts: usize,
    }

    impl RecordingContext {
        fn with_active_cycle() -> Self {
            let request = NewCycleFormData::new("Running", 25)
                .validate()
                .expect("valid request");
            Self {
                active: Some(Cycle::start(request, chrono::Utc::now())),
                ..Self::default()
            }
        }
    }

    impl CycleContext for RecordingContext {
        fn active_cycle(&self) -> Option<&Cycle> {
            self.active.as_ref()
        }

        fn create_new_cycle(&mut self, request: CycleRequest) {
            self.created.push(request);
        }

        fn interrupt_current_cycle(&mut self) {
            self.interrupts += 1;
        }
    }

    fn fill(form: &mut NewCycleForm, ctx: &RecordingContext, task: &str, minutes: u32) {
        let mut editor = form.editor(ctx).expect("inputs enabled");
        editor.set_task(task);
        drop(editor);
        form.focus_next();
        let mut editor = form.editor(ctx).expect("inputs enabled");
        for c in minutes.to_string().chars() {
            editor.enter_char(c);
        }
    }

    #[test]
    fn valid_submit_creates_once_and_resets() {
        let mut ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();
        fill(&mut form, &ctx, "Study", 25);

        assert_eq!(form.handle_submit(&mut ctx), SubmitOutcome::Created);

        assert_eq!(ctx.created.len(), 1);
        assert_eq!(ctx.created[0].task().as_str(), "Study");
        assert_eq!(ctx.created[0].minutes_amount().get(), 25);
        assert_eq!(form.values(), NewCycleFormData::new("", 0));
        assert_eq!(form.focus(), FormField::Task);
        assert!(form.errors().is_none());
    }

    #[test]
    fn invalid_submit_never_reaches_context() {
        let mut ctx = RecordingContext::default();
        for (task, minutes) in [("ab", 25), (&*"x".repeat(51), 25), ("Study", 4), ("Study", 61)] {
            let mut form = NewCycleForm::default();
            fill(&mut form, &ctx, task, minutes);

            let outcome = form.handle_submit(&mut ctx);

            assert!(matches!(outcome, SubmitOutcome::Rejected(_)), "{task:?} {minutes}");
            assert!(form.errors().is_some());
            // Rejected input stays in place for correction.
            assert_eq!(form.values(), NewCycleFormData::new(task, minutes));
        }
        assert!(ctx.created.is_empty());
    }

    #[test]
    fn errors_clear_as_fields_become_valid() {
        let mut ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();
        fill(&mut form, &ctx, "Study", 2);
        form.handle_submit(&mut ctx);
        assert_eq!(
            form.error_for(FormField::MinutesAmount),
            Some(FieldError::CycleTooShort)
        );

        form.editor(&ctx).expect("inputs enabled").enter_char('0');

        assert_eq!(form.minutes_amount(), 20);
        assert!(form.errors().is_none());
    }

    #[test]
    fn edits_before_first_submit_do_not_show_errors() {
        let ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();
        form.editor(&ctx).expect("inputs enabled").enter_char('a');
        assert!(form.errors().is_none());
    }

    #[test]
    fn start_control_disabled_until_three_characters() {
        let ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();
        assert_eq!(form.control(&ctx), Control::Start { disabled: true });

        let mut editor = form.editor(&ctx).expect("inputs enabled");
        editor.enter_char('a');
        editor.enter_char('b');
        drop(editor);
        assert_eq!(form.control(&ctx), Control::Start { disabled: true });

        form.editor(&ctx).expect("inputs enabled").enter_char('c');
        assert_eq!(form.control(&ctx), Control::Start { disabled: false });
    }

    #[test]
    fn activating_disabled_start_does_nothing() {
        let mut ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();

        assert_eq!(form.activate_control(&mut ctx), ControlOutcome::Ignored);
        assert!(ctx.created.is_empty());
        assert!(form.errors().is_none());
    }

    #[test]
    fn active_cycle_shows_interrupt_and_interrupts_once() {
        let mut ctx = RecordingContext::with_active_cycle();
        let mut form = NewCycleForm::default();
        assert_eq!(form.control(&ctx), Control::Interrupt);

        assert_eq!(form.activate_control(&mut ctx), ControlOutcome::Interrupted);

        assert_eq!(ctx.interrupts, 1);
        assert!(ctx.created.is_empty());
    }

    #[test]
    fn inputs_disabled_while_cycle_runs() {
        let ctx = RecordingContext::with_active_cycle();
        let mut form = NewCycleForm::default();
        assert!(form.editor(&ctx).is_none());
    }

    #[test]
    fn minutes_field_accepts_digits_only() {
        let ctx = RecordingContext::default();
        let mut form = NewCycleForm::default();
        form.focus_next();
        let mut editor = form.editor(&ctx).expect("inputs enabled");
        editor.enter_char('2');
        editor.enter_char('x');
        editor.enter_char('5');
        editor.enter_text("1-2");
        editor.delete_char();
        drop(editor);

        assert_eq!(form.minutes_amount(), 25);
        assert_eq!(form.task().text(), "");
    }

    #[test]
    fn stepping_snaps_and_clamps() {
        assert_eq!(step_up(0, 5), 5);
        assert_eq!(step_up(5, 5), 10);
        assert_eq!(step_up(7, 5), 10);
        assert_eq!(step_up(60, 5), 60);
        assert_eq!(step_up(58, 5), 60);

        assert_eq!(step_down(0, 5), 5);
        assert_eq!(step_down(10, 5), 5);
        assert_eq!(step_down(12, 5), 10);
        assert_eq!(step_down(90, 5), 60);
    }

    #[test]
    fn suggestions_extend_typed_text() {
        let ctx = RecordingContext::default();
        let at = chrono::Utc::now();
        let cycles: Vec<Cycle> = ["Write report", "Write tests", "Read", "Write report"]
            .iter()
            .map(|t| {
                let request = NewCycleFormData::new(*t, 25).validate().expect("valid");
                Cycle::start(request, at)
            })
            .collect();

        let mut form = NewCycleForm::default();
        form.editor(&ctx).expect("inputs enabled").set_task("wri");

        assert_eq!(
            form.task_suggestions(&cycles),
            vec!["Write report", "Write tests"]
        );
    }
}
