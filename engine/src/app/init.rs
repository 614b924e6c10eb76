//! Application initialization for the App.

use std::path::PathBuf;

use pomo_types::ui::{Screen, UiOptions};

use super::{AppCore, AppUi};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, PomoConfig};
use crate::cycles::{CyclesContext, CyclesState};
use crate::form::{DEFAULT_MINUTES_STEP, NewCycleForm};
use crate::store::CycleStore;
use crate::App;

/// Everything needed to assemble an [`App`] without touching disk.
#[derive(Debug)]
pub struct AppBuildParts {
    pub cycles: CyclesContext,
    /// `None` disables persistence.
    pub store: Option<CycleStore>,
    pub ui_options: UiOptions,
    pub minutes_step: u32,
}

impl Default for AppBuildParts {
    fn default() -> Self {
        Self {
            cycles: CyclesContext::default(),
            store: None,
            ui_options: UiOptions::default(),
            minutes_step: DEFAULT_MINUTES_STEP,
        }
    }
}

impl App {
    #[must_use]
    pub fn from_parts(parts: AppBuildParts) -> Self {
        // A restored state counts as already saved.
        let saved_revision = parts.cycles.revision();
        App {
            ui: AppUi {
                screen: Screen::default(),
                form: NewCycleForm::new(parts.minutes_step),
                history_scroll: 0,
                ui_options: parts.ui_options,
                notification: None,
                should_quit: false,
            },
            core: AppCore {
                cycles: parts.cycles,
                store: parts.store,
                saved_revision,
                save_warning_shown: false,
            },
        }
    }

    /// Build the app from the result of [`PomoConfig::load`], restoring saved
    /// cycles from `~/.pomo`.
    ///
    /// A config that failed to load is reported and defaults are used.
    #[must_use]
    pub fn new(config: Result<Option<PomoConfig>, ConfigError>) -> Self {
        let (config, config_error) = match config {
            Ok(config) => (config, None),
            Err(e) => (None, Some(e)),
        };
        let persist = config.as_ref().is_none_or(PomoConfig::persist_enabled);
        let store_path = if persist {
            CycleStore::default_path()
        } else {
            None
        };
        if persist && store_path.is_none() {
            tracing::warn!("No home directory; cycles will not be saved");
        }
        let mut app = Self::with_store(config.as_ref(), store_path, Box::new(SystemClock));
        if let Some(error) = config_error {
            app.report_config_error(&error);
        }
        app
    }

    /// Build the app with an explicit store location and clock.
    ///
    /// A store that fails to load is logged and the app starts with no cycles.
    #[must_use]
    pub fn with_store(
        config: Option<&PomoConfig>,
        store_path: Option<PathBuf>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let store = store_path.map(CycleStore::new);
        let (state, load_error) = match store.as_ref().map(CycleStore::load) {
            None => (CyclesState::default(), None),
            Some(Ok(state)) => (state, None),
            Some(Err(e)) => {
                tracing::warn!("Failed to load saved cycles: {e}");
                (CyclesState::default(), Some(e))
            }
        };

        let parts = AppBuildParts {
            cycles: CyclesContext::with_state(state, clock),
            store,
            ui_options: config.map_or_else(default_ui_options, PomoConfig::ui_options),
            minutes_step: config.map_or(DEFAULT_MINUTES_STEP, PomoConfig::minutes_step),
        };
        let mut app = Self::from_parts(parts);
        if load_error.is_some() {
            app.push_notification("Saved cycles could not be loaded; starting fresh.");
        }
        app
    }

    pub(crate) fn report_config_error(&mut self, error: &ConfigError) {
        tracing::warn!(path = %error.path().display(), "Ignoring config: {error}");
        self.push_notification("Config could not be loaded; using defaults.");
    }
}

fn default_ui_options() -> UiOptions {
    UiOptions {
        ascii_only: crate::config::ascii_forced_by_env(),
        ..UiOptions::default()
    }
}
