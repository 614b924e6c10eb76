use serde::Deserialize;
use std::{env, path::PathBuf};
use thiserror::Error;

use pomo_types::ui::UiOptions;

use crate::form::DEFAULT_MINUTES_STEP;

const DATA_DIR_NAME: &str = ".pomo";
const ASCII_ENV_VAR: &str = "POMO_ASCII";

// Default value functions for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

const fn default_minutes_step() -> u32 {
    DEFAULT_MINUTES_STEP
}

/// `~/.pomo/config.toml`. Every section and key is optional.
///
/// ```toml
/// [app]
/// ascii_only = false
/// high_contrast = false
/// terminal_title = true
///
/// [cycles]
/// persist = true
/// minutes_step = 5
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct PomoConfig {
    pub app: Option<AppConfig>,
    pub cycles: Option<CyclesConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the countdown and markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Mirror the countdown in the terminal title.
    #[serde(default = "default_true")]
    pub terminal_title: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ascii_only: false,
            high_contrast: false,
            terminal_title: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CyclesConfig {
    /// Save cycles to `~/.pomo/cycles.json` and restore them on start.
    #[serde(default = "default_true")]
    pub persist: bool,
    /// Up/Down step of the minutes field.
    #[serde(default = "default_minutes_step")]
    pub minutes_step: u32,
}

impl Default for CyclesConfig {
    fn default() -> Self {
        Self {
            persist: true,
            minutes_step: DEFAULT_MINUTES_STEP,
        }
    }
}

impl PomoConfig {
    /// Load `~/.pomo/config.toml`. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    /// Read and parse `path`. Callers decide how to report the error.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// UI options from `[app]`, with `POMO_ASCII` forcing ASCII glyphs.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|app| app.ascii_only) || ascii_forced_by_env(),
            high_contrast: app.is_some_and(|app| app.high_contrast),
            terminal_title: app.is_none_or(|app| app.terminal_title),
        }
    }

    #[must_use]
    pub fn persist_enabled(&self) -> bool {
        self.cycles.as_ref().is_none_or(|cycles| cycles.persist)
    }

    #[must_use]
    pub fn minutes_step(&self) -> u32 {
        self.cycles
            .as_ref()
            .map_or(DEFAULT_MINUTES_STEP, |cycles| cycles.minutes_step)
            .max(1)
    }
}

/// `POMO_ASCII` set to anything other than empty, `0` or `false`.
#[must_use]
pub fn ascii_forced_by_env() -> bool {
    env::var(ASCII_ENV_VAR).is_ok_and(|value| {
        let value = value.trim();
        !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
    })
}

/// `~/.pomo`, home of the config, the saved cycles and the log.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}
