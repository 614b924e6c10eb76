//! View state for rendering.

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Mirror the running countdown in the terminal title.
    pub terminal_title: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            ascii_only: false,
            high_contrast: false,
            terminal_title: true,
        }
    }
}

/// Top-level screens. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    History,
}

impl Screen {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Home => Self::History,
            Self::History => Self::Home,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Timer",
            Self::History => "History",
        }
    }
}
