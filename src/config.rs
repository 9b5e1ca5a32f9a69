//! Display and logging configuration shared by menus and the demo binary.

use clap::Args;

pub const DEFAULT_WIDTH: usize = 60;
pub const DEFAULT_SCREEN_HEIGHT: usize = 50;
pub const DEFAULT_EXIT_LABEL: &str = "Exit this menu and continue";
pub const DEFAULT_QUIT_LABEL: &str = "Quit the program";

/// Layout settings for one menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Column the option labels wrap at and values align to.
    pub width: usize,
    /// Lines printed to scroll old output away when the console is not a terminal.
    pub screen_height: usize,
    pub exit_label: String,
    pub quit_label: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            exit_label: DEFAULT_EXIT_LABEL.to_string(),
            quit_label: DEFAULT_QUIT_LABEL.to_string(),
        }
    }
}

impl MenuConfig {
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_screen_height(mut self, screen_height: usize) -> Self {
        self.screen_height = screen_height;
        self
    }

    /// Override the exit label; an empty label keeps the default.
    #[must_use]
    pub fn with_exit_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.exit_label = label;
        }
        self
    }

    /// Override the quit label; an empty label keeps the default.
    #[must_use]
    pub fn with_quit_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.quit_label = label;
        }
        self
    }
}

/// Logging flags, meant to be flattened into a tool's own clap parser.
#[derive(Debug, Clone, Default, Args)]
pub struct LogConfig {
    /// Write debug logs to the temp dir
    #[arg(long = "logs", env = "TEXTMENU_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all logging (overrides --logs)
    #[arg(long = "no-logs", env = "TEXTMENU_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Include entered option values in debug logs
    #[arg(long = "log-content", env = "TEXTMENU_LOG_CONTENT", default_value_t = false)]
    pub log_content: bool,
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.logs && !self.no_logs
    }

    #[must_use]
    pub fn content_enabled(&self) -> bool {
        self.enabled() && self.log_content
    }

    /// Arg ids this struct adds, so menus built from a parser can skip them.
    #[must_use]
    pub fn arg_ids() -> [&'static str; 3] {
        ["logs", "no_logs", "log_content"]
    }
}
