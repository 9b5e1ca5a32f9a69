//! Editor collaborators for options that take free-form, possibly multi-line text.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::console::Console;
use crate::error::MenuError;
use crate::prompts::multiline_input;
use crate::{log_debug, log_debug_content};

/// Modal text editing: take a seed string, return the edited text.
pub trait Editor {
    /// Edit `seed`; `Ok(None)` means the user discarded the edit.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Editor`] if the editor could not run, or
    /// [`MenuError::Io`] if the console failed.
    fn edit(&self, seed: &str, console: &mut dyn Console) -> Result<Option<String>, MenuError>;
}

/// Runs the user's `$VISUAL`/`$EDITOR` on a temp file holding the seed.
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    command: Option<String>,
}

impl ExternalEditor {
    /// Use `command` (shell-style words, e.g. `"code --wait"`) instead of the environment.
    #[must_use]
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }

    fn resolve_command(&self) -> String {
        self.command
            .clone()
            .or_else(|| env::var("VISUAL").ok())
            .or_else(|| env::var("EDITOR").ok())
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}

fn scratch_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    env::temp_dir().join(format!("textmenu-edit-{}-{nanos}.txt", std::process::id()))
}

impl Editor for ExternalEditor {
    fn edit(&self, seed: &str, _console: &mut dyn Console) -> Result<Option<String>, MenuError> {
        let command = self.resolve_command();
        let words = shell_words::split(&command).map_err(|err| {
            MenuError::Editor(format!("cannot parse editor command '{command}': {err}"))
        })?;
        let Some((program, args)) = words.split_first() else {
            return Err(MenuError::Editor("editor command is empty".to_string()));
        };

        let path = scratch_path();
        fs::write(&path, seed)
            .map_err(|err| MenuError::Editor(format!("cannot write {}: {err}", path.display())))?;
        log_debug(&format!("launching editor '{command}' on {}", path.display()));

        let status = Command::new(program).args(args).arg(&path).status();
        let result = match status {
            Ok(status) if status.success() => fs::read_to_string(&path)
                .map(|text| Some(text.trim().to_string()))
                .map_err(|err| MenuError::Editor(format!("cannot read {}: {err}", path.display()))),
            Ok(status) => {
                log_debug(&format!("editor exited with {status}; discarding edit"));
                Ok(None)
            }
            Err(err) => Err(MenuError::Editor(format!("cannot start '{program}': {err}"))),
        };
        let _ = fs::remove_file(&path);
        result
    }
}

/// Captures typed lines until a terminator line; no terminal control needed.
#[derive(Debug, Clone)]
pub struct LineCaptureEditor {
    terminator: String,
}

impl Default for LineCaptureEditor {
    fn default() -> Self {
        Self {
            terminator: ".".to_string(),
        }
    }
}

impl LineCaptureEditor {
    #[must_use]
    pub fn with_terminator(terminator: impl Into<String>) -> Self {
        Self {
            terminator: terminator.into(),
        }
    }
}

impl Editor for LineCaptureEditor {
    fn edit(&self, seed: &str, console: &mut dyn Console) -> Result<Option<String>, MenuError> {
        let msg = if seed.is_empty() {
            "Enter text below.".to_string()
        } else {
            format!("Current text:\n{seed}\nEnter replacement text below.")
        };
        let captured = multiline_input(console, Some(&msg), "# ", &self.terminator)?;
        if let Some(text) = &captured {
            log_debug_content(&format!("line editor captured [{text}]"));
        }
        Ok(captured)
    }
}
