//! Selection parsing and per-option dispatch for one turn of a menu session.

use crate::console::Console;
use crate::error::{MenuError, Result};
use crate::menu::Menu;
use crate::option::{HandlerReply, OptionAction};
use crate::prompts::{offer_list, Choice};
use crate::value::{OptionKind, Value};
use crate::{log_debug, log_debug_content};

const SELECTION_PROMPT: &str = "Choose a number above to change a setting: ";
const NUMBER_PROMPT: &str = "Please enter a number: ";
const VALUE_PROMPT: &str = "Please enter a value: ";
const FILE_PROMPT: &str = "Drag a file icon into this window to select a file or folder: ";

/// What the session loop should do after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Redraw and ask again.
    Continue,
    /// The user chose the exit entry; the session returns its snapshot.
    Stop,
    /// The user chose to quit the program.
    Quit,
}

/// A parsed answer to the selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Option(String),
    Stop,
    Quit,
}

/// Result of asking for a value with the generic prompt.
enum Prompted {
    Value(Value),
    Unchanged,
    Quit,
}

/// Interpret one line typed at the selection prompt against the current picks.
///
/// # Errors
///
/// Returns [`MenuError::Response`] naming the input when it is empty, not a
/// number, or not a listed number.
pub fn parse_selection(input: &str, picks: &[String]) -> Result<Selection> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MenuError::response("Please enter a number listed above"));
    }
    if input.eq_ignore_ascii_case("x") {
        return Ok(Selection::Stop);
    }
    if input.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }
    let number = input
        .parse::<usize>()
        .map_err(|_| MenuError::response(format!("'{input}' is not a number listed above")))?;
    number
        .checked_sub(1)
        .and_then(|idx| picks.get(idx))
        .map(|key| Selection::Option(key.clone()))
        .ok_or_else(|| MenuError::response(format!("{input} is not an available option")))
}

impl Menu {
    /// Read one selection against the picks of the last render.
    ///
    /// # Errors
    ///
    /// See [`parse_selection`]; console failures are [`MenuError::Io`].
    pub fn ask_number(&self, console: &mut dyn Console) -> Result<Selection> {
        let Some(input) = console.read_line(SELECTION_PROMPT)? else {
            log_debug("input closed at selection prompt; quitting");
            return Ok(Selection::Quit);
        };
        let selection = parse_selection(&input, &self.picks)?;
        if selection == Selection::Quit {
            log_debug("user terminated program");
        }
        Ok(selection)
    }

    /// Ask for a selection and apply it.
    ///
    /// # Errors
    ///
    /// Recoverable errors leave every option value unchanged.
    pub fn handle_response(&mut self, console: &mut dyn Console) -> Result<Flow> {
        match self.ask_number(console)? {
            Selection::Option(key) => self.dispatch(&key, console),
            Selection::Stop => Ok(Flow::Stop),
            Selection::Quit => Ok(Flow::Quit),
        }
    }

    /// Run the selected option's behavior and store its result.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] for a missing key, handler and
    /// editor errors as-is, and [`MenuError::Coercion`] for rejected values.
    pub fn dispatch(&mut self, key: &str, console: &mut dyn Console) -> Result<Flow> {
        let option = self
            .get(key)
            .ok_or_else(|| MenuError::UnknownOption(key.to_string()))?;
        let action = option.action().clone();

        let raw = match action {
            OptionAction::Handler(handler) => match handler.invoke(self, console)? {
                HandlerReply::Unchanged => None,
                HandlerReply::Value(value) => Some(value),
                HandlerReply::Quit => return Ok(Flow::Quit),
            },
            OptionAction::Editor => {
                let seed = option.value().to_string();
                log_debug_content(&format!("sending editor containing value [{seed}]"));
                let edited = self.editor().edit(&seed, console)?;
                let shown = edited.as_deref().unwrap_or("");
                log_debug_content(&format!("editor returned value [{shown}]"));
                edited.map(Value::Str)
            }
            OptionAction::Generic => match self.prompt_value(key, console)? {
                Prompted::Value(value) => Some(value),
                Prompted::Unchanged => None,
                Prompted::Quit => return Ok(Flow::Quit),
            },
        };

        if let Some(raw) = raw.filter(|raw| !raw.is_unset()) {
            let stored = self.set_default(key, raw)?;
            tracing::debug!(key, value = %stored, "option updated");
        }
        Ok(Flow::Continue)
    }

    fn prompt_value(&mut self, key: &str, console: &mut dyn Console) -> Result<Prompted> {
        let option = self.option_mut(key)?;
        if option.kind() == OptionKind::Bool {
            option.toggle();
            log_debug(&format!("toggled {key}"));
            return Ok(Prompted::Unchanged);
        }

        if option.kind() == OptionKind::Choice && !option.choices().is_empty() {
            let items: Vec<(String, String)> = option
                .choices()
                .iter()
                .map(|choice| (choice.clone(), choice.clone()))
                .collect();
            return Ok(match offer_list(console, &items)? {
                Choice::Picked(choice) => Prompted::Value(Value::Str(choice)),
                Choice::Exit => Prompted::Unchanged,
                Choice::Quit => Prompted::Quit,
            });
        }

        let prompt = if option.is_file() {
            FILE_PROMPT
        } else if option.kind().is_numeric() {
            NUMBER_PROMPT
        } else {
            VALUE_PROMPT
        };
        let Some(response) = console.read_line(prompt)? else {
            return Ok(Prompted::Quit);
        };
        let response = response.trim();
        if response.is_empty() {
            return Ok(Prompted::Unchanged);
        }
        Ok(Prompted::Value(Value::from(response)))
    }
}
