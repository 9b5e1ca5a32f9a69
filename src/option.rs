//! Option records and the per-option behavior chosen at dispatch time.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::console::Console;
use crate::error::{CoercionError, MenuError};
use crate::menu::Menu;
use crate::value::{coerce, OptionKind, Value};

/// What a handler asks the dispatcher to do after it returns.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerReply {
    /// Leave the option's value alone (the handler may still have edited the menu).
    Unchanged,
    /// Coerce and store this value under the option's key.
    Value(Value),
    /// The user asked to quit from inside the handler.
    Quit,
}

/// Custom behavior that replaces the generic value prompt.
///
/// Handlers run synchronously with full access to the owning menu, so they can
/// open sub-menus, add or hide options, or resize the display.
pub trait OptionHandler {
    /// Run the handler for the selected option.
    ///
    /// # Errors
    ///
    /// Any [`MenuError`] is reported by the session loop; recoverable errors
    /// leave the option's value unchanged.
    fn invoke(&self, menu: &mut Menu, console: &mut dyn Console)
        -> Result<HandlerReply, MenuError>;
}

impl<F> OptionHandler for F
where
    F: Fn(&mut Menu, &mut dyn Console) -> Result<HandlerReply, MenuError>,
{
    fn invoke(
        &self,
        menu: &mut Menu,
        console: &mut dyn Console,
    ) -> Result<HandlerReply, MenuError> {
        self(menu, console)
    }
}

/// How a selected option gets its new value.
#[derive(Clone, Default)]
pub enum OptionAction {
    /// Toggle bools, prompt for everything else.
    #[default]
    Generic,
    /// Seed the menu's editor with the current value.
    Editor,
    Handler(Rc<dyn OptionHandler>),
}

impl fmt::Debug for OptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionAction::Generic => write!(f, "Generic"),
            OptionAction::Editor => write!(f, "Editor"),
            OptionAction::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

/// A single named, typed setting held by a [`Menu`].
#[derive(Debug, Clone)]
pub struct MenuOption {
    key: String,
    label: String,
    kind: OptionKind,
    value: Value,
    is_file: bool,
    choices: Vec<String>,
    pub(crate) action: OptionAction,
}

impl MenuOption {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn action(&self) -> &OptionAction {
        &self.action
    }

    /// Validate `raw` for this option without storing it.
    ///
    /// File options get quotes stripped and are resolved to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns the [`CoercionError`] describing why `raw` was rejected.
    pub fn accept(&self, raw: &Value) -> Result<Value, CoercionError> {
        let value = coerce(self.kind, raw)?;
        if self.kind == OptionKind::Choice && !self.choices.is_empty() && !value.is_unset() {
            let text = value.to_string();
            if !self.choices.iter().any(|choice| *choice == text) {
                return Err(CoercionError::NotAChoice {
                    input: text,
                    allowed: self.choices.clone(),
                });
            }
        }
        if self.is_file && !value.is_unset() {
            let path = resolve_existing_path(&value.to_string())?;
            return Ok(Value::Str(path.display().to_string()));
        }
        Ok(value)
    }

    /// Validate and store `raw`; the previous value survives any error.
    pub(crate) fn assign(&mut self, raw: &Value) -> Result<&Value, CoercionError> {
        self.value = self.accept(raw)?;
        Ok(&self.value)
    }

    /// Flip a bool option in place. Returns `false` for other kinds.
    pub(crate) fn toggle(&mut self) -> bool {
        match self.value {
            Value::Bool(b) => {
                self.value = Value::Bool(!b);
                true
            }
            _ => false,
        }
    }
}

/// Strip terminal quoting and confirm the path exists.
pub(crate) fn resolve_existing_path(raw: &str) -> Result<PathBuf, CoercionError> {
    // Dragging a file into some terminals wraps the path in double quotes.
    let cleaned = raw.trim().replace('"', "");
    let path = Path::new(&cleaned);
    if !path.exists() {
        return Err(CoercionError::FileNotFound { path: cleaned });
    }
    std::path::absolute(path).map_err(|_| CoercionError::FileNotFound {
        path: cleaned.clone(),
    })
}

/// Builder describing an option to register with [`Menu::add_option`].
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) default: Option<Value>,
    pub(crate) kind: OptionKind,
    pub(crate) is_file: bool,
    pub(crate) choices: Vec<String>,
    pub(crate) action: OptionAction,
}

impl OptionSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            default: None,
            kind: OptionKind::String,
            is_file: false,
            choices: Vec::new(),
            action: OptionAction::Generic,
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn file(mut self, is_file: bool) -> Self {
        self.is_file = is_file;
        self
    }

    /// Restrict a [`OptionKind::Choice`] option to these values.
    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind = OptionKind::Choice;
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn handler<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Menu, &mut dyn Console) -> Result<HandlerReply, MenuError> + 'static,
    {
        self.shared_handler(Rc::new(handler))
    }

    /// Attach a handler that is shared with other options or menus.
    #[must_use]
    pub fn shared_handler(mut self, handler: Rc<dyn OptionHandler>) -> Self {
        self.action = OptionAction::Handler(handler);
        self
    }

    /// Send the value to the editor when selected. Ignored if a handler is set.
    #[must_use]
    pub fn send_editor(mut self, send_editor: bool) -> Self {
        if send_editor && !matches!(self.action, OptionAction::Handler(_)) {
            self.action = OptionAction::Editor;
        } else if !send_editor && matches!(self.action, OptionAction::Editor) {
            self.action = OptionAction::Generic;
        }
        self
    }

    /// Validate the default and produce the option record.
    pub(crate) fn build(self) -> Result<MenuOption, MenuError> {
        let mut option = MenuOption {
            label: normalize_label(&self.label),
            value: self.kind.empty_value(),
            kind: self.kind,
            is_file: self.is_file,
            choices: self.choices,
            action: self.action,
            key: self.key,
        };
        if let Some(default) = self.default {
            if let Err(source) = option.assign(&default) {
                return Err(MenuError::InvalidDefault {
                    key: option.key,
                    source,
                });
            }
        }
        Ok(option)
    }
}

fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = env::temp_dir().join(format!("textmenu-option-{suffix}-{nanos}.txt"));
        fs::write(&path, "data").expect("write temp file");
        path
    }

    #[test]
    fn labels_are_whitespace_normalized() {
        let option = OptionSpec::new("count", "  Number of\n\tobjects.  ")
            .build()
            .expect("valid option");
        assert_eq!(option.label(), "Number of objects.");
    }

    #[test]
    fn missing_default_uses_kind_empty_value() {
        let option = OptionSpec::new("n", "N")
            .kind(OptionKind::Int)
            .build()
            .expect("valid option");
        assert_eq!(option.value(), &Value::Int(0));
    }

    #[test]
    fn invalid_default_fails_at_construction() {
        let err = OptionSpec::new("n", "N")
            .kind(OptionKind::Int)
            .default_value("many")
            .build()
            .expect_err("default should be rejected");
        assert!(matches!(err, MenuError::InvalidDefault { ref key, .. } if key == "n"));
    }

    #[test]
    fn handler_wins_over_editor_flag() {
        let spec = OptionSpec::new("k", "K")
            .handler(|_, _| Ok(HandlerReply::Unchanged))
            .send_editor(true);
        assert!(matches!(spec.action, OptionAction::Handler(_)));

        let spec = OptionSpec::new("k", "K").send_editor(true);
        assert!(matches!(spec.action, OptionAction::Editor));
    }

    #[test]
    fn choices_restrict_values() {
        let option = OptionSpec::new("color", "Color")
            .choices(["red", "green"])
            .default_value("green")
            .build()
            .expect("valid option");
        assert!(option.accept(&Value::from("red")).is_ok());
        assert!(matches!(
            option.accept(&Value::from("teal")),
            Err(CoercionError::NotAChoice { .. })
        ));
        assert!(option.accept(&Value::from("")).is_ok());
    }

    #[test]
    fn file_values_must_exist_and_resolve_absolute() {
        let option = OptionSpec::new("input", "Input file")
            .file(true)
            .build()
            .expect("empty file option is valid");
        assert!(option.value().is_unset());

        let missing = env::temp_dir().join("textmenu-definitely-missing.txt");
        let err = option
            .accept(&Value::Str(missing.display().to_string()))
            .expect_err("missing file should be rejected");
        assert!(matches!(err, CoercionError::FileNotFound { .. }));

        let existing = unique_temp_file("exists");
        let quoted = format!("\"{}\"", existing.display());
        let accepted = option.accept(&Value::Str(quoted)).expect("existing file");
        assert_eq!(accepted, Value::Str(existing.display().to_string()));
        let _ = fs::remove_file(existing);
    }

    #[test]
    fn toggle_flips_bools_only() {
        let mut flag = OptionSpec::new("dogs", "Likes dogs")
            .kind(OptionKind::Bool)
            .default_value(false)
            .build()
            .expect("valid option");
        assert!(flag.toggle());
        assert_eq!(flag.value(), &Value::Bool(true));
        assert!(flag.toggle());
        assert_eq!(flag.value(), &Value::Bool(false));

        let mut text = OptionSpec::new("name", "Name").build().expect("valid option");
        assert!(!text.toggle());
    }
}
