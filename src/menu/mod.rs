//! Option registry: ordered options, visibility, and default management.

mod import;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use crate::config::MenuConfig;
use crate::console::Console;
use crate::editor::{Editor, ExternalEditor};
use crate::error::{MenuError, Result};
use crate::log_debug_content;
use crate::option::{HandlerReply, MenuOption, OptionAction, OptionHandler, OptionSpec};
use crate::value::Value;

pub use import::{flag_specs_from_clap, FlagSpec};

/// Final key -> value mapping returned when a session ends normally.
pub type Snapshot = BTreeMap<String, Value>;

/// An interactive menu: the options, their display order, and display state.
pub struct Menu {
    options: HashMap<String, MenuOption>,
    order: Vec<String>,
    visible: HashSet<String>,
    /// Display position (1-based, stored 0-based) -> key, valid until the next render.
    pub(crate) picks: Vec<String>,
    config: MenuConfig,
    /// The first display keeps whatever is already on screen (e.g. a banner).
    pub(crate) clear_before_display: bool,
    editor: Rc<dyn Editor>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("order", &self.order)
            .field("visible", &self.visible)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MenuConfig::default())
    }

    #[must_use]
    pub fn with_config(config: MenuConfig) -> Self {
        Self {
            options: HashMap::new(),
            order: Vec::new(),
            visible: HashSet::new(),
            picks: Vec::new(),
            config,
            clear_before_display: false,
            editor: Rc::new(ExternalEditor::default()),
        }
    }

    /// Replace the editor used by options registered with `send_editor`.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Editor + 'static) -> Self {
        self.editor = Rc::new(editor);
        self
    }

    /// Share another menu's editor (sub-menus opened from handlers use this).
    #[must_use]
    pub fn with_shared_editor(mut self, editor: Rc<dyn Editor>) -> Self {
        self.editor = editor;
        self
    }

    #[must_use]
    pub fn editor(&self) -> Rc<dyn Editor> {
        Rc::clone(&self.editor)
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MenuConfig {
        &mut self.config
    }

    pub fn set_width(&mut self, width: usize) {
        self.config.width = width;
    }

    /// Clear the screen even on the first display, as nested menus do.
    pub fn set_clear_on_first_display(&mut self, clear: bool) {
        self.clear_before_display = clear;
    }

    /// Register a new option; its default is validated immediately.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateOption`] if the key exists, or
    /// [`MenuError::InvalidDefault`] if the default does not coerce.
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<()> {
        if self.options.contains_key(&spec.key) {
            return Err(MenuError::DuplicateOption(spec.key));
        }
        let option = spec.build()?;
        let key = option.key().to_string();
        self.order.push(key.clone());
        self.visible.insert(key.clone());
        self.options.insert(key, option);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MenuOption> {
        self.options.get(key)
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.options.get(key).map(MenuOption::value)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All keys in display order, hidden ones included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Visible options in display order.
    pub fn visible_options(&self) -> impl Iterator<Item = &MenuOption> {
        self.order
            .iter()
            .filter(|key| self.visible.contains(*key))
            .filter_map(|key| self.options.get(key))
    }

    pub fn visible_keys(&self) -> impl Iterator<Item = &str> {
        self.visible_options().map(MenuOption::key)
    }

    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Remove an option from display and selection; its value is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] if the key is not registered.
    pub fn hide(&mut self, key: &str) -> Result<()> {
        self.require(key)?;
        self.visible.remove(key);
        Ok(())
    }

    /// Make a hidden option selectable again.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] if the key is not registered.
    pub fn show(&mut self, key: &str) -> Result<()> {
        self.require(key)?;
        self.visible.insert(key.to_string());
        Ok(())
    }

    /// Attach a handler to an option that already exists.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] if the key is not registered.
    pub fn set_handler<F>(&mut self, key: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut Menu, &mut dyn Console) -> Result<HandlerReply> + 'static,
    {
        self.set_shared_handler(key, Rc::new(handler))
    }

    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] if the key is not registered.
    pub fn set_shared_handler(&mut self, key: &str, handler: Rc<dyn OptionHandler>) -> Result<()> {
        let option = self
            .options
            .get_mut(key)
            .ok_or_else(|| MenuError::UnknownOption(key.to_string()))?;
        option.action = OptionAction::Handler(handler);
        Ok(())
    }

    /// Coerce `value` and store it, hidden options included.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOption`] for a missing key or
    /// [`MenuError::Coercion`] when the value does not fit; the old value stays.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> Result<&Value> {
        let value = value.into();
        let option = self
            .options
            .get_mut(key)
            .ok_or_else(|| MenuError::UnknownOption(key.to_string()))?;
        let stored = option.assign(&value).map_err(|source| MenuError::Coercion {
            key: key.to_string(),
            source,
        })?;
        log_debug_content(&format!("set {key} to [{stored}]"));
        Ok(stored)
    }

    /// Apply many values at once. Nothing is stored unless every key exists
    /// and every value coerces.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOptions`] listing every missing key, or the
    /// first [`MenuError::Coercion`] failure.
    pub fn set_defaults<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values: Vec<(String, Value)> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let missing: Vec<String> = values
            .iter()
            .filter(|(key, _)| !self.options.contains_key(key))
            .map(|(key, _)| key.clone())
            .collect();
        if !missing.is_empty() {
            return Err(MenuError::UnknownOptions(missing));
        }

        let mut accepted = Vec::with_capacity(values.len());
        for (key, raw) in values {
            let option = self.require(&key)?;
            let value = option.accept(&raw).map_err(|source| MenuError::Coercion {
                key: key.clone(),
                source,
            })?;
            accepted.push((key, value));
        }

        for (key, value) in accepted {
            self.set_default(&key, value)?;
        }
        Ok(())
    }

    /// Current value of every option, hidden ones included.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.options
            .iter()
            .map(|(key, option)| (key.clone(), option.value().clone()))
            .collect()
    }

    pub(crate) fn option_mut(&mut self, key: &str) -> Result<&mut MenuOption> {
        self.options
            .get_mut(key)
            .ok_or_else(|| MenuError::UnknownOption(key.to_string()))
    }

    fn require(&self, key: &str) -> Result<&MenuOption> {
        self.options
            .get(key)
            .ok_or_else(|| MenuError::UnknownOption(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::OptionKind;

    fn sample_menu() -> Menu {
        let mut menu = Menu::new();
        menu.add_option(
            OptionSpec::new("count", "Number of objects")
                .kind(OptionKind::Int)
                .default_value(1),
        )
        .expect("count");
        menu.add_option(OptionSpec::new("name", "Name").default_value("a"))
            .expect("name");
        menu.add_option(
            OptionSpec::new("height", "Height in cm")
                .kind(OptionKind::Float)
                .default_value(60.5),
        )
        .expect("height");
        menu
    }

    #[test]
    fn options_keep_insertion_order_and_start_visible() {
        let menu = sample_menu();
        assert_eq!(menu.keys().collect::<Vec<_>>(), ["count", "name", "height"]);
        assert_eq!(menu.visible_keys().collect::<Vec<_>>(), ["count", "name", "height"]);
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut menu = sample_menu();
        let err = menu
            .add_option(OptionSpec::new("name", "Other name"))
            .expect_err("duplicate");
        assert!(matches!(err, MenuError::DuplicateOption(ref key) if key == "name"));
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.get("name").map(MenuOption::label), Some("Name"));
    }

    #[test]
    fn invalid_default_registers_nothing() {
        let mut menu = sample_menu();
        let err = menu
            .add_option(
                OptionSpec::new("ratio", "Ratio")
                    .kind(OptionKind::Float)
                    .default_value("wide"),
            )
            .expect_err("bad default");
        assert!(matches!(err, MenuError::InvalidDefault { .. }));
        assert!(!menu.contains("ratio"));
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn set_default_coerces_and_reports_unknown_keys() {
        let mut menu = sample_menu();
        assert_eq!(menu.set_default("count", "7").unwrap(), &Value::Int(7));
        assert!(matches!(
            menu.set_default("missing", 1),
            Err(MenuError::UnknownOption(_))
        ));
        assert!(matches!(
            menu.set_default("count", "seven"),
            Err(MenuError::Coercion { .. })
        ));
        assert_eq!(menu.value("count"), Some(&Value::Int(7)));
    }

    #[test]
    fn hidden_options_keep_data_and_accept_defaults() {
        let mut menu = sample_menu();
        menu.hide("name").unwrap();
        assert!(!menu.is_visible("name"));
        assert_eq!(menu.visible_keys().collect::<Vec<_>>(), ["count", "height"]);

        menu.set_default("name", "b").unwrap();
        assert_eq!(menu.snapshot()["name"], Value::from("b"));

        menu.show("name").unwrap();
        assert_eq!(menu.visible_keys().collect::<Vec<_>>(), ["count", "name", "height"]);
        assert!(menu.hide("missing").is_err());
    }

    #[test]
    fn set_defaults_is_all_or_nothing_for_unknown_keys() {
        let mut menu = sample_menu();
        let err = menu
            .set_defaults([("count", Value::Int(5)), ("bogus", Value::Int(1))])
            .expect_err("unknown key");
        assert!(matches!(err, MenuError::UnknownOptions(ref keys) if keys == &["bogus"]));
        assert_eq!(menu.value("count"), Some(&Value::Int(1)));
    }

    #[test]
    fn set_defaults_is_all_or_nothing_for_bad_values() {
        let mut menu = sample_menu();
        let err = menu
            .set_defaults([("name", Value::from("z")), ("count", Value::from("lots"))])
            .expect_err("bad value");
        assert!(matches!(err, MenuError::Coercion { ref key, .. } if key == "count"));
        assert_eq!(menu.value("name"), Some(&Value::from("a")));
    }

    #[test]
    fn set_defaults_applies_every_value() {
        let mut menu = sample_menu();
        menu.set_defaults([
            ("count", Value::Int(5)),
            ("height", Value::Float(44.0)),
            ("name", Value::from("Wish You Were Here")),
        ])
        .unwrap();
        let snapshot = menu.snapshot();
        assert_eq!(snapshot["count"], Value::Int(5));
        assert_eq!(snapshot["height"], Value::Float(44.0));
        assert_eq!(snapshot["name"], Value::from("Wish You Were Here"));
    }

    #[test]
    fn set_handler_requires_existing_key() {
        let mut menu = sample_menu();
        menu.set_handler("name", |_, _| Ok(HandlerReply::Unchanged))
            .unwrap();
        assert!(matches!(
            menu.get("name").map(MenuOption::action),
            Some(OptionAction::Handler(_))
        ));
        assert!(menu
            .set_handler("missing", |_, _| Ok(HandlerReply::Unchanged))
            .is_err());
    }
}
