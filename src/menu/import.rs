//! Import option defaults from a command-line parser definition.

use std::collections::HashSet;

use clap::{ArgAction, ArgMatches, Command, ValueHint};

use super::Menu;
use crate::error::Result;
use crate::log_debug;
use crate::option::OptionSpec;
use crate::value::{OptionKind, Value};

/// One parser flag seen as a menu option.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub key: String,
    pub label: String,
    pub default: Value,
    pub kind: OptionKind,
    pub is_file: bool,
    pub choices: Vec<String>,
}

impl FlagSpec {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default: impl Into<Value>,
        kind: OptionKind,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            default: default.into(),
            kind,
            is_file: false,
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn file(mut self, is_file: bool) -> Self {
        self.is_file = is_file;
        self
    }

    fn into_option_spec(self) -> OptionSpec {
        let spec = OptionSpec::new(self.key, self.label);
        let spec = if self.choices.is_empty() {
            spec.kind(self.kind)
        } else {
            spec.choices(self.choices)
        };
        spec.file(self.is_file).default_value(self.default)
    }
}

impl Menu {
    /// Add one option per flag spec, skipping keys in `exclude`.
    ///
    /// # Errors
    ///
    /// Stops at the first spec whose default is invalid or whose key is
    /// already registered.
    pub fn import_defaults<I>(&mut self, specs: I, exclude: &HashSet<&str>) -> Result<()>
    where
        I: IntoIterator<Item = FlagSpec>,
    {
        for spec in specs {
            if spec.key.is_empty() || exclude.contains(spec.key.as_str()) {
                continue;
            }
            self.add_option(spec.into_option_spec())?;
        }
        Ok(())
    }

    /// Import every named flag of a clap command, using parsed values as defaults.
    ///
    /// # Errors
    ///
    /// See [`Menu::import_defaults`].
    pub fn add_parser_data(
        &mut self,
        cmd: &Command,
        matches: &ArgMatches,
        exclude: &HashSet<&str>,
    ) -> Result<()> {
        self.import_defaults(flag_specs_from_clap(cmd, matches), exclude)
    }
}

/// Describe each named clap argument as a [`FlagSpec`].
///
/// Help/version flags and positionals are skipped. The kind follows the
/// parsed value's Rust type; anything that is not a bool or number becomes
/// text (or a choice when the argument lists possible values).
#[must_use]
pub fn flag_specs_from_clap(cmd: &Command, matches: &ArgMatches) -> Vec<FlagSpec> {
    let mut specs = Vec::new();
    for arg in cmd.get_arguments() {
        if arg.is_positional()
            || matches!(
                arg.get_action(),
                ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
            )
        {
            continue;
        }
        let key = arg.get_id().as_str().to_string();
        let label = arg
            .get_help()
            .map(ToString::to_string)
            .filter(|help| !help.trim().is_empty())
            .unwrap_or_else(|| key.clone());

        let is_switch = matches!(arg.get_action(), ArgAction::SetTrue | ArgAction::SetFalse);
        let (kind, default) = if is_switch {
            let flag = matches.try_get_one::<bool>(&key).ok().flatten().copied();
            (OptionKind::Bool, flag.map(Value::Bool))
        } else if let Some(n) = parsed_int(matches, &key) {
            (OptionKind::Int, Some(Value::Int(n)))
        } else if let Some(n) = parsed_float(matches, &key) {
            (OptionKind::Float, Some(Value::Float(n)))
        } else {
            let raw = matches
                .try_get_raw(&key)
                .ok()
                .flatten()
                .and_then(|mut values| values.next())
                .map(|value| value.to_string_lossy().into_owned());
            (OptionKind::String, raw.map(Value::Str))
        };

        let choices: Vec<String> = if kind == OptionKind::String {
            arg.get_possible_values()
                .iter()
                .map(|value| value.get_name().to_string())
                .collect()
        } else {
            Vec::new()
        };
        let is_file = matches!(
            arg.get_value_hint(),
            ValueHint::FilePath | ValueHint::AnyPath | ValueHint::DirPath
        ) || arg
            .get_value_names()
            .is_some_and(|names| names.iter().any(|name| name.as_str() == "FILE"));

        log_debug(&format!("importing flag {key} as {kind} (file={is_file})"));
        specs.push(FlagSpec {
            default: default.unwrap_or_else(|| kind.empty_value()),
            key,
            label,
            kind,
            is_file,
            choices,
        });
    }
    specs
}

fn parsed_int(matches: &ArgMatches, key: &str) -> Option<i64> {
    if let Ok(Some(n)) = matches.try_get_one::<i64>(key) {
        return Some(*n);
    }
    if let Ok(Some(n)) = matches.try_get_one::<i32>(key) {
        return Some(i64::from(*n));
    }
    if let Ok(Some(n)) = matches.try_get_one::<u32>(key) {
        return Some(i64::from(*n));
    }
    if let Ok(Some(n)) = matches.try_get_one::<u8>(key) {
        return Some(i64::from(*n));
    }
    if let Ok(Some(n)) = matches.try_get_one::<u64>(key) {
        return i64::try_from(*n).ok();
    }
    if let Ok(Some(n)) = matches.try_get_one::<usize>(key) {
        return i64::try_from(*n).ok();
    }
    None
}

fn parsed_float(matches: &ArgMatches, key: &str) -> Option<f64> {
    if let Ok(Some(n)) = matches.try_get_one::<f64>(key) {
        return Some(*n);
    }
    if let Ok(Some(n)) = matches.try_get_one::<f32>(key) {
        return Some(f64::from(*n));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};
    use std::path::PathBuf;

    #[derive(Debug, Parser)]
    struct Flags {
        /// Number of objects
        #[arg(short, long, default_value_t = 1)]
        count: i64,

        /// Height in cm
        #[arg(long, default_value_t = 60.5)]
        height: f64,

        /// Really likes dogs
        #[arg(short = 'd', long)]
        loves_dogs: bool,

        /// Favorite color
        #[arg(long, default_value = "green", value_parser = ["red", "green", "blue"])]
        color: String,

        /// Input file
        #[arg(long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,

        #[arg(long, default_value = "x")]
        undocumented: String,
    }

    fn parse(args: &[&str]) -> (Command, ArgMatches) {
        let cmd = Flags::command();
        let matches = cmd.clone().try_get_matches_from(args).expect("valid args");
        let _ = Flags::from_arg_matches(&matches).expect("round trip");
        (cmd, matches)
    }

    #[test]
    fn flag_specs_follow_parsed_types() {
        let (cmd, matches) = parse(&["flags", "--count", "3", "-d"]);
        let specs = flag_specs_from_clap(&cmd, &matches);
        let keys: Vec<&str> = specs.iter().map(|spec| spec.key.as_str()).collect();
        assert_eq!(keys, ["count", "height", "loves_dogs", "color", "input", "undocumented"]);

        assert_eq!(specs[0].kind, OptionKind::Int);
        assert_eq!(specs[0].default, Value::Int(3));
        assert_eq!(specs[0].label, "Number of objects");
        assert_eq!(specs[1].kind, OptionKind::Float);
        assert_eq!(specs[1].default, Value::Float(60.5));
        assert_eq!(specs[2].kind, OptionKind::Bool);
        assert_eq!(specs[2].default, Value::Bool(true));
        assert_eq!(specs[3].choices, ["red", "green", "blue"]);
        assert_eq!(specs[3].default, Value::from("green"));
        assert!(specs[4].is_file);
        assert_eq!(specs[4].default, Value::from(""));
        assert_eq!(specs[5].label, "undocumented");
    }

    #[test]
    fn add_parser_data_registers_options_and_honors_exclude() {
        let (cmd, matches) = parse(&["flags"]);
        let mut menu = Menu::new();
        let exclude: HashSet<&str> = ["undocumented"].into_iter().collect();
        menu.add_parser_data(&cmd, &matches, &exclude).expect("import");

        assert!(!menu.contains("undocumented"));
        assert_eq!(menu.value("count"), Some(&Value::Int(1)));
        assert_eq!(menu.value("loves_dogs"), Some(&Value::Bool(false)));
        let color = menu.get("color").expect("color option");
        assert_eq!(color.kind(), OptionKind::Choice);
        assert!(menu.get("input").is_some_and(|option| option.is_file()));
    }

    #[test]
    fn import_defaults_rejects_invalid_defaults() {
        let mut menu = Menu::new();
        let specs = vec![
            FlagSpec::new("ok", "Fine", 2, OptionKind::Int),
            FlagSpec::new("bad", "Broken", "two", OptionKind::Int),
        ];
        assert!(menu.import_defaults(specs, &HashSet::new()).is_err());
        assert!(menu.contains("ok"));
        assert!(!menu.contains("bad"));
    }
}
