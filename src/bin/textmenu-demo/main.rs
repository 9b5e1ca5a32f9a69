//! Demo entrypoint: turn the demo's own flags into a menu, run it twice.
//!
//! The first session starts from the parsed command-line values. The second
//! starts after a table of overrides has been applied, so both the import and
//! the bulk-update paths are exercised from a real terminal.

mod cli;
mod handlers;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, FromArgMatches};
use std::collections::HashSet;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use textmenu::{
    init_logging, init_tracing, log_debug, Console, LineCaptureEditor, LogConfig, Menu,
    SessionEnd, Snapshot, StdConsole, Value,
};

use crate::cli::{DemoConfig, DEMO_ONLY_ARGS};

const HEADER: &str = "Review the settings below. Choose X to keep them.";

const DEFAULT_OVERRIDES: &str = r#"
count = 5
favorite_song = "Wish You Were Here"
height = 44.0
loves_dogs = true
"#;

fn main() -> Result<()> {
    let cmd = DemoConfig::command();
    let matches = cmd.clone().get_matches();
    let config = DemoConfig::from_arg_matches(&matches)?;
    init_logging(&config.log);
    init_tracing(&config.log);
    log_debug("textmenu-demo started");

    let mut menu = build_menu(&config);
    let exclude: HashSet<&str> = LogConfig::arg_ids()
        .into_iter()
        .chain(DEMO_ONLY_ARGS)
        .collect();
    menu.add_parser_data(&cmd, &matches, &exclude)?;
    handlers::install(&mut menu)?;

    let mut console = StdConsole::new();
    let first = finish_or_quit(menu.run(&mut console, Some(HEADER))?);
    print_snapshot(&first)?;
    if console.read_line("press return to continue. ")?.is_none() {
        return Ok(());
    }

    let overrides = load_overrides(config.overrides.as_deref())?;
    menu.set_defaults(overrides)
        .context("failed to apply overrides")?;
    let second = finish_or_quit(menu.run(&mut console, Some(HEADER))?);
    print_snapshot(&second)?;
    log_debug("textmenu-demo finished");
    Ok(())
}

fn build_menu(config: &DemoConfig) -> Menu {
    let menu = Menu::new();
    if config.line_editor || !io::stdin().is_terminal() {
        return menu.with_editor(LineCaptureEditor::default());
    }
    menu
}

/// Quitting from any menu ends the process right away.
fn finish_or_quit(end: SessionEnd) -> Snapshot {
    match end {
        SessionEnd::Finished(values) => values,
        SessionEnd::Quit => {
            log_debug("quit requested");
            eprintln!("Quitting");
            process::exit(0);
        }
    }
}

fn print_snapshot(values: &Snapshot) -> Result<()> {
    let text = serde_json::to_string_pretty(values)?;
    println!("{text}");
    Ok(())
}

fn load_overrides(path: Option<&Path>) -> Result<Vec<(String, Value)>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides from {}", path.display()))?,
        None => DEFAULT_OVERRIDES.to_string(),
    };
    let table: toml::Table = text.parse().context("overrides are not a TOML table")?;

    let mut values = Vec::with_capacity(table.len());
    for (key, item) in table {
        let value = match item {
            toml::Value::Integer(n) => Value::Int(n),
            toml::Value::Float(n) => Value::Float(n),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::String(s) => Value::Str(s),
            other => bail!("override '{key}' has unsupported type {}", other.type_str()),
        };
        values.push((key, value));
    }
    Ok(values)
}
