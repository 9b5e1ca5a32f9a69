//! Stand-alone prompts for handlers: pick-lists, option tables, file names, free text.

use std::path::PathBuf;

use crate::console::Console;
use crate::error::{MenuError, Result};
use crate::log_debug;
use crate::option::resolve_existing_path;

/// Outcome of a prompt that offers a way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Picked(T),
    /// The user left the prompt without choosing (`x`).
    Exit,
    /// The user asked to quit the program (`q`).
    Quit,
}

impl<T> Choice<T> {
    #[must_use]
    pub fn picked(self) -> Option<T> {
        match self {
            Choice::Picked(value) => Some(value),
            Choice::Exit | Choice::Quit => None,
        }
    }
}

/// Show a numbered list and return the value of the chosen entry.
///
/// # Errors
///
/// Returns [`MenuError::Io`] if the console fails.
pub fn offer_list<T: Clone>(console: &mut dyn Console, items: &[(T, String)]) -> Result<Choice<T>> {
    for (idx, (_, label)) in items.iter().enumerate() {
        console.write_line(&format!("{:>3}) {label}", idx + 1))?;
    }
    console.write_line(&format!("{:>3}) {}", "X", "Exit this menu"))?;

    loop {
        let Some(input) = console.read_line("please enter a selection and press return: ")? else {
            return Ok(Choice::Quit);
        };
        let input = input.trim();
        if input.eq_ignore_ascii_case("x") {
            return Ok(Choice::Exit);
        }
        if input.eq_ignore_ascii_case("q") {
            return Ok(Choice::Quit);
        }
        match input.parse::<usize>() {
            Ok(n) => match n.checked_sub(1).and_then(|idx| items.get(idx)) {
                Some((value, _)) => return Ok(Choice::Picked(value.clone())),
                None => console.write_line(&format!("\"{input}\" is not an available choice"))?,
            },
            Err(_) => console.write_line("please choose a number")?,
        }
    }
}

/// One row of an option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub choice: String,
    pub message: String,
    pub value: String,
}

/// Parse `choice | message | value` lines; a `#` choice numbers itself.
///
/// # Errors
///
/// Returns [`MenuError::InvalidTable`] for a non-blank line without three fields.
pub fn parse_option_table(table: &str) -> Result<Vec<TableEntry>> {
    let mut entries = Vec::new();
    let mut last_number: Option<u32> = None;
    for line in table.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        let [choice, message, value] = fields.as_slice() else {
            return Err(MenuError::InvalidTable(line.trim().to_string()));
        };
        let choice = if *choice == "#" {
            let next = last_number.map_or(1, |n| n + 1);
            last_number = Some(next);
            next.to_string()
        } else {
            if let Ok(n) = choice.parse::<u32>() {
                last_number = Some(n);
            }
            choice.to_uppercase()
        };
        entries.push(TableEntry {
            choice,
            message: (*message).to_string(),
            value: (*value).to_string(),
        });
    }
    Ok(entries)
}

/// Present an option table until the user picks a row or quits.
///
/// An empty answer returns `default` when one is given.
///
/// # Errors
///
/// Returns [`MenuError::InvalidTable`] for a malformed table or
/// [`MenuError::Io`] if the console fails.
pub fn offer_options(
    console: &mut dyn Console,
    table: &str,
    default: Option<&str>,
) -> Result<Choice<String>> {
    let entries = parse_option_table(table)?;
    loop {
        console.write_line(
            "Please choose from the following options or Q to quit, then press return.\n",
        )?;
        console.write_line("Q) quit")?;
        for entry in &entries {
            console.write_line(&format!("{}) {}", entry.choice, entry.message))?;
        }
        if let Some(default) = default {
            console.write_line(&format!("[press return for {default}]"))?;
        }

        let Some(response) = console.read_line("\nPick a number or letter: ")? else {
            return Ok(Choice::Quit);
        };
        let response = response.trim().to_uppercase();
        if response == "Q" {
            log_debug("user quit from option table");
            return Ok(Choice::Quit);
        }
        if response.is_empty() {
            if let Some(default) = default {
                return Ok(Choice::Picked(default.to_string()));
            }
        }
        if let Some(entry) = entries.iter().find(|entry| entry.choice == response) {
            return Ok(Choice::Picked(entry.value.clone()));
        }
        console.write_line(&format!("\nError: [{response}] is not an option\n"))?;
    }
}

const TRY_AGAIN_TABLE: &str = "1 | Try again | try_again";

/// Ask for a path until one exists; returns it made absolute.
///
/// # Errors
///
/// Returns [`MenuError::Io`] if the console fails.
pub fn request_file_name(console: &mut dyn Console, msg: Option<&str>) -> Result<Choice<PathBuf>> {
    loop {
        if let Some(msg) = msg {
            console.write_line("")?;
            console.write_line(msg.trim())?;
            console.write_line("")?;
        }
        let Some(filename) = console.read_line("file or directory name: ")? else {
            return Ok(Choice::Quit);
        };
        match resolve_existing_path(&filename) {
            Ok(path) => return Ok(Choice::Picked(path)),
            Err(_) => {
                let shown = filename.trim().replace('"', "");
                console.write_line(&format!("---> File \"{shown}\" not found."))?;
                if offer_options(console, TRY_AGAIN_TABLE, None)? == Choice::Quit {
                    return Ok(Choice::Quit);
                }
            }
        }
    }
}

/// Collect lines until `terminator` (or end of input).
///
/// Returns the trimmed non-blank lines joined with newlines, or `None` if
/// nothing was typed.
///
/// # Errors
///
/// Returns [`MenuError::Io`] if the console fails.
pub fn multiline_input(
    console: &mut dyn Console,
    msg: Option<&str>,
    prompt: &str,
    terminator: &str,
) -> Result<Option<String>> {
    if let Some(msg) = msg {
        console.write_line(msg)?;
    }
    console.write_line(&format!("Type '{terminator}' on its own line when finished."))?;

    let mut lines = Vec::new();
    while let Some(line) = console.read_line(prompt)? {
        if line.trim() == terminator {
            break;
        }
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok((!lines.is_empty()).then(|| lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use std::env;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn items() -> Vec<(String, String)> {
        vec![
            ("a.rs".to_string(), "a.rs".to_string()),
            ("b.rs".to_string(), "b.rs".to_string()),
        ]
    }

    #[test]
    fn offer_list_reprompts_until_valid_choice() {
        let mut console = ScriptedConsole::new(["7", "two", "2"]);
        let choice = offer_list(&mut console, &items()).unwrap();
        assert_eq!(choice, Choice::Picked("b.rs".to_string()));
        let transcript = console.transcript();
        assert!(transcript.contains("  1) a.rs"));
        assert!(transcript.contains("  X) Exit this menu"));
        assert!(transcript.contains("\"7\" is not an available choice"));
        assert!(transcript.contains("please choose a number"));
    }

    #[test]
    fn offer_list_honors_exit_and_quit() {
        let mut console = ScriptedConsole::new(["X"]);
        assert_eq!(offer_list(&mut console, &items()).unwrap(), Choice::Exit);
        let mut console = ScriptedConsole::new(["q"]);
        assert_eq!(offer_list(&mut console, &items()).unwrap(), Choice::Quit);
        let mut console = ScriptedConsole::default();
        assert_eq!(offer_list(&mut console, &items()).unwrap(), Choice::Quit);
    }

    #[test]
    fn option_table_numbers_hash_rows() {
        let entries = parse_option_table(
            "
            # | first | one
            a | letter | alpha
            # | second | two
            5 | fifth | five
            # | sixth | six
            ",
        )
        .unwrap();
        let choices: Vec<&str> = entries.iter().map(|entry| entry.choice.as_str()).collect();
        assert_eq!(choices, ["1", "A", "2", "5", "6"]);
        assert_eq!(entries[1].value, "alpha");
    }

    #[test]
    fn option_table_rejects_short_lines() {
        let err = parse_option_table("1 | missing value").expect_err("two fields");
        assert!(matches!(err, MenuError::InvalidTable(_)));
    }

    #[test]
    fn offer_options_uses_default_and_reports_unknown() {
        let table = "1 | Keep going | go\n2 | Stop | stop";
        let mut console = ScriptedConsole::new(["9", ""]);
        let choice = offer_options(&mut console, table, Some("go")).unwrap();
        assert_eq!(choice, Choice::Picked("go".to_string()));
        assert!(console.transcript().contains("Error: [9] is not an option"));
        assert!(console.transcript().contains("[press return for go]"));

        let mut console = ScriptedConsole::new(["a", "2"]);
        let table_with_letter = "a | Alpha | first\n2 | Two | second";
        let choice = offer_options(&mut console, table_with_letter, None).unwrap();
        assert_eq!(choice, Choice::Picked("first".to_string()));

        let mut console = ScriptedConsole::new(["q"]);
        assert_eq!(offer_options(&mut console, table, None).unwrap(), Choice::Quit);
    }

    #[test]
    fn request_file_name_retries_then_resolves() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let existing = env::temp_dir().join(format!("textmenu-prompt-{nanos}.txt"));
        fs::write(&existing, "x").expect("write temp file");

        let mut console = ScriptedConsole::new([
            "/no/such/textmenu/file".to_string(),
            "1".to_string(),
            format!("\"{}\"", existing.display()),
        ]);
        let choice = request_file_name(&mut console, Some("Pick a file")).unwrap();
        assert_eq!(choice, Choice::Picked(existing.clone()));
        assert!(console
            .transcript()
            .contains("---> File \"/no/such/textmenu/file\" not found."));
        let _ = fs::remove_file(existing);
    }

    #[test]
    fn request_file_name_can_quit() {
        let mut console = ScriptedConsole::new(["/no/such/textmenu/file", "Q"]);
        assert_eq!(request_file_name(&mut console, None).unwrap(), Choice::Quit);
    }

    #[test]
    fn multiline_input_stops_at_end_of_input() {
        let mut console = ScriptedConsole::new(["alpha", "", "beta"]);
        let text = multiline_input(&mut console, None, "# ", ".").unwrap();
        assert_eq!(text.as_deref(), Some("alpha\nbeta"));
    }

    #[test]
    fn choice_picked_discards_exit_and_quit() {
        assert_eq!(Choice::Picked(3).picked(), Some(3));
        assert_eq!(Choice::<i32>::Exit.picked(), None);
        assert_eq!(Choice::<i32>::Quit.picked(), None);
    }
}
