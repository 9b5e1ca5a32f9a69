//! Option handlers that show off sub-menus, pick-lists, and menu edits.

use std::env;
use std::fs;

use textmenu::prompts::{offer_list, request_file_name, Choice};
use textmenu::{
    Console, HandlerReply, Menu, MenuError, OptionKind, OptionSpec, Result, SessionEnd, Value,
};

const MAX_WRAP_WIDTH: usize = 500;

/// Attach handlers to imported options and add the demo-only options.
pub(crate) fn install(menu: &mut Menu) -> Result<()> {
    menu.set_handler("wrap_width", wrap_width)?;
    menu.set_handler("color", color)?;

    menu.add_option(OptionSpec::new("add_option", "add an option").handler(add_option))?;
    menu.add_option(
        OptionSpec::new("choose_file", "Choose a file from this directory").handler(choose_file),
    )?;
    menu.add_option(
        OptionSpec::new("input_file", "Type or drag the path of any file")
            .file(true)
            .handler(input_file),
    )?;
    menu.add_option(OptionSpec::new("hide", "Choose an option to hide").handler(hide_option))?;
    menu.add_option(
        OptionSpec::new("edit_test", "Test the editor")
            .default_value("starting text")
            .send_editor(true),
    )?;
    Ok(())
}

fn submenu(parent: &Menu) -> Menu {
    let mut sub = Menu::with_config(parent.config().clone()).with_shared_editor(parent.editor());
    sub.set_clear_on_first_display(true);
    sub
}

fn wrap_width(menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    let current_width = menu.value("wrap_width").cloned().unwrap_or(Value::Int(40));
    let mut sub = submenu(menu);
    sub.add_option(
        OptionSpec::new("wrap_width", "Wrap width")
            .kind(OptionKind::Int)
            .default_value(current_width.clone()),
    )?;
    match sub.run(console, None)? {
        SessionEnd::Finished(values) => {
            let width = values.get("wrap_width").cloned().unwrap_or(current_width);
            match width.as_int().and_then(|n| usize::try_from(n).ok()) {
                Some(n) if (1..=MAX_WRAP_WIDTH).contains(&n) => menu.set_width(n),
                _ => {
                    return Err(MenuError::Response(format!(
                        "{width} is not a usable width (1 to {MAX_WRAP_WIDTH})"
                    )))
                }
            }
            Ok(HandlerReply::Value(width))
        }
        SessionEnd::Quit => Ok(HandlerReply::Quit),
    }
}

fn color(menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    let current = menu.value("color").cloned().unwrap_or_else(|| Value::from(""));
    let mut sub = submenu(menu);
    sub.add_option(OptionSpec::new("color", "Favorite Color").default_value(current))?;
    Ok(match sub.run(console, None)? {
        SessionEnd::Finished(mut values) => {
            HandlerReply::Value(values.remove("color").unwrap_or_else(|| Value::from("")))
        }
        SessionEnd::Quit => HandlerReply::Quit,
    })
}

fn add_option(menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    let mut sub = submenu(menu);
    sub.add_option(OptionSpec::new("key", "Option Key"))?;
    sub.add_option(OptionSpec::new("label", "Option Label"))?;
    sub.add_option(OptionSpec::new("val", "Option Value"))?;
    let values = match sub.run(console, None)? {
        SessionEnd::Finished(values) => values,
        SessionEnd::Quit => return Ok(HandlerReply::Quit),
    };

    let text = |key: &str| values.get(key).map(ToString::to_string).unwrap_or_default();
    let key = text("key");
    if key.trim().is_empty() {
        return Err(MenuError::Response("a new option needs a key".to_string()));
    }
    menu.add_option(OptionSpec::new(key.trim(), text("label")).default_value(text("val")))?;
    Ok(HandlerReply::Unchanged)
}

fn choose_file(_menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    let unreadable = |err: std::io::Error| MenuError::Response(format!("cannot list files: {err}"));
    let cwd = env::current_dir().map_err(unreadable)?;
    let mut files: Vec<String> = fs::read_dir(&cwd)
        .map_err(unreadable)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(MenuError::Response(format!("no files in {}", cwd.display())));
    }

    console.write_line("please select a file")?;
    let items: Vec<(String, String)> = files.into_iter().map(|name| (name.clone(), name)).collect();
    Ok(match offer_list(console, &items)? {
        Choice::Picked(name) => HandlerReply::Value(Value::Str(name)),
        Choice::Exit => HandlerReply::Unchanged,
        Choice::Quit => HandlerReply::Quit,
    })
}

fn input_file(_menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    Ok(match request_file_name(console, Some("Enter the name of an existing file."))? {
        Choice::Picked(path) => HandlerReply::Value(Value::Str(path.display().to_string())),
        Choice::Exit => HandlerReply::Unchanged,
        Choice::Quit => HandlerReply::Quit,
    })
}

fn hide_option(menu: &mut Menu, console: &mut dyn Console) -> Result<HandlerReply> {
    console.write_line("choose an option to hide")?;
    let items: Vec<(String, String)> = menu
        .visible_keys()
        .map(|key| (key.to_string(), key.to_string()))
        .collect();
    match offer_list(console, &items)? {
        Choice::Picked(key) => menu.hide(&key)?,
        Choice::Exit => {}
        Choice::Quit => return Ok(HandlerReply::Quit),
    }
    Ok(HandlerReply::Unchanged)
}
