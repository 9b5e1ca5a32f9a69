//! Menu listing layout: numbered, wrapped labels with dot leaders to the value.

use std::borrow::Cow;

use textwrap::Options;
use unicode_width::UnicodeWidthStr;

use crate::menu::Menu;

const FIRST_INDENT: &str = ")  ";
const NEXT_INDENT: &str = "     ";
const MIN_WRAP_WIDTH: usize = 8;

/// A drawn menu and the selection map that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// `picks[n - 1]` is the key shown as number `n`.
    pub picks: Vec<String>,
}

fn wrap_options(width: usize) -> Options<'static> {
    Options::new(width.max(MIN_WRAP_WIDTH))
        .initial_indent(FIRST_INDENT)
        .subsequent_indent(NEXT_INDENT)
}

fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let lines: Vec<String> = textwrap::wrap(label, wrap_options(width))
        .into_iter()
        .map(Cow::into_owned)
        .collect();
    match lines.first() {
        Some(first) if first.starts_with(FIRST_INDENT) => lines,
        _ => vec![FIRST_INDENT.to_string()],
    }
}

fn pad_with_dots(line: &str, width: usize) -> String {
    let trimmed = line.trim_end();
    let fill = width.saturating_sub(UnicodeWidthStr::width(trimmed));
    format!("{trimmed}{}", ".".repeat(fill))
}

/// Lay out the visible options of `menu`.
///
/// Labels wrap at the configured width. When the value is not empty, the
/// last label line is padded with dots to `width` (single-line labels) or
/// `width + 2` (wrapped labels) before the value.
#[must_use]
pub fn render(menu: &Menu, header: Option<&str>) -> Rendered {
    let width = menu.config().width;
    let mut out: Vec<String> = Vec::new();
    let mut picks = Vec::new();

    if let Some(header) = header {
        out.push(header.to_string());
        out.push(String::new());
    }

    for (idx, option) in menu.visible_options().enumerate() {
        picks.push(option.key().to_string());
        let mut lines = wrap_label(option.label(), width);
        let value = option.value().to_string();
        if !option.value().is_unset() {
            let line_width = if lines.len() == 1 { width } else { width + 2 };
            if let Some(last) = lines.last_mut() {
                *last = pad_with_dots(last, line_width);
            }
        }
        out.push(format!("{:>2}{} {value}", idx + 1, lines.join("\n")));
        out.push(String::new());
    }

    let config = menu.config();
    out.push(format!("{NEXT_INDENT}{}", "-".repeat(width)));
    out.push(format!(" X{}", textwrap::fill(&config.exit_label, wrap_options(width))));
    out.push(format!(" Q{}", textwrap::fill(&config.quit_label, wrap_options(width))));
    out.push(String::new());

    Rendered {
        text: out.join("\n"),
        picks,
    }
}
