//! Line-oriented console access so menus run against a terminal or a script.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// The three console primitives a menu needs.
pub trait Console {
    /// Show `prompt` and read one line without its line ending.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or input cannot be read.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the output stream is closed.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Clear the screen before a redraw.
    ///
    /// # Errors
    ///
    /// Returns an error if the output stream is closed.
    fn clear(&mut self, screen_height: usize) -> io::Result<()>;
}

/// Console backed by the process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    #[must_use]
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        drop(stdout);

        read_lossy_line(&mut io::stdin().lock())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()
    }

    fn clear(&mut self, screen_height: usize) -> io::Result<()> {
        let mut stdout = io::stdout();
        if stdout.is_terminal() {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))
        } else {
            // Piped output gets blank lines so earlier output scrolls away.
            write!(stdout, "{}", "\n".repeat(screen_height))?;
            stdout.flush()
        }
    }
}

/// Read one line, replacing bytes that are not valid UTF-8.
fn read_lossy_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_ending(
        String::from_utf8_lossy(&buf).into_owned(),
    )))
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Console that replays queued input and records everything written.
///
/// Useful for tests and for driving a menu from a fixed answer list.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: String,
    clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: String::new(),
            clears: 0,
        }
    }

    /// Queue more input lines after the existing ones.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.inputs.push_back(line.into());
    }

    /// Prompts and lines written so far.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    #[must_use]
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push_str(prompt);
        let line = self.inputs.pop_front();
        if let Some(line) = &line {
            self.transcript.push_str(line);
        }
        self.transcript.push('\n');
        Ok(line)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push_str(text);
        self.transcript.push('\n');
        Ok(())
    }

    fn clear(&mut self, _screen_height: usize) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
