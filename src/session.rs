//! The interactive loop: draw, ask, apply, until the user exits or quits.

use crate::console::Console;
use crate::dispatch::Flow;
use crate::error::Result;
use crate::log_debug;
use crate::menu::{Menu, Snapshot};
use crate::render::render;

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// The user chose the exit entry; carries every option's final value.
    Finished(Snapshot),
    /// The user chose quit. The caller decides how to end the program.
    Quit,
}

impl SessionEnd {
    #[must_use]
    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            SessionEnd::Finished(snapshot) => Some(snapshot),
            SessionEnd::Quit => None,
        }
    }

    #[must_use]
    pub fn is_quit(&self) -> bool {
        matches!(self, SessionEnd::Quit)
    }
}

impl Menu {
    /// Draw the visible options and refresh the selection map.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MenuError::Io`] if the console fails.
    pub fn display(&mut self, console: &mut dyn Console, header: Option<&str>) -> Result<()> {
        if self.clear_before_display {
            console.clear(self.config().screen_height)?;
        }
        let rendered = render(self, header);
        self.picks = rendered.picks;
        console.write_line(&rendered.text)?;
        self.clear_before_display = true;
        Ok(())
    }

    /// Run the menu until the user exits (snapshot) or quits.
    ///
    /// Recoverable errors are printed and the prompt repeats without a redraw,
    /// so the message stays next to the unchanged listing.
    ///
    /// # Errors
    ///
    /// Only console failures end the session with an error.
    pub fn run(&mut self, console: &mut dyn Console, header: Option<&str>) -> Result<SessionEnd> {
        tracing::info!(options = self.len(), "menu session started");
        let mut show = true;
        loop {
            if show {
                self.display(console, header)?;
            }
            match self.handle_response(console) {
                Ok(Flow::Continue) => show = true,
                Ok(Flow::Stop) => {
                    tracing::info!("menu session finished");
                    return Ok(SessionEnd::Finished(self.snapshot()));
                }
                Ok(Flow::Quit) => {
                    tracing::info!("menu session quit");
                    return Ok(SessionEnd::Quit);
                }
                Err(err) if err.is_recoverable() => {
                    log_debug(&format!("recoverable menu error: {err}"));
                    console.write_line(&format!("\n{}", err.to_string().trim()))?;
                    show = false;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
