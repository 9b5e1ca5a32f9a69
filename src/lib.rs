//! Interactive numbered text menus for reviewing and overriding settings.
//!
//! A [`Menu`] holds typed options (often imported from a clap parser), draws
//! them as a numbered list, and lets the user change values until they choose
//! the exit entry, at which point [`Menu::run`] returns the final key/value
//! snapshot. Console and editor access go through the [`Console`] and
//! [`Editor`] traits so sessions can be scripted in tests.

pub mod config;
pub mod console;
pub mod dispatch;
pub mod editor;
pub mod error;
mod logging;
pub mod menu;
pub mod option;
pub mod prompts;
pub mod render;
pub mod session;
mod telemetry;
pub mod value;

pub use config::{LogConfig, MenuConfig};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use dispatch::{Flow, Selection};
pub use editor::{Editor, ExternalEditor, LineCaptureEditor};
pub use error::{CoercionError, MenuError, Result};
pub use logging::{init_logging, log_debug, log_debug_content, log_file_path};
pub use menu::{flag_specs_from_clap, FlagSpec, Menu, Snapshot};
pub use option::{HandlerReply, MenuOption, OptionAction, OptionHandler, OptionSpec};
pub use prompts::Choice;
pub use session::SessionEnd;
pub use telemetry::init_tracing;
pub use value::{coerce, coerce_text, OptionKind, Value};
