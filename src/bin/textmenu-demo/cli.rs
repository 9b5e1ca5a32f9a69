//! Demo flag schema; most flags become menu options.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use textmenu::LogConfig;

/// Flag ids that configure the demo itself and stay out of the menu.
pub(crate) const DEMO_ONLY_ARGS: [&str; 2] = ["overrides", "line_editor"];

#[derive(Debug, Parser, Clone)]
#[command(
    name = "textmenu-demo",
    about = "Review and override settings in an interactive text menu",
    version
)]
pub(crate) struct DemoConfig {
    /// Number of objects. The objects might be small, or round, or wet, or
    /// salty. They may not be made of paper or lead. If you insist, the objects
    /// might be imported from China, but not from Indonesia or France.
    #[arg(short = 'c', long, default_value_t = 1)]
    pub(crate) count: i64,

    /// Favorite Song
    #[arg(short = 's', long, default_value = "My country tis of thee")]
    pub(crate) favorite_song: String,

    /// Height in cm
    #[arg(short = 'H', long, default_value_t = 60.5)]
    pub(crate) height: f64,

    /// Really likes dogs
    #[arg(short = 'd', long)]
    pub(crate) loves_dogs: bool,

    /// Width of Menu interface in characters
    #[arg(short = 'w', long, default_value_t = 40)]
    pub(crate) wrap_width: i64,

    /// Favorite Color
    #[arg(short = 'C', long, default_value = "green")]
    pub(crate) color: String,

    /// TOML table of option values applied before the second session
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub(crate) overrides: Option<PathBuf>,

    /// Capture editor text line by line instead of launching $EDITOR
    #[arg(long, default_value_t = false)]
    pub(crate) line_editor: bool,

    #[command(flatten)]
    pub(crate) log: LogConfig,
}
