//! JSON trace events for menu sessions (start, option updates, exit).

use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_subscriber::fmt::time::UtcTime;

use crate::config::LogConfig;
use crate::logging::log_file_path;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Trace file location: `TEXTMENU_TRACE_LOG`, else next to the debug log.
pub(crate) fn trace_file_path() -> PathBuf {
    match env::var_os("TEXTMENU_TRACE_LOG") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => log_file_path().with_file_name("textmenu_trace.jsonl"),
    }
}

fn open_trace_file() -> Option<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(trace_file_path())
        .ok()
}

fn install_once(config: &LogConfig, once: &OnceLock<()>) {
    if !config.enabled() {
        return;
    }
    once.get_or_init(|| {
        let Some(file) = open_trace_file() else {
            return;
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(false)
            .with_target(false)
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Send `tracing` events to the JSON trace file when logging is enabled.
///
/// Only the first enabled call installs a subscriber.
pub fn init_tracing(config: &LogConfig) {
    install_once(config, &TRACING_INIT);
}
