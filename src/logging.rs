//! Plain-text debug log kept in a file so it never mixes with menu output.
//!
//! Two verbosity gates: control events (`log_debug`) and lines that echo what
//! the user typed (`log_debug_content`). When the file passes its size cap it
//! is moved to `<name>.1` and a fresh file is started.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::LogConfig;

const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

const LEVEL_OFF: u8 = 0;
const LEVEL_EVENTS: u8 = 1;
const LEVEL_CONTENT: u8 = 2;

static LEVEL: AtomicU8 = AtomicU8::new(LEVEL_OFF);
static SINK: Mutex<Option<DebugLog>> = Mutex::new(None);

/// Debug log location (`TEXTMENU_LOG` overrides the temp-dir default).
#[must_use]
pub fn log_file_path() -> PathBuf {
    match env::var_os("TEXTMENU_LOG") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => env::temp_dir().join("textmenu.log"),
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".1");
    path.with_file_name(name)
}

struct DebugLog {
    path: PathBuf,
    file: File,
    cap: u64,
    len: u64,
}

impl DebugLog {
    fn open(path: PathBuf, cap: u64) -> Option<Self> {
        if fs::metadata(&path).is_ok_and(|meta| meta.len() >= cap) {
            let _ = fs::rename(&path, backup_path(&path));
        }
        let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
        let len = file.metadata().map(|meta| meta.len()).unwrap_or(0);
        Some(Self {
            path,
            file,
            cap,
            len,
        })
    }

    fn roll_over(&mut self) {
        let _ = fs::rename(&self.path, backup_path(&self.path));
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
        {
            self.file = file;
            self.len = 0;
        }
    }

    fn append(&mut self, line: &str) {
        let size = line.len() as u64;
        if self.len > 0 && self.len + size > self.cap {
            self.roll_over();
        }
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.len += size;
        }
    }
}

fn set_level(level: u8) {
    LEVEL.store(level, Ordering::Relaxed);
    let mut sink = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *sink = if level == LEVEL_OFF {
        None
    } else {
        DebugLog::open(log_file_path(), MAX_LOG_BYTES)
    };
}

/// Turn the debug log on or off from the parsed logging flags.
pub fn init_logging(config: &LogConfig) {
    let level = if config.content_enabled() {
        LEVEL_CONTENT
    } else if config.enabled() {
        LEVEL_EVENTS
    } else {
        LEVEL_OFF
    };
    set_level(level);
}

fn write_entry(msg: &str) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let line = format!("[{}.{:03}] {msg}\n", now.as_secs(), now.subsec_millis());
    let mut sink = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(log) = sink.as_mut() {
        log.append(&line);
    }
}

/// Record a control event (selection, quit, editor launch).
pub fn log_debug(msg: &str) {
    if LEVEL.load(Ordering::Relaxed) >= LEVEL_EVENTS {
        write_entry(msg);
    }
}

/// Record a line that includes user-entered values; needs `--log-content`.
pub fn log_debug_content(msg: &str) {
    if LEVEL.load(Ordering::Relaxed) >= LEVEL_CONTENT {
        write_entry(msg);
    }
}
