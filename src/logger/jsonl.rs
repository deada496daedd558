//! JSONL activity log: one self-contained JSON object per line.
//!
//! Lines are assembled in memory and written with a single `write_all` so a
//! concurrent `tail -f` never sees a partial line.
//!
//! Fallback chain:
//! 1. Primary file path
//! 2. stderr with `[FOLIO-JSONL]` prefix, unless `stderr_fallback` is off
//!    (the interactive showcase owns the terminal)
//! 3. Silent discard (the showcase must never stop over logging)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions, rename};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{FolioError, Result};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStart,
    SessionStop,
    FilterChanged,
    ModalOpened,
    ModalClosed,
    ModalIgnored,
    SlideChanged,
    ThemeChanged,
    ContactPrepared,
    ContactRejected,
    Error,
}

/// A single activity line. Only `ts`, `event` and `severity` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// `browse`, `projects`, `contact`, ... for CLI-originated events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Active filter tag after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Project id opened, replaced, or rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Carousel index after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<usize>,
    /// Theme after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Number of visible items or failing fields, depending on event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Freeform details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    #[must_use]
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            source: None,
            filter: None,
            project_id: None,
            slide: None,
            theme: None,
            count: None,
            error_code: None,
            error_message: None,
            details: None,
        }
    }

    /// Shorthand for an `Info` entry.
    #[must_use]
    pub fn info(event: EventType) -> Self {
        Self::new(event, Severity::Info)
    }

    /// `Error` entry carrying a `FolioError`'s code and message.
    #[must_use]
    pub fn from_error(error: &FolioError) -> Self {
        let mut entry = Self::new(EventType::Error, Severity::Error);
        entry.error_code = Some(error.code().to_string());
        entry.error_message = Some(error.to_string());
        entry
    }

    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Degradation state of the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Stderr,
    Discard,
}

/// Writer configuration.
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    pub path: PathBuf,
    /// Rotate once the file would exceed this size. Default: 10 MiB.
    pub max_size_bytes: u64,
    /// Rotated files kept (`activity.jsonl.1` ...). Default: 3.
    pub max_rotated_files: u32,
    /// Degrade to stderr when the file fails. Off: go straight to discard
    /// without printing anything. Default: on.
    pub stderr_fallback: bool,
}

impl JsonlConfig {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size_bytes: 10 * 1024 * 1024,
            max_rotated_files: 3,
            stderr_fallback: true,
        }
    }
}

/// Append-only JSONL writer with rotation and degradation.
pub struct JsonlWriter {
    config: JsonlConfig,
    writer: Option<BufWriter<File>>,
    state: WriterState,
    bytes_written: u64,
}

impl JsonlWriter {
    /// Open the log file. Falls through the degradation chain on failure.
    #[must_use]
    pub fn open(config: JsonlConfig) -> Self {
        let mut w = Self {
            config,
            writer: None,
            state: WriterState::Discard,
            bytes_written: 0,
        };
        w.try_open_primary();
        w
    }

    /// Writer that drops everything; used when logging is not wanted.
    #[must_use]
    pub fn discard() -> Self {
        Self {
            config: JsonlConfig::new(PathBuf::new()),
            writer: None,
            state: WriterState::Discard,
            bytes_written: 0,
        }
    }

    /// Write a single entry as one line and flush it.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                if self.config.stderr_fallback {
                    let _ = writeln!(io::stderr(), "[FOLIO-JSONL] serialize error: {e}");
                }
                return;
            }
        };
        self.write_line(&line);
    }

    /// Current degradation state.
    #[must_use]
    pub const fn state(&self) -> &'static str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    /// Whether entries still reach the primary file.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.state != WriterState::Normal
    }

    /// Path of the primary log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // ──────────────────────── internals ────────────────────────

    fn write_line(&mut self, line: &str) {
        if self.state == WriterState::Normal
            && self.bytes_written + line.len() as u64 > self.config.max_size_bytes
        {
            self.rotate();
        }

        match self.state {
            WriterState::Normal => {
                let Some(w) = self.writer.as_mut() else {
                    self.degrade();
                    self.write_line(line);
                    return;
                };
                if w.write_all(line.as_bytes()).and_then(|()| w.flush()).is_err() {
                    self.degrade();
                    self.write_line(line);
                    return;
                }
                self.bytes_written += line.len() as u64;
            }
            WriterState::Stderr => {
                if write!(io::stderr(), "[FOLIO-JSONL] {line}").is_err() {
                    self.degrade();
                }
            }
            WriterState::Discard => {}
        }
    }

    fn try_open_primary(&mut self) {
        match open_append(&self.config.path) {
            Ok((file, size)) => {
                self.writer = Some(BufWriter::new(file));
                self.state = WriterState::Normal;
                self.bytes_written = size;
            }
            Err(e) if self.config.stderr_fallback => {
                self.state = WriterState::Stderr;
                let _ = writeln!(
                    io::stderr(),
                    "[FOLIO-JSONL] activity log unavailable ({e}), using stderr"
                );
            }
            Err(_) => self.state = WriterState::Discard,
        }
    }

    fn degrade(&mut self) {
        self.writer = None;
        self.state = match self.state {
            WriterState::Normal if self.config.stderr_fallback => {
                let _ = writeln!(io::stderr(), "[FOLIO-JSONL] write failed, using stderr");
                WriterState::Stderr
            }
            _ => WriterState::Discard,
        };
    }

    fn rotate(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
        self.writer = None;

        let base = self.config.path.clone();
        for i in (1..self.config.max_rotated_files).rev() {
            let _ = rename(rotated_name(&base, i), rotated_name(&base, i + 1));
        }
        let _ = rename(&base, rotated_name(&base, 1));

        match open_append(&base) {
            Ok((file, _)) => {
                self.writer = Some(BufWriter::new(file));
                self.bytes_written = 0;
            }
            Err(_) => self.degrade(),
        }
    }
}

// ──────────────────────── helpers ────────────────────────

/// Open or create a file for appending. Returns `(File, current_size)`.
fn open_append(path: &Path) -> Result<(File, u64)> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| FolioError::io(parent, source))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| FolioError::io(path, source))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);
    Ok((file, size))
}

/// `foo.jsonl` → `foo.jsonl.3`.
fn rotated_name(base: &Path, index: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ──────────────────────── tests ────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn entries_become_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let mut writer = JsonlWriter::open(JsonlConfig::new(&path));

        let mut entry = LogEntry::info(EventType::FilterChanged).with_source("browse");
        entry.filter = Some("ai".to_string());
        entry.count = Some(1);
        writer.write_entry(&entry);
        writer.write_entry(&LogEntry::info(EventType::SessionStop));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "filter_changed");
        assert_eq!(lines[0]["severity"], "info");
        assert_eq!(lines[0]["filter"], "ai");
        assert_eq!(lines[1]["event"], "session_stop");
    }

    #[test]
    fn unset_fields_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.jsonl");
        let mut writer = JsonlWriter::open(JsonlConfig::new(&path));
        writer.write_entry(&LogEntry::info(EventType::SessionStart));

        let line = fs::read_to_string(&path).unwrap();
        assert!(!line.contains("\"project_id\""));
        assert!(!line.contains("\"slide\""));
        assert!(line.contains("\"ts\""));
    }

    #[test]
    fn error_entries_carry_code() {
        let err = FolioError::Runtime {
            details: "boom".to_string(),
        };
        let entry = LogEntry::from_error(&err);
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.error_code.as_deref(), Some("FOLIO-3900"));
    }

    #[test]
    fn rotation_keeps_bounded_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rot.jsonl");
        let mut config = JsonlConfig::new(&path);
        config.max_size_bytes = 100;
        config.max_rotated_files = 2;
        let mut writer = JsonlWriter::open(config);

        for _ in 0..10 {
            writer.write_entry(&LogEntry::info(EventType::SlideChanged));
        }

        assert!(path.exists());
        assert!(rotated_name(&path, 1).exists());
        assert!(rotated_name(&path, 2).exists());
        assert!(!rotated_name(&path, 3).exists());
    }

    #[test]
    fn unwritable_primary_degrades_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();
        let writer = JsonlWriter::open(JsonlConfig::new(blocker.join("activity.jsonl")));
        assert_eq!(writer.state(), "stderr");
    }

    #[test]
    fn quiet_writer_discards_instead_of_using_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();
        let mut config = JsonlConfig::new(blocker.join("activity.jsonl"));
        config.stderr_fallback = false;

        let mut writer = JsonlWriter::open(config);
        assert_eq!(writer.state(), "discard");
        assert!(writer.is_degraded());
        writer.write_entry(&LogEntry::info(EventType::FilterChanged));
        assert_eq!(writer.state(), "discard");
    }

    #[test]
    fn healthy_writer_is_not_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonlWriter::open(JsonlConfig::new(dir.path().join("ok.jsonl")));
        assert!(!writer.is_degraded());
    }

    #[test]
    fn discard_writer_drops_silently() {
        let mut writer = JsonlWriter::discard();
        writer.write_entry(&LogEntry::info(EventType::ThemeChanged));
        assert_eq!(writer.state(), "discard");
    }
}
