//! JSONL session log: one self-contained JSON object per line.
//!
//! Every line is assembled in memory and written with a single `write_all`
//! straight to the file, with no buffering in between. A scenario that faults
//! takes the process down without unwinding, so anything still sitting in a
//! buffer would be lost; an unmatched `scenario_start` is the only trace a
//! fault leaves.
//!
//! Degradation chain:
//! 1. Primary file path
//! 2. stderr with `[CDR-JSONL]` prefix
//! 3. Silent discard (logging never stops a drill)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DrillError, Result};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Session events the dispatcher emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStart,
    ScenarioStart,
    ScenarioComplete,
    InvalidSelection,
    SessionEnd,
}

/// A single JSONL log entry — all fields optional except `ts`, `event`, `severity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// Scenario id involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<u32>,
    /// Raw selection text as typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    /// `direct`, `interactive` or `list`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Whether the primitives were intercepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehearsal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            scenario: None,
            selection: None,
            mode: None,
            rehearsal: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_scenario(mut self, id: u32) -> Self {
        self.scenario = Some(id);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, raw: impl Into<String>) -> Self {
        self.selection = Some(raw.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn with_rehearsal(mut self, rehearsal: bool) -> Self {
        self.rehearsal = Some(rehearsal);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Degradation state of the JSONL writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Stderr,
    Discard,
}

/// Append-only JSONL log writer.
#[derive(Debug)]
pub struct JsonlWriter {
    file: Option<File>,
    state: WriterState,
    lines_written: u64,
}

impl JsonlWriter {
    /// Open `path` for appending, degrading to stderr if that fails.
    pub fn open(path: impl AsRef<Path>) -> Self {
        match open_append(path.as_ref()) {
            Ok(file) => Self {
                file: Some(file),
                state: WriterState::Normal,
                lines_written: 0,
            },
            Err(e) => {
                let _ = writeln!(io::stderr(), "[CDR-JSONL] {e}, using stderr");
                Self {
                    file: None,
                    state: WriterState::Stderr,
                    lines_written: 0,
                }
            }
        }
    }

    /// A writer that drops everything. Used when no event log is configured.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            file: None,
            state: WriterState::Discard,
            lines_written: 0,
        }
    }

    /// Write a single log entry as one JSONL line.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        if self.state == WriterState::Discard {
            return;
        }
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[CDR-JSONL] serialize error: {e}");
                return;
            }
        };
        self.write_line(&line);
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    /// Lines successfully appended to the file.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn write_line(&mut self, line: &str) {
        match self.state {
            WriterState::Normal => {
                let written = self
                    .file
                    .as_mut()
                    .is_some_and(|f| f.write_all(line.as_bytes()).is_ok());
                if written {
                    self.lines_written += 1;
                } else {
                    self.degrade();
                    self.write_line(line);
                }
            }
            WriterState::Stderr => {
                if write!(io::stderr(), "[CDR-JSONL] {line}").is_err() {
                    self.degrade();
                }
            }
            WriterState::Discard => {}
        }
    }

    fn degrade(&mut self) {
        self.file = None;
        self.state = match self.state {
            WriterState::Normal => {
                let _ = writeln!(io::stderr(), "[CDR-JSONL] event log write failed, using stderr");
                WriterState::Stderr
            }
            WriterState::Stderr | WriterState::Discard => WriterState::Discard,
        };
    }
}

/// Open or create a file for appending, creating its parent directory.
fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DrillError::event_log(parent, source))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DrillError::event_log(path, source))
}

/// Format current UTC time as ISO 8601.
fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
