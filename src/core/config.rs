//! Run configuration assembled from command-line flags.
//!
//! There is no configuration file and no environment override: every knob
//! arrives through the CLI and is validated once before dispatch.

#![allow(missing_docs)]

use std::path::PathBuf;

use crate::core::errors::{DrillError, Result};

/// How the dispatcher obtains its selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Run exactly one scenario named by a command-line argument.
    Direct(String),
    /// Prompt repeatedly on stdin.
    Interactive,
    /// Print the registry and exit.
    List,
}

impl RunMode {
    /// Short label used in event log entries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Interactive => "interactive",
            Self::List => "list",
        }
    }
}

/// Diagnostic chattiness on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Full harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillConfig {
    pub mode: RunMode,
    pub verbosity: Verbosity,
    /// Intercept the raw-memory primitives instead of executing them.
    pub rehearse: bool,
    /// Emit ANSI colour on the menu and diagnostics.
    pub color: bool,
    /// Append JSONL session events to this file.
    pub event_log: Option<PathBuf>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Interactive,
            verbosity: Verbosity::Normal,
            rehearse: false,
            color: true,
            event_log: None,
        }
    }
}

impl DrillConfig {
    /// Reject combinations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.event_log {
            if path.as_os_str().is_empty() {
                return Err(DrillError::InvalidConfig {
                    details: "event log path must not be empty".to_string(),
                });
            }
            if path.is_dir() {
                return Err(DrillError::InvalidConfig {
                    details: format!("event log path {} is a directory", path.display()),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}
