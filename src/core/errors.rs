//! CDR-prefixed error types with structured error codes.
//!
//! Only the harness itself reports errors. The faults a scenario provokes are
//! never represented here: they end the process before anything could be
//! converted into a value.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Top-level error type for the crash drill harness.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error("[CDR-1001] invalid scenario number: {raw} (valid options: {valid})")]
    InvalidSelection { raw: String, valid: String },

    #[error("[CDR-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[CDR-3002] IO failure while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("[CDR-3003] event log unavailable at {path}: {source}")]
    EventLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DrillError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSelection { .. } => "CDR-1001",
            Self::InvalidConfig { .. } => "CDR-1002",
            Self::Io { .. } => "CDR-3002",
            Self::EventLog { .. } => "CDR-3003",
        }
    }

    /// Process exit code contract for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidSelection { .. } | Self::InvalidConfig { .. } => 1,
            Self::Io { .. } | Self::EventLog { .. } => 2,
        }
    }

    /// Convenience constructor for console IO errors.
    #[must_use]
    pub const fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Convenience constructor for event log errors with a known path.
    #[must_use]
    pub fn event_log(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::EventLog {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
