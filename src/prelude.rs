//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use crash_drill::prelude::*;
//! ```

// Core
pub use crate::core::config::{DrillConfig, RunMode, Verbosity};
pub use crate::core::errors::{DrillError, Result};

// Scenarios
pub use crate::scenarios::ScenarioContext;
pub use crate::scenarios::memory::{MemoryOp, MemoryOps, RawMemory, RecordingMemory};
pub use crate::scenarios::registry::{Scenario, ScenarioRegistry};

// Dispatch
pub use crate::dispatch::{Dispatcher, DrillState, Selection, parse_selection};

// Logging
pub use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
