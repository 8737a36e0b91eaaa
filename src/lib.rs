#![deny(unsafe_code)]

//! Crash Drill — a fault-injection harness for practising crash diagnosis.
//!
//! Each scenario looks like ordinary application code and deterministically
//! reaches one class of memory-safety violation a few frames below its entry
//! point, so the crash site sits away from the root cause:
//! 1. **Absent lookup result** copied without a null check
//! 2. **Derived index** read past the end of a fixed table
//! 3. **Stack buffer overrun** followed by a write through a dangling reference
//!
//! Faults are never caught or converted into errors. Run the binary under a
//! debugger, or swap in [`scenarios::memory::RecordingMemory`] to walk a chain
//! without executing the unsafe primitive.
//!
//! # Library usage
//!
//! ```rust,no_run
//! use crash_drill::prelude::*;
//!
//! let registry = ScenarioRegistry::builtin();
//! let mut memory = RecordingMemory::new();
//! let mut out = Vec::new();
//! let mut ctx = ScenarioContext::new(&mut memory, &mut out);
//! registry.get(2).unwrap().run(&mut ctx).unwrap();
//! ```

pub mod prelude;

pub mod core;
pub mod dispatch;
pub mod logger;
pub mod scenarios;
