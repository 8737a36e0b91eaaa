//! Fault scenarios: call chains that end in an unchecked memory primitive.
//!
//! Each chain reads like ordinary application code and reaches its fault at
//! least two frames below its public entry point, so the crash site and the
//! root cause sit in different frames of the backtrace.

use std::io::Write;

pub mod bounds;
pub mod corruption;
pub mod fixtures;
pub mod memory;
pub mod null_deref;
pub mod registry;

use memory::MemoryOps;

/// Everything a chain needs: the primitive seam and somewhere to print.
pub struct ScenarioContext<'a> {
    /// Where the chain's final unchecked operation is sent.
    pub memory: &'a mut dyn MemoryOps,
    /// Progress messages.
    pub out: &'a mut dyn Write,
}

impl<'a> ScenarioContext<'a> {
    /// Bundle a primitive seam with an output sink.
    pub fn new(memory: &'a mut dyn MemoryOps, out: &'a mut dyn Write) -> Self {
        Self { memory, out }
    }
}
