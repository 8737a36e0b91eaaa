//! Raw-memory primitives every fault chain ends in.
//!
//! [`MemoryOps`] is the seam between a chain and the operation that actually
//! violates memory safety. [`RawMemory`] executes the primitives for real and
//! is what the harness runs by default. [`RecordingMemory`] intercepts them,
//! records what would have happened, and substitutes a bounded stand-in so a
//! chain can be walked end to end without faulting.
//!
//! Only this module and the chain modules that call through it allow `unsafe`.

#![allow(unsafe_code)]

use std::ffi::{CStr, c_char};
use std::fmt;

/// The three unchecked primitives the scenarios rely on.
///
/// None of the methods validate their arguments. Callers in this crate pass
/// arguments that break the stated contracts on purpose.
pub trait MemoryOps {
    /// Copy the NUL-terminated string at `src` into `dst`, ignoring `dst.len()`.
    ///
    /// # Safety
    ///
    /// `src` must be a valid C string and `dst` must have room for it,
    /// terminator included.
    unsafe fn copy_unbounded(&mut self, dst: &mut [u8], src: *const c_char);

    /// Read `seq[index]` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `seq.len()`.
    unsafe fn read_unchecked(&mut self, seq: &[i32], index: usize) -> i32;

    /// Store `value` through `cell` and read it back.
    ///
    /// # Safety
    ///
    /// `cell` must point to a live, writable `i32`.
    unsafe fn write_through(&mut self, cell: *mut i32, value: i32) -> i32;
}

/// Executes the primitives as written. Misuse faults or corrupts memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMemory;

impl MemoryOps for RawMemory {
    #[inline(never)]
    unsafe fn copy_unbounded(&mut self, dst: &mut [u8], src: *const c_char) {
        unsafe {
            libc::strcpy(dst.as_mut_ptr().cast::<c_char>(), src);
        }
    }

    #[inline(never)]
    unsafe fn read_unchecked(&mut self, seq: &[i32], index: usize) -> i32 {
        unsafe { seq.as_ptr().add(index).read_volatile() }
    }

    #[inline(never)]
    unsafe fn write_through(&mut self, cell: *mut i32, value: i32) -> i32 {
        unsafe {
            cell.write_volatile(value);
            cell.read_volatile()
        }
    }
}

/// One intercepted primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryOp {
    /// `copy_unbounded` call. `src_len` is `None` when the source was absent.
    UnboundedCopy {
        /// Capacity of the destination buffer.
        dst_len: usize,
        /// Source length without its terminator.
        src_len: Option<usize>,
    },
    /// `read_unchecked` call against a sequence of `len` elements.
    UncheckedRead {
        /// Elements in the sequence.
        len: usize,
        /// Requested position.
        index: usize,
    },
    /// `write_through` call.
    DanglingWrite {
        /// Value stored through the cell.
        value: i32,
    },
}

impl MemoryOp {
    /// Whether the real primitive would have violated its contract.
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        match *self {
            Self::UnboundedCopy { dst_len, src_len } => match src_len {
                None => true,
                Some(n) => n >= dst_len,
            },
            Self::UncheckedRead { len, index } => index >= len,
            // The only caller writes through a pointer whose scope has ended.
            Self::DanglingWrite { .. } => true,
        }
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedCopy {
                dst_len,
                src_len: None,
            } => write!(f, "unbounded copy of an absent string into {dst_len} bytes"),
            Self::UnboundedCopy {
                dst_len,
                src_len: Some(n),
            } => write!(f, "unbounded copy of {} bytes into {dst_len} bytes", n + 1),
            Self::UncheckedRead { len, index } => {
                write!(f, "unchecked read at index {index} of {len} elements")
            }
            Self::DanglingWrite { value } => {
                write!(f, "write of {value} through an out-of-scope reference")
            }
        }
    }
}

/// Records every primitive call and performs a bounded stand-in instead.
#[derive(Debug, Default, Clone)]
pub struct RecordingMemory {
    ops: Vec<MemoryOp>,
}

impl RecordingMemory {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercepted calls, in the order the chain made them.
    #[must_use]
    pub fn ops(&self) -> &[MemoryOp] {
        &self.ops
    }

    /// Calls that would have faulted or corrupted memory under [`RawMemory`].
    pub fn violations(&self) -> impl Iterator<Item = &MemoryOp> {
        self.ops.iter().filter(|op| op.is_violation())
    }
}

impl MemoryOps for RecordingMemory {
    unsafe fn copy_unbounded(&mut self, dst: &mut [u8], src: *const c_char) {
        if src.is_null() {
            self.ops.push(MemoryOp::UnboundedCopy {
                dst_len: dst.len(),
                src_len: None,
            });
            return;
        }
        let bytes = unsafe { CStr::from_ptr(src) }.to_bytes();
        self.ops.push(MemoryOp::UnboundedCopy {
            dst_len: dst.len(),
            src_len: Some(bytes.len()),
        });
        if dst.is_empty() {
            return;
        }
        let n = bytes.len().min(dst.len() - 1);
        dst[..n].copy_from_slice(&bytes[..n]);
        dst[n] = 0;
    }

    unsafe fn read_unchecked(&mut self, seq: &[i32], index: usize) -> i32 {
        self.ops.push(MemoryOp::UncheckedRead {
            len: seq.len(),
            index,
        });
        seq.get(index).copied().unwrap_or_default()
    }

    unsafe fn write_through(&mut self, _cell: *mut i32, value: i32) -> i32 {
        self.ops.push(MemoryOp::DanglingWrite { value });
        value
    }
}

/// Captures the call stack at every primitive, then defers to [`RecordingMemory`].
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FrameCapture {
    inner: RecordingMemory,
    traces: Vec<String>,
}

#[cfg(test)]
impl FrameCapture {
    /// One rendered backtrace per primitive call, in call order.
    pub(crate) fn traces(&self) -> &[String] {
        &self.traces
    }

    fn capture(&mut self) {
        self.traces
            .push(std::backtrace::Backtrace::force_capture().to_string());
    }
}

#[cfg(test)]
impl MemoryOps for FrameCapture {
    #[inline(never)]
    unsafe fn copy_unbounded(&mut self, dst: &mut [u8], src: *const c_char) {
        self.capture();
        unsafe { self.inner.copy_unbounded(dst, src) }
    }

    #[inline(never)]
    unsafe fn read_unchecked(&mut self, seq: &[i32], index: usize) -> i32 {
        self.capture();
        unsafe { self.inner.read_unchecked(seq, index) }
    }

    #[inline(never)]
    unsafe fn write_through(&mut self, cell: *mut i32, value: i32) -> i32 {
        self.capture();
        unsafe { self.inner.write_through(cell, value) }
    }
}
