//! Scenario 1: an absent lookup result is dereferenced two frames later.
//!
//! `lookup_user` documents that it can come back empty. Nothing downstream
//! honours that: `process_user_data` forwards whatever it is given and
//! `format_username` copies it straight into a stack buffer.

#![allow(unsafe_code)]

use std::ffi::{CStr, c_char};
use std::io;
use std::ptr;

use super::ScenarioContext;
use super::fixtures::{KNOWN_USER_NAME, MISSING_USER_ID, NAME_BUFFER_LEN};

/// Look up a user's display name.
///
/// Returns `None` when the user does not exist (`MISSING_USER_ID`).
#[inline(never)]
#[must_use]
pub fn lookup_user(user_id: i32) -> Option<&'static CStr> {
    if user_id == MISSING_USER_ID {
        return None;
    }
    Some(KNOWN_USER_NAME)
}

/// Copy the name into a fixed buffer and print it.
#[inline(never)]
fn format_username(ctx: &mut ScenarioContext<'_>, name: Option<&CStr>) -> io::Result<()> {
    let mut buffer = [0u8; NAME_BUFFER_LEN];
    let src: *const c_char = name.map_or(ptr::null(), CStr::as_ptr);
    // FAULT: `src` is null when the lookup came back empty.
    unsafe { ctx.memory.copy_unbounded(&mut buffer, src) };
    let formatted = CStr::from_bytes_until_nul(&buffer)
        .map_or_else(|_| String::from_utf8_lossy(&buffer), CStr::to_string_lossy);
    writeln!(ctx.out, "Formatted name: {formatted}")
}

/// Process a possibly-absent username.
#[inline(never)]
pub fn process_user_data(ctx: &mut ScenarioContext<'_>, name: Option<&CStr>) -> io::Result<()> {
    writeln!(ctx.out, "Processing user data...")?;
    format_username(ctx, name)?;
    writeln!(ctx.out, "User data processed successfully")
}

/// Look a user up and process whatever came back.
#[inline(never)]
pub fn run_null_deref_scenario(ctx: &mut ScenarioContext<'_>, user_id: i32) -> io::Result<()> {
    let name = lookup_user(user_id);
    process_user_data(ctx, name)
}
