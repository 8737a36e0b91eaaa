//! Scenario 3: stack overflow copy followed by a write through a dangling reference.
//!
//! `validate_config` needs no input and always goes wrong twice. First
//! `stage_override` copies an oversized string into a 10-byte stack buffer,
//! which can clobber its saved registers or return address. Then
//! `apply_configuration` writes through a pointer to a local whose scope has
//! already ended. Whichever manifests first depends on the stack layout.

#![allow(unsafe_code)]

use std::io;
use std::ptr;

use super::ScenarioContext;
use super::fixtures::{APPLIED_CONFIG_VALUE, OVERRIDE_PAYLOAD, SETTING_BUFFER_LEN, VALIDATED_SETTING};

/// Check that a setting is present.
#[inline(never)]
#[must_use]
pub fn validate_setting(setting: Option<&str>) -> bool {
    setting.is_some()
}

#[inline(never)]
fn stage_override(ctx: &mut ScenarioContext<'_>) {
    let mut buffer = [0u8; SETTING_BUFFER_LEN];
    // FAULT: payload is longer than `buffer`.
    unsafe { ctx.memory.copy_unbounded(&mut buffer, OVERRIDE_PAYLOAD.as_ptr()) };
}

#[inline(never)]
fn apply_configuration(ctx: &mut ScenarioContext<'_>, config_cell: *mut i32) -> io::Result<()> {
    // FAULT: `config_cell` outlived the value it points to.
    let applied = unsafe { ctx.memory.write_through(config_cell, APPLIED_CONFIG_VALUE) };
    writeln!(ctx.out, "Configuration applied: {applied}")
}

/// Validate and apply the configuration.
#[inline(never)]
pub fn validate_config(ctx: &mut ScenarioContext<'_>) -> io::Result<()> {
    writeln!(ctx.out, "Validating configuration...")?;

    let config_cell: *mut i32 = {
        let mut local_config = 0i32;
        ptr::addr_of_mut!(local_config)
    };

    let _ = validate_setting(Some(VALIDATED_SETTING));

    stage_override(ctx);
    apply_configuration(ctx, config_cell)?;

    writeln!(ctx.out, "Configuration validated")
}
