//! Synthetic domain data that motivates each chain.

use std::ffi::CStr;

/// Name returned for every user the lookup knows about.
pub const KNOWN_USER_NAME: &CStr = c"John Doe";

/// User id the lookup treats as "not found".
pub const MISSING_USER_ID: i32 = 999;

/// Fixed score table, identical for every invocation.
pub const SCORES: [i32; 5] = [10, 20, 30, 40, 50];

/// Number of entries in `SCORES`, as the id arithmetic sees it.
pub const SCORE_SLOTS: i32 = 5;

/// Ids above this value take the "premium" index path.
pub const HIGH_USER_THRESHOLD: i32 = 100;

/// Index chosen for premium users. Outside `SCORES`.
pub const OUT_OF_RANGE_INDEX: usize = 10;

/// User id the registered bounds scenario is triggered with.
pub const FAULTING_USER_ID: i32 = 150;

/// Capacity of the username formatting buffer.
pub const NAME_BUFFER_LEN: usize = 100;

/// Capacity of the setting staging buffer.
pub const SETTING_BUFFER_LEN: usize = 10;

/// Override text copied into the staging buffer. Longer than `SETTING_BUFFER_LEN`.
pub const OVERRIDE_PAYLOAD: &CStr = c"This is a very long string that will overflow the buffer";

/// Setting handed to the validator.
pub const VALIDATED_SETTING: &str = "test";

/// Value written into the config cell.
pub const APPLIED_CONFIG_VALUE: i32 = 123;

const _: () = assert!(SCORES.len() == 5);
const _: () = assert!(OUT_OF_RANGE_INDEX >= SCORES.len());
const _: () = assert!(FAULTING_USER_ID > HIGH_USER_THRESHOLD);
const _: () = assert!(OVERRIDE_PAYLOAD.to_bytes().len() > SETTING_BUFFER_LEN);
const _: () = assert!(KNOWN_USER_NAME.to_bytes_with_nul().len() <= NAME_BUFFER_LEN);
