//! Scenario 2: a derived index walks off the end of the score table.
//!
//! Ids up to `HIGH_USER_THRESHOLD` always land inside `SCORES`. Anything
//! above it selects `OUT_OF_RANGE_INDEX` and the read in `calculate_bonus`
//! goes past the array.

#![allow(unsafe_code)]

use std::io;

use super::ScenarioContext;
use super::fixtures::{HIGH_USER_THRESHOLD, OUT_OF_RANGE_INDEX, SCORE_SLOTS, SCORES};
use super::memory::MemoryOps;

/// Pick the score slot for a user.
#[inline(never)]
#[must_use]
pub fn derive_score_index(user_id: i32) -> usize {
    if user_id > HIGH_USER_THRESHOLD {
        OUT_OF_RANGE_INDEX
    } else {
        // rem_euclid keeps negative ids in range as well, so the conversion cannot fail.
        usize::try_from(user_id.rem_euclid(SCORE_SLOTS)).unwrap_or_default()
    }
}

/// Double the score at `index`.
#[inline(never)]
pub fn calculate_bonus(memory: &mut dyn MemoryOps, scores: &[i32], index: usize) -> i32 {
    // FAULT: no bounds check on `index`.
    let score = unsafe { memory.read_unchecked(scores, index) };
    score.wrapping_mul(2)
}

#[inline(never)]
fn process_scores(ctx: &mut ScenarioContext<'_>, user_id: i32) -> io::Result<i32> {
    let scores = SCORES;
    let index = derive_score_index(user_id);
    let bonus = calculate_bonus(ctx.memory, &scores, index);
    writeln!(ctx.out, "Bonus calculated: {bonus}")?;
    Ok(bonus)
}

/// Compute and print the bonus for `user_id`.
#[inline(never)]
pub fn calculate_score(ctx: &mut ScenarioContext<'_>, user_id: i32) -> io::Result<()> {
    writeln!(ctx.out, "Calculating score for user {user_id}")?;
    process_scores(ctx, user_id)?;
    writeln!(ctx.out, "Score calculation complete")
}
