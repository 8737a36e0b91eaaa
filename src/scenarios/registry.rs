//! Scenario registry: identifier → chain, built once and read-only afterwards.

#![allow(missing_docs)]

use std::io;

use super::ScenarioContext;
use super::bounds::calculate_score;
use super::corruption::validate_config;
use super::fixtures::{FAULTING_USER_ID, MISSING_USER_ID};
use super::null_deref::run_null_deref_scenario;

/// Entry point the dispatcher calls for a scenario.
pub type Trigger = fn(&mut ScenarioContext<'_>) -> io::Result<()>;

/// One registered fault scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: u32,
    /// Menu label.
    pub name: &'static str,
    /// Line printed right before the trigger runs.
    pub banner: &'static str,
    pub description: &'static str,
    /// Frames from the entry point down to the faulting primitive.
    pub chain: &'static [&'static str],
    pub trigger: Trigger,
}

impl Scenario {
    /// Run the scenario. Only returns if it did not fault.
    pub fn run(&self, ctx: &mut ScenarioContext<'_>) -> io::Result<()> {
        (self.trigger)(ctx)
    }

    /// Call chain rendered as `a -> b -> c`.
    #[must_use]
    pub fn chain_label(&self) -> String {
        self.chain.join(" -> ")
    }
}

fn trigger_null_deref(ctx: &mut ScenarioContext<'_>) -> io::Result<()> {
    run_null_deref_scenario(ctx, MISSING_USER_ID)
}

fn trigger_bounds(ctx: &mut ScenarioContext<'_>) -> io::Result<()> {
    calculate_score(ctx, FAULTING_USER_ID)
}

/// Ordered, immutable set of scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    /// The three built-in scenarios, ids 1 to 3.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                Scenario {
                    id: 1,
                    name: "NULL pointer dereference",
                    banner: "Triggering NULL pointer dereference...",
                    description: "Missing user id 999 yields an absent name that is copied \
                                  into a stack buffer without a check.",
                    chain: &[
                        "run_null_deref_scenario",
                        "process_user_data",
                        "format_username",
                        "copy_unbounded",
                        "strcpy",
                    ],
                    trigger: trigger_null_deref,
                },
                Scenario {
                    id: 2,
                    name: "Array out of bounds",
                    banner: "Triggering array out of bounds...",
                    description: "User id 150 derives index 10 into a five-element score table.",
                    chain: &[
                        "calculate_score",
                        "process_scores",
                        "calculate_bonus",
                        "read_unchecked",
                    ],
                    trigger: trigger_bounds,
                },
                Scenario {
                    id: 3,
                    name: "Buffer overflow / Stack corruption",
                    banner: "Triggering buffer overflow...",
                    description: "An oversized override overruns a 10-byte stack buffer, then a \
                                  write goes through a reference to an out-of-scope local.",
                    chain: &[
                        "validate_config",
                        "stage_override",
                        "copy_unbounded",
                        "strcpy",
                        "apply_configuration",
                        "write_through",
                    ],
                    trigger: validate_config,
                },
            ],
        }
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.scenarios.iter().map(|s| s.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Valid ids joined for error messages, e.g. `1, 2, 3`.
    #[must_use]
    pub fn valid_options(&self) -> String {
        self.ids()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
