//! Dispatcher: turns a selection into a scenario run.
//!
//! Interactive mode is an explicit state machine
//! (`Idle → AwaitingSelection → Dispatching → Completed | Finished`). A
//! scenario that faults never hands control back, so there is no state for it.

pub mod menu;

use std::io::{BufRead, Write};

use crate::core::config::{DrillConfig, RunMode};
use crate::core::errors::{DrillError, Result};
use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use crate::scenarios::ScenarioContext;
use crate::scenarios::memory::{MemoryOp, MemoryOps, RawMemory, RecordingMemory};
use crate::scenarios::registry::{Scenario, ScenarioRegistry};

/// Printed when a scenario returns instead of faulting.
pub const SURVIVED_MESSAGE: &str = "If you see this, the crash didn't happen!";
/// Printed for an unusable interactive selection.
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please try again.";

/// A parsed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `0`: leave the loop.
    Exit,
    /// A registered scenario id.
    Scenario(u32),
    /// Anything else, trimmed.
    Invalid(String),
}

/// Parse one line of user input against the registry.
#[must_use]
pub fn parse_selection(raw: &str, registry: &ScenarioRegistry) -> Selection {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(0) => Selection::Exit,
        Ok(n) => u32::try_from(n)
            .ok()
            .filter(|id| registry.get(*id).is_some())
            .map_or_else(|| Selection::Invalid(trimmed.to_string()), Selection::Scenario),
        Err(_) => Selection::Invalid(trimmed.to_string()),
    }
}

/// Interactive loop states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillState {
    /// Nothing has happened yet; the session start is still unlogged.
    Idle,
    /// Menu shown, waiting for a line of input.
    AwaitingSelection,
    /// A selection was read and is about to be acted on.
    Dispatching(Selection),
    /// The scenario with this id returned without faulting.
    Completed(u32),
    /// Exit requested or input exhausted.
    Finished,
}

/// Runs scenarios from a borrowed, read-only registry.
pub struct Dispatcher<'r> {
    registry: &'r ScenarioRegistry,
    events: JsonlWriter,
    rehearse: bool,
    verbose: bool,
}

impl<'r> Dispatcher<'r> {
    /// Build a dispatcher, opening the event log if one is configured.
    pub fn new(registry: &'r ScenarioRegistry, config: &DrillConfig) -> Self {
        let events = config
            .event_log
            .as_ref()
            .map_or_else(JsonlWriter::disabled, JsonlWriter::open);
        Self {
            registry,
            events,
            rehearse: config.rehearse,
            verbose: config.is_verbose(),
        }
    }

    /// Non-interactive mode: run the scenario named by `raw` once.
    ///
    /// `0` is not an exit request here; it is invalid like any unknown id.
    pub fn run_direct(&mut self, raw: &str, out: &mut dyn Write) -> Result<()> {
        self.log_session(EventType::SessionStart, &RunMode::Direct(raw.to_string()));
        let trimmed = raw.trim();
        writeln!(out, "\nRunning scenario {trimmed}...")
            .map_err(|e| DrillError::io("writing output", e))?;

        match parse_selection(trimmed, self.registry) {
            Selection::Scenario(id) => {
                self.dispatch(id, out)?;
                writeln!(out, "{SURVIVED_MESSAGE}")
                    .map_err(|e| DrillError::io("writing output", e))?;
                self.log_session(EventType::SessionEnd, &RunMode::Direct(raw.to_string()));
                Ok(())
            }
            Selection::Exit | Selection::Invalid(_) => {
                self.log_invalid(trimmed);
                Err(DrillError::InvalidSelection {
                    raw: trimmed.to_string(),
                    valid: self.registry.valid_options(),
                })
            }
        }
    }

    /// Interactive mode: menu, read a line, dispatch, repeat until `0` or end of input.
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R, out: &mut dyn Write) -> Result<()> {
        let mut state = DrillState::Idle;
        let mut line = String::new();
        loop {
            state = match state {
                DrillState::Idle => {
                    self.log_session(EventType::SessionStart, &RunMode::Interactive);
                    DrillState::AwaitingSelection
                }
                DrillState::AwaitingSelection => {
                    menu::render_menu(self.registry, out)
                        .map_err(|e| DrillError::io("writing menu", e))?;
                    line.clear();
                    let read = input
                        .read_line(&mut line)
                        .map_err(|e| DrillError::io("reading selection", e))?;
                    if read == 0 {
                        // End of input behaves like choosing 0.
                        writeln!(out).map_err(|e| DrillError::io("writing output", e))?;
                        DrillState::Dispatching(Selection::Exit)
                    } else {
                        DrillState::Dispatching(parse_selection(&line, self.registry))
                    }
                }
                DrillState::Dispatching(Selection::Exit) => {
                    writeln!(out, "Exiting...").map_err(|e| DrillError::io("writing output", e))?;
                    DrillState::Finished
                }
                DrillState::Dispatching(Selection::Invalid(raw)) => {
                    self.log_invalid(&raw);
                    writeln!(out, "{INVALID_CHOICE_MESSAGE}")
                        .map_err(|e| DrillError::io("writing output", e))?;
                    DrillState::AwaitingSelection
                }
                DrillState::Dispatching(Selection::Scenario(id)) => {
                    writeln!(out).map_err(|e| DrillError::io("writing output", e))?;
                    self.dispatch(id, out)?;
                    DrillState::Completed(id)
                }
                DrillState::Completed(_) => {
                    writeln!(out, "{SURVIVED_MESSAGE}")
                        .map_err(|e| DrillError::io("writing output", e))?;
                    DrillState::AwaitingSelection
                }
                DrillState::Finished => {
                    self.log_session(EventType::SessionEnd, &RunMode::Interactive);
                    return Ok(());
                }
            };
        }
    }

    /// Run scenario `id` synchronously. Returns only if the scenario did.
    pub fn dispatch(&mut self, id: u32, out: &mut dyn Write) -> Result<()> {
        let registry = self.registry;
        let scenario = registry
            .get(id)
            .ok_or_else(|| DrillError::InvalidSelection {
                raw: id.to_string(),
                valid: registry.valid_options(),
            })?;

        self.events.write_entry(
            &LogEntry::new(EventType::ScenarioStart, Severity::Info)
                .with_scenario(id)
                .with_rehearsal(self.rehearse),
        );
        if self.verbose {
            eprintln!("crashdrill: scenario {id} chain: {}", scenario.chain_label());
        }
        writeln!(out, "{}", scenario.banner).map_err(|e| DrillError::io("writing output", e))?;

        if self.rehearse {
            let mut memory = RecordingMemory::new();
            run_scenario(scenario, &mut memory, out)?;
            report_rehearsal(memory.ops(), out).map_err(|e| DrillError::io("writing output", e))?;
        } else {
            let mut memory = RawMemory;
            run_scenario(scenario, &mut memory, out)?;
        }

        self.events.write_entry(
            &LogEntry::new(EventType::ScenarioComplete, Severity::Info)
                .with_scenario(id)
                .with_rehearsal(self.rehearse),
        );
        Ok(())
    }

    fn log_invalid(&mut self, raw: &str) {
        if self.verbose {
            eprintln!("crashdrill: rejected selection {raw:?}");
        }
        self.events.write_entry(
            &LogEntry::new(EventType::InvalidSelection, Severity::Warning)
                .with_selection(raw)
                .with_details(format!("valid options: {}", self.registry.valid_options())),
        );
    }

    fn log_session(&mut self, event: EventType, mode: &RunMode) {
        self.events.write_entry(
            &LogEntry::new(event, Severity::Info)
                .with_mode(mode.label())
                .with_rehearsal(self.rehearse),
        );
    }
}

fn run_scenario(scenario: &Scenario, memory: &mut dyn MemoryOps, out: &mut dyn Write) -> Result<()> {
    let mut ctx = ScenarioContext::new(memory, out);
    scenario
        .run(&mut ctx)
        .map_err(|e| DrillError::io("writing scenario output", e))
}

/// List the intercepted primitive calls after a rehearsal.
fn report_rehearsal(ops: &[MemoryOp], out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Rehearsal: intercepted {} primitive call(s)", ops.len())?;
    for op in ops {
        let tag = if op.is_violation() { "fault" } else { "ok" };
        writeln!(out, "  [{tag}] {op}")?;
    }
    Ok(())
}
