//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::{Colorize, control};

use crash_drill::core::config::{DrillConfig, RunMode, Verbosity};
use crash_drill::core::errors::{DrillError, Result};
use crash_drill::dispatch::{Dispatcher, menu};
use crash_drill::scenarios::registry::ScenarioRegistry;

/// Crash Drill — deliberately provokes memory faults for debugger practice.
#[derive(Debug, Parser)]
#[command(
    name = "crashdrill",
    author,
    version,
    about = "Crash Drill - memory fault scenarios for debugger practice",
    long_about = None
)]
pub struct Cli {
    /// Scenario to run directly (1, 2 or 3). Omit for the interactive menu.
    #[arg(value_name = "SCENARIO", allow_negative_numbers = true, conflicts_with = "list")]
    scenario: Option<String>,
    /// Print the registered scenarios with their call chains and exit.
    #[arg(long)]
    list: bool,
    /// Intercept the unsafe primitives and report what they would have done.
    #[arg(long)]
    rehearse: bool,
    /// Append JSONL session events to this file.
    #[arg(long, value_name = "PATH")]
    event_log: Option<PathBuf>,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Print call chains and rejected selections on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Skip the startup banner.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn to_config(&self) -> DrillConfig {
        let mode = if self.list {
            RunMode::List
        } else if let Some(raw) = &self.scenario {
            RunMode::Direct(raw.clone())
        } else {
            RunMode::Interactive
        };
        let verbosity = if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };
        DrillConfig {
            mode,
            verbosity,
            rehearse: self.rehearse,
            color: !self.no_color && io::stdout().is_terminal(),
            event_log: self.event_log.clone(),
        }
    }
}

/// Dispatch according to the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config();
    if !config.color {
        control::set_override(false);
    }
    config.validate()?;

    let registry = ScenarioRegistry::builtin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.mode {
        RunMode::List => {
            writeln!(out, "{}", "Registered scenarios".bold())
                .map_err(|e| DrillError::io("writing output", e))?;
            menu::render_listing(&registry, &mut out)
                .map_err(|e| DrillError::io("writing output", e))?;
        }
        RunMode::Direct(raw) => {
            print_banner(&config, &mut out)?;
            let mut dispatcher = Dispatcher::new(&registry, &config);
            dispatcher.run_direct(raw, &mut out)?;
        }
        RunMode::Interactive => {
            print_banner(&config, &mut out)?;
            let mut dispatcher = Dispatcher::new(&registry, &config);
            dispatcher.run_interactive(io::stdin().lock(), &mut out)?;
        }
    }

    out.flush().map_err(|e| DrillError::io("flushing output", e))
}

/// Print a failure to stderr in the CLI's format.
pub fn report_error(err: &DrillError) {
    eprintln!("{} {err}", "crashdrill:".red().bold());
}

fn print_banner(config: &DrillConfig, out: &mut dyn Write) -> Result<()> {
    if config.is_quiet() {
        return Ok(());
    }
    let write = |out: &mut dyn Write| -> io::Result<()> {
        writeln!(out, "{}", "Core Dump Teaching Demo".bold())?;
        writeln!(out, "This program demonstrates different crash scenarios.")?;
        if config.rehearse {
            writeln!(
                out,
                "{}",
                "Rehearsal mode: unsafe primitives are intercepted, nothing will crash.".yellow()
            )?;
        }
        Ok(())
    };
    write(out).map_err(|e| DrillError::io("writing banner", e))
}
