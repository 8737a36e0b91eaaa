//! Text rendering for the interactive menu and the scenario listing.

use std::io::{self, Write};

use crate::scenarios::registry::ScenarioRegistry;

/// Heading printed above the options.
pub const MENU_TITLE: &str = "=== Core Dump Demo Program ===";
/// Printed without a newline before reading a selection.
pub const PROMPT: &str = "Enter choice: ";

/// Print the menu and the prompt, then flush so the prompt is visible.
pub fn render_menu(registry: &ScenarioRegistry, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{MENU_TITLE}")?;
    writeln!(out, "Select a crash scenario:")?;
    for scenario in registry.iter() {
        writeln!(out, "{}. {}", scenario.id, scenario.name)?;
    }
    writeln!(out, "0. Exit")?;
    write!(out, "{PROMPT}")?;
    out.flush()
}

/// Print every scenario with its description and call chain.
pub fn render_listing(registry: &ScenarioRegistry, out: &mut dyn Write) -> io::Result<()> {
    for scenario in registry.iter() {
        writeln!(out, "{}. {}", scenario.id, scenario.name)?;
        writeln!(out, "   {}", scenario.description)?;
        writeln!(out, "   chain: {}", scenario.chain_label())?;
    }
    Ok(())
}
