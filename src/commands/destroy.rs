//! `vigil destroy`: delete every tracked monitor.

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::Settings;
use crate::state::StateFile;
use crate::ui;
use crate::Context;

pub fn run(ctx: &Context, skip_confirm: bool) -> Result<()> {
    let mut state = StateFile::load()?;

    if state.monitors.is_empty() {
        ui::info("No tracked monitors, nothing to destroy");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Destroy");
        for (name, tracked) in &state.monitors {
            println!("{} monitor '{}' (id {})", "- delete".red().bold(), name, tracked.id);
        }
        println!();
    }

    if !skip_confirm {
        print!("  Type '{}' to confirm: ", "destroy".bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim() != "destroy" {
            println!();
            ui::warn("Aborted. No changes made.");
            return Ok(());
        }
    }

    let settings = Settings::load()?;
    let client = settings.client();

    let mut failures = Vec::new();
    let names: Vec<String> = state.monitors.keys().cloned().collect();
    for name in names {
        let id = state.monitors[&name].id;
        match client.delete_monitor(id) {
            Ok(()) => {
                state.monitors.remove(&name);
                ui::success(&format!("deleted monitor '{name}'"));
            }
            Err(err) => {
                ui::error(&format!("failed to delete '{name}': {err}"));
                failures.push(name);
            }
        }
    }

    state.save()?;

    if !failures.is_empty() {
        bail!("{} monitor(s) failed: {}", failures.len(), failures.join(", "));
    }

    Ok(())
}
