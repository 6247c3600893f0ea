//! `vigil list`: show tracked monitors, or everything the server has.

use anyhow::Result;
use colored::Colorize;

use crate::config::Settings;
use crate::state::StateFile;
use crate::ui;
use crate::Context;

pub fn run(ctx: &Context, remote: bool) -> Result<()> {
    if remote {
        return list_remote(ctx);
    }

    let state = StateFile::load()?;

    if state.monitors.is_empty() {
        ui::info("No tracked monitors");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Tracked monitors");
    }

    for (name, tracked) in &state.monitors {
        println!(
            "  {} (id {}) {}",
            name.bold(),
            tracked.id,
            status_label(tracked.monitor.disabled)
        );
        if ctx.verbose > 0 {
            ui::kv("    rules", &tracked.monitor.rules.len().to_string());
            if let Some(updated) = &tracked.updated_at {
                ui::kv("    updated", updated);
            }
        }
    }

    println!();
    ui::dim(&format!("state last written {}", state.last_updated));
    Ok(())
}

/// List everything visible to the API key, marking which monitors are
/// tracked locally. Untracked ones are candidates for `vigil import`.
fn list_remote(ctx: &Context) -> Result<()> {
    let settings = Settings::load()?;
    let client = settings.client();
    let state = StateFile::load()?;

    let monitors = client.list_monitors()?;

    if monitors.is_empty() {
        ui::info("Server has no monitors");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Remote monitors");
    }

    for monitor in &monitors {
        let tracked = state.monitors.values().any(|t| t.id == monitor.id);
        println!(
            "  {} (id {}) {} {}",
            monitor.name.bold(),
            monitor.id,
            status_label(monitor.disabled),
            if tracked {
                "tracked".dimmed()
            } else {
                "untracked".yellow()
            }
        );
    }

    Ok(())
}

fn status_label(disabled: bool) -> colored::ColoredString {
    if disabled {
        "disabled".yellow()
    } else {
        "active".green()
    }
}
