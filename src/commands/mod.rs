pub mod apply;
pub mod destroy;
pub mod import;
pub mod list;
pub mod plan;
pub mod validate;

use colored::Colorize;

use crate::engine::{Action, Plan};
use crate::ui;

/// Print a plan the way both `plan` and `apply` show it.
pub fn print_plan(plan: &Plan) {
    for entry in &plan.monitors {
        match entry.action {
            Action::Create => {
                println!("{} monitor '{}'", "+ create".green().bold(), entry.name);
            }
            Action::Update => {
                println!("{} monitor '{}'", "~ update".yellow().bold(), entry.name);
                for change in &entry.changes {
                    println!(
                        "    {}: {} {} {}",
                        change.field.bold(),
                        change.from.dimmed(),
                        "->".dimmed(),
                        change.to
                    );
                }
            }
            Action::NoChange => {
                log::debug!("monitor '{}' unchanged", entry.name);
            }
        }
    }

    for (name, tracked) in &plan.removals {
        println!(
            "{} monitor '{}' (id {})",
            "- delete".red().bold(),
            name,
            tracked.id
        );
    }

    let changed = plan
        .monitors
        .iter()
        .filter(|m| m.action != Action::NoChange)
        .count();
    let pending = changed + plan.removals.len();
    let unchanged = plan.monitors.len() - changed;

    println!();
    if pending == 0 {
        ui::success("Everything up to date");
    } else {
        ui::info(&format!("{pending} pending, {unchanged} unchanged"));
    }
}

/// Validate a manifest and print any issues. Returns true when clean.
pub fn check_manifest(manifest: &crate::manifest::Manifest) -> bool {
    let issues = manifest.validate();
    for issue in &issues {
        ui::error(issue);
    }
    issues.is_empty()
}
