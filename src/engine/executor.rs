//! Plan execution against the remote API.
//!
//! Monitors are applied one at a time. A failure on one monitor is
//! recorded and execution moves on, so a single bad definition never
//! blocks the rest of the manifest. State entries are only touched
//! after the corresponding remote call succeeds.

use anyhow::Result;

use crate::engine::planner::{Action, MonitorPlan, Plan};
use crate::payload;
use crate::state::{MonitorState, StateFile};
use crate::ui;
use vigilapi::Client;

/// Outcome counts for one execution pass.
#[derive(Debug, Default)]
pub struct ExecuteSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failures: Vec<String>,
}

impl ExecuteSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply a plan. With `dry_run` set, nothing is sent to the server and
/// state is left untouched.
pub fn execute(
    plan: &Plan,
    client: &Client,
    state: &mut StateFile,
    dry_run: bool,
) -> Result<ExecuteSummary> {
    let mut summary = ExecuteSummary::default();

    for entry in &plan.monitors {
        match entry.action {
            Action::NoChange => {
                log::debug!("monitor '{}' is up to date", entry.name);
                summary.unchanged += 1;
            }
            Action::Create => {
                if dry_run {
                    ui::info(&format!("would create monitor '{}'", entry.name));
                    summary.created += 1;
                    continue;
                }
                match create_monitor(client, entry, state) {
                    Ok(id) => {
                        ui::success(&format!("created monitor '{}' (id {id})", entry.name));
                        summary.created += 1;
                    }
                    Err(err) => {
                        ui::error(&format!("failed to create '{}': {err:#}", entry.name));
                        summary.failures.push(entry.name.clone());
                    }
                }
            }
            Action::Update => {
                if dry_run {
                    ui::info(&format!(
                        "would update monitor '{}' ({} changes)",
                        entry.name,
                        entry.changes.len()
                    ));
                    summary.updated += 1;
                    continue;
                }
                match update_monitor(client, entry, state) {
                    Ok(()) => {
                        ui::success(&format!("updated monitor '{}'", entry.name));
                        summary.updated += 1;
                    }
                    Err(err) => {
                        ui::error(&format!("failed to update '{}': {err:#}", entry.name));
                        summary.failures.push(entry.name.clone());
                    }
                }
            }
        }
    }

    for (name, tracked) in &plan.removals {
        if dry_run {
            ui::info(&format!("would delete monitor '{name}' (id {})", tracked.id));
            summary.deleted += 1;
            continue;
        }
        match client.delete_monitor(tracked.id) {
            Ok(()) => {
                state.monitors.remove(name);
                ui::success(&format!("deleted monitor '{name}'"));
                summary.deleted += 1;
            }
            Err(err) => {
                ui::error(&format!("failed to delete '{name}': {err}"));
                summary.failures.push(name.clone());
            }
        }
    }

    Ok(summary)
}

fn create_monitor(
    client: &Client,
    entry: &MonitorPlan,
    state: &mut StateFile,
) -> Result<i64> {
    let body = payload::monitor_payload(&entry.config, None)?;
    let id = client.create_monitor(&body)?;
    if !record_remote(client, id, &entry.name, state) {
        // The monitor exists remotely now; losing the id here would
        // make the next apply create a duplicate.
        state
            .monitors
            .insert(entry.name.clone(), MonitorState::from_config(id, entry.config.clone()));
    }
    Ok(id)
}

fn update_monitor(
    client: &Client,
    entry: &MonitorPlan,
    state: &mut StateFile,
) -> Result<()> {
    let id = entry
        .remote_id
        .ok_or_else(|| anyhow::anyhow!("monitor '{}' has no remote id", entry.name))?;
    let body = payload::monitor_payload(&entry.config, Some(id))?;
    client.update_monitor(id, &body)?;
    if !record_remote(client, id, &entry.name, state)
        && let Some(tracked) = state.monitors.get_mut(&entry.name)
    {
        // Keep state on what was just written instead of the pre-update
        // snapshot; metadata refreshes on the next successful pass.
        tracked.monitor = entry.config.clone();
    }
    Ok(())
}

/// Read the monitor back so state holds the server's copy, computed
/// fields and assigned identifiers included. Returns false when the
/// read-back fails; callers must still keep the id in state.
fn record_remote(client: &Client, id: i64, name: &str, state: &mut StateFile) -> bool {
    match client.get_monitor(id) {
        Ok(remote) => {
            state
                .monitors
                .insert(name.to_string(), MonitorState::from_remote(&remote));
            true
        }
        Err(err) => {
            log::warn!("could not read back monitor '{name}' (id {id}): {err}");
            ui::warn(&format!("monitor '{name}' applied but read-back failed"));
            false
        }
    }
}
