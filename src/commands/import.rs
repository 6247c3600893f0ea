//! `vigil import`: adopt an existing remote monitor into tracked state.

use anyhow::{Context as AnyhowContext, Result, bail};
use std::path::Path;

use crate::config::Settings;
use crate::manifest::Manifest;
use crate::state::{MonitorState, StateFile};
use crate::ui;
use crate::Context;

pub fn run(_ctx: &Context, manifest_path: &Path, name: &str, id: i64) -> Result<()> {
    let mut state = StateFile::load()?;

    if state.monitors.contains_key(name) {
        bail!("monitor '{name}' is already tracked");
    }

    // Warn early when the name will not reconcile against anything.
    match Manifest::load(manifest_path) {
        Ok(manifest) if manifest.find_monitor(name).is_none() => {
            ui::warn(&format!(
                "'{name}' is not declared in {}; the next apply will delete it",
                manifest_path.display()
            ));
        }
        Ok(_) => {}
        Err(err) => log::debug!("manifest not checked during import: {err:#}"),
    }

    let settings = Settings::load()?;
    let client = settings.client();

    let remote = client
        .get_monitor(id)
        .with_context(|| format!("could not fetch monitor {id}"))?;

    state
        .monitors
        .insert(name.to_string(), MonitorState::from_remote(&remote));
    state.save()?;

    ui::success(&format!("imported monitor '{}' (remote name '{}', id {id})", name, remote.name));
    Ok(())
}
