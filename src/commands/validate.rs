//! `vigil validate`: check the manifest without contacting the server.

use anyhow::{Result, bail};
use std::path::Path;

use crate::manifest::Manifest;
use crate::ui;
use crate::Context;

pub fn run(_ctx: &Context, manifest_path: &Path) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;

    let issues = manifest.validate();
    if issues.is_empty() {
        ui::success(&format!(
            "{}: {} monitor(s), no issues",
            manifest_path.display(),
            manifest.monitors.len()
        ));
        return Ok(());
    }

    for issue in &issues {
        ui::error(issue);
    }
    bail!("{} issue(s) found", issues.len());
}
