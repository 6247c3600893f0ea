//! `vigil apply`: reconcile remote monitors with the manifest.

use anyhow::{Result, bail};
use std::path::Path;

use crate::commands::{check_manifest, print_plan};
use crate::config::Settings;
use crate::engine;
use crate::manifest::Manifest;
use crate::state::StateFile;
use crate::ui;
use crate::Context;

pub fn run(ctx: &Context, manifest_path: &Path, dry_run: bool) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    if !check_manifest(&manifest) {
        bail!("manifest has validation errors");
    }

    let settings = Settings::load()?;
    let client = settings.client();

    let mut state = StateFile::load()?;
    let plan = engine::plan(&manifest, &state);

    if !ctx.quiet {
        ui::header(if dry_run { "Apply (dry run)" } else { "Apply" });
        print_plan(&plan);
        println!();
    }

    if !plan.has_changes() {
        return Ok(());
    }

    let summary = engine::execute(&plan, &client, &mut state, dry_run)?;

    if !dry_run {
        state.save()?;
    }

    if !ctx.quiet {
        println!();
        ui::info(&format!(
            "{} created, {} updated, {} deleted, {} unchanged",
            summary.created, summary.updated, summary.deleted, summary.unchanged
        ));
    }

    if !summary.is_clean() {
        bail!("{} monitor(s) failed: {}", summary.failures.len(), summary.failures.join(", "));
    }

    Ok(())
}
