//! `vigil plan`: show pending changes without touching anything.

use anyhow::{Result, bail};
use std::path::Path;

use crate::commands::{check_manifest, print_plan};
use crate::engine;
use crate::manifest::Manifest;
use crate::state::StateFile;
use crate::ui;
use crate::Context;

pub fn run(ctx: &Context, manifest_path: &Path) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    if !check_manifest(&manifest) {
        bail!("manifest has validation errors");
    }

    let state = StateFile::load()?;
    let plan = engine::plan(&manifest, &state);

    if !ctx.quiet {
        ui::header("Plan");
        print_plan(&plan);
    }

    Ok(())
}
