//! Clean command implementation
//!
//! Removes records together with their ephemeral directory and, for saved artifacts, the
//! persisted directory.

use console::Style;

use super::helpers::Context;
use crate::cli::CleanArgs;
use crate::common::fs;
use crate::domain::ArtifactRecord;
use crate::error::{ArtifactError, Result};

const TRACING_TARGET: &str = "artifact::commands::clean";

/// Run clean command
pub fn run(args: CleanArgs) -> Result<()> {
    let ctx = Context::load()?;

    if let Some(id) = &args.id {
        let record = ctx.store.get(id)?;
        if ctx.supervisor.is_running(&record) && !args.force {
            return Err(ArtifactError::StillRunning { id: id.clone() });
        }
        remove(&ctx, &record)?;
        println!("Removed {}", Style::new().bold().yellow().apply_to(id));
        return Ok(());
    }

    let mut removed = 0usize;
    let mut skipped = 0usize;
    for record in ctx.store.find_all() {
        if ctx.supervisor.is_running(&record) && !args.force {
            skipped += 1;
            continue;
        }
        remove(&ctx, &record)?;
        removed += 1;
    }

    if removed == 0 && skipped == 0 {
        println!("No artifacts to clean.");
        return Ok(());
    }

    println!(
        "Removed {removed} artifact{}",
        if removed == 1 { "" } else { "s" }
    );
    if skipped > 0 {
        println!(
            "  Skipped {skipped} running artifact{} (use --force to remove)",
            if skipped == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

/// Stop if needed, delete the record, then its directories
pub fn remove(ctx: &Context, record: &ArtifactRecord) -> Result<()> {
    if ctx.supervisor.is_running(record) {
        ctx.supervisor.stop(record);
    }

    ctx.store.delete(&record.id)?;

    fs::remove_dir_if_exists(&ctx.layout.artifact_dir(&record.id))?;
    if let Some(saved) = &record.saved_path {
        fs::remove_dir_if_exists(saved)?;
    }

    tracing::info!(target: TRACING_TARGET, id = %record.id, "artifact removed");
    Ok(())
}
