//! Save and unsave command implementations

use console::Style;

use super::helpers::{self, Context};
use crate::cli::{SaveArgs, UnsaveArgs};
use crate::error::Result;
use crate::location::Migration;

/// Run save command
pub fn run_save(args: SaveArgs) -> Result<()> {
    let ctx = Context::load()?;
    let project_root = helpers::current_dir()?;
    let mut record = ctx.store.get(&args.id)?;

    let migration = ctx.migrator().save(&mut record, &project_root)?;
    let path = record
        .saved_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if migration.moved {
        println!(
            "Saved {} to {}",
            Style::new().bold().yellow().apply_to(&record.id),
            path
        );
    } else {
        println!("Artifact {} is already saved at {path}", record.id);
    }
    print_restart_hint(&migration, &record.id);
    Ok(())
}

/// Run unsave command
pub fn run_unsave(args: UnsaveArgs) -> Result<()> {
    let ctx = Context::load()?;
    let mut record = ctx.store.get(&args.id)?;
    let previous = record.saved_path.clone();

    let migration = ctx.migrator().unsave(&mut record)?;

    if migration.moved {
        println!(
            "Moved {} back to temp",
            Style::new().bold().yellow().apply_to(&record.id)
        );
        if let Some(previous) = previous {
            println!(
                "  {} still exists; delete it if you no longer need it",
                Style::new().dim().apply_to(previous.display())
            );
        }
    } else {
        println!("Artifact {} is already in temp", record.id);
    }
    print_restart_hint(&migration, &record.id);
    Ok(())
}

fn print_restart_hint(migration: &Migration, id: &str) {
    if migration.stopped_server {
        println!("  Server was stopped. Run 'artifact open {id}' to restart it.");
    }
}
