//! Stop command implementation

use console::Style;

use super::helpers::Context;
use crate::cli::StopArgs;
use crate::domain::{ArtifactRecord, ArtifactStatus};
use crate::error::Result;

/// Run stop command
pub fn run(args: StopArgs) -> Result<()> {
    let ctx = Context::load()?;

    let targets = match &args.id {
        Some(id) => vec![ctx.store.get(id)?],
        None => ctx.store.find_all(),
    };

    let mut stopped = 0;
    for mut record in targets {
        if stop(&ctx, &mut record)? {
            stopped += 1;
            println!(
                "Stopped {}",
                Style::new().bold().yellow().apply_to(&record.id)
            );
        } else if !args.all {
            println!("Artifact {} is not running", record.id);
        }
    }

    if args.all && stopped == 0 {
        println!("No running artifacts.");
    }
    Ok(())
}

/// Stop `record` if its process is alive and mark it stopped. Returns whether a signal was sent.
///
/// A record that still claims to be running but whose process is gone is corrected as well.
pub fn stop(ctx: &Context, record: &mut ArtifactRecord) -> Result<bool> {
    let running = ctx.supervisor.is_running(record);
    if running {
        ctx.supervisor.stop(record);
    }

    let stale = record.pid.is_some() || record.status != ArtifactStatus::Stopped;
    if running || stale {
        record.mark_stopped();
        ctx.store.save(record)?;
    }
    Ok(running)
}
