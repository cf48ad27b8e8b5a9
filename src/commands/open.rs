//! Open command implementation

use console::Style;

use super::helpers::{self, Context};
use crate::cli::OpenArgs;
use crate::error::Result;

/// Run open command
pub fn run(args: OpenArgs) -> Result<()> {
    let ctx = Context::load()?;
    let mut record = ctx.store.get(&args.id)?;

    if ctx.supervisor.is_running(&record) {
        println!(
            "Artifact {} is running",
            Style::new().bold().yellow().apply_to(&record.id)
        );
    } else {
        ctx.relaunch(&mut record)?;
        println!(
            "Started artifact {}",
            Style::new().bold().yellow().apply_to(&record.id)
        );
    }
    println!("  {}", Style::new().cyan().apply_to(&record.url));

    if !args.no_browser {
        helpers::open_browser(&record.url);
    }
    Ok(())
}
