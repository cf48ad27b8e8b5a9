//! List command implementation
//!
//! Liveness is probed per artifact; the cached status in the store is only a hint. Watcher
//! counts come from each running server's `/__status` endpoint.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::ui::{self, ListRow};

use super::helpers::{self, Context};

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let ctx = Context::load()?;
    let records = ctx.store.find_all();
    let client = helpers::status_client();

    let rows: Vec<ListRow<'_>> = records
        .iter()
        .map(|record| {
            let running = ctx.supervisor.is_running(record);
            let watchers = match (&client, running) {
                (Some(client), true) => helpers::fetch_watchers(client, record.port),
                _ => None,
            };
            ListRow {
                record,
                running,
                watchers,
            }
        })
        .collect();

    if args.json {
        println!("{}", json_listing(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No artifacts.");
        return Ok(());
    }

    println!("Artifacts ({}):", rows.len());
    println!();
    print!("{}", ui::artifact_table(&rows));
    Ok(())
}

/// Records as stored, plus probed `running` and `watchers`
fn json_listing(rows: &[ListRow<'_>]) -> Result<String> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let mut value = serde_json::to_value(row.record)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("running".to_string(), row.running.into());
            object.insert(
                "watchers".to_string(),
                row.watchers.map_or(serde_json::Value::Null, Into::into),
            );
        }
        items.push(value);
    }
    Ok(serde_json::to_string_pretty(&items)?)
}
