//! Create command implementation
//!
//! Turns a component file or inline snippet into a running preview. Re-creating from a file that
//! already backs a live artifact hands back that artifact instead of starting a second server.

use std::path::{Path, PathBuf};

use console::Style;

use super::helpers::{self, Context};
use crate::analyzer;
use crate::cli::CreateArgs;
use crate::common::fs;
use crate::domain::{ArtifactRecord, ContentSource};
use crate::error::{ArtifactError, Result, file_read_failed};
use crate::paths;
use crate::port;

const TRACING_TARGET: &str = "artifact::commands::create";

/// Where the new artifact's content comes from
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Inline(String),
}

impl Source {
    fn from_args(file: Option<PathBuf>, code: Option<String>) -> Result<Self> {
        match (file, code) {
            (Some(file), None) => Ok(Source::File(file)),
            (None, Some(code)) => Ok(Source::Inline(code)),
            _ => Err(ArtifactError::InvalidArguments {
                message: "Provide exactly one of a component file or --code".to_string(),
            }),
        }
    }
}

/// Outcome of a create request
#[derive(Debug)]
pub struct Created {
    pub record: ArtifactRecord,
    /// True when an already running artifact for the same file was returned
    pub reused: bool,
}

/// Run create command
pub fn run(args: CreateArgs) -> Result<()> {
    let ctx = Context::load()?;
    let source = Source::from_args(args.file, args.code)?;
    let created = create(&ctx, source, args.name)?;
    let record = &created.record;

    if created.reused {
        println!(
            "Artifact {} is already running for this file",
            Style::new().bold().yellow().apply_to(&record.id)
        );
    } else {
        println!(
            "Created artifact {} ({})",
            Style::new().bold().yellow().apply_to(&record.id),
            record.component_name
        );
    }
    println!("  {}", Style::new().cyan().apply_to(&record.url));

    if args.open {
        helpers::open_browser(&record.url);
    }
    Ok(())
}

pub fn create(ctx: &Context, source: Source, name: Option<String>) -> Result<Created> {
    let (content_source, id) = match source {
        Source::File(path) => {
            let path = dunce::canonicalize(&path).map_err(|e| file_read_failed(&path, e))?;
            if let Some(record) = reuse_or_discard(ctx, &path)? {
                return Ok(Created {
                    record,
                    reused: true,
                });
            }

            // Analyze the external file before anything is written
            analyzer::analyze(&path)?;
            let id = ctx.generate_id();
            let text = std::fs::read_to_string(&path).map_err(|e| file_read_failed(&path, e))?;
            fs::write_file(&paths::component_file(&ctx.layout.artifact_dir(&id)), &text)?;
            (ContentSource::File(path), id)
        }
        Source::Inline(code) => {
            let id = ctx.generate_id();
            fs::write_file(&paths::component_file(&ctx.layout.artifact_dir(&id)), &code)?;
            (ContentSource::Inline(code), id)
        }
    };

    let content_dir = ctx.layout.artifact_dir(&id);
    let analysis = analyzer::analyze(&paths::component_file(&content_dir))?;
    let port = port::allocate(None)?;

    let mut record = ArtifactRecord::new(
        id.clone(),
        content_source,
        analysis.component_name,
        content_dir,
        ctx.layout.runtime_dir(&id),
        port,
    );
    if let Some(name) = name {
        record.override_name(name);
    }

    tracing::debug!(target: TRACING_TARGET, id = %id, port, "artifact prepared");
    ctx.launch(&mut record)?;

    Ok(Created {
        record,
        reused: false,
    })
}

/// A live artifact for `path` is returned; a dead one is removed so it can be recreated
fn reuse_or_discard(ctx: &Context, path: &Path) -> Result<Option<ArtifactRecord>> {
    let Some(existing) = ctx.store.find_by_source_file(path) else {
        return Ok(None);
    };

    if ctx.supervisor.is_running(&existing) {
        return Ok(Some(existing));
    }

    tracing::info!(
        target: TRACING_TARGET,
        id = %existing.id,
        "replacing stopped artifact for the same file"
    );
    ctx.store.delete(&existing.id)?;
    fs::remove_dir_if_exists(&ctx.layout.artifact_dir(&existing.id))?;
    Ok(None)
}
