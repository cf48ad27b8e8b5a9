//! Update command implementation

use console::Style;

use super::helpers::Context;
use crate::analyzer;
use crate::cli::UpdateArgs;
use crate::common::fs;
use crate::domain::{ArtifactRecord, ContentSource};
use crate::error::{ArtifactError, Result};
use crate::paths;

/// Run update command
pub fn run(args: UpdateArgs) -> Result<()> {
    let ctx = Context::load()?;
    let (record, reloaded) = update(&ctx, &args.id, args.code)?;

    let action = if reloaded { "reloaded" } else { "restarted" };
    println!(
        "Updated {} ({}), server {action}",
        Style::new().bold().yellow().apply_to(&record.id),
        record.component_name
    );
    println!("  {}", Style::new().cyan().apply_to(&record.url));
    Ok(())
}

/// Refresh content and push it to the server. Returns whether a running server was reloaded
/// (as opposed to restarted).
pub fn update(ctx: &Context, id: &str, code: Option<String>) -> Result<(ArtifactRecord, bool)> {
    let mut record = ctx.store.get(id)?;
    let component = paths::component_file(&record.content_dir);

    match (&record.content_source, code) {
        (ContentSource::File(_), Some(_)) => {
            return Err(ArtifactError::InvalidArguments {
                message: format!(
                    "Artifact {id} is backed by a file; edit the file instead of passing --code"
                ),
            });
        }
        (ContentSource::File(source), None) => {
            // A deleted source file surfaces here as an analysis failure
            let analysis = analyzer::analyze(source)?;
            fs::write_file(&component, &analysis.source_text)?;
            record.refresh_name(analysis.component_name);
        }
        (ContentSource::Inline(_), Some(code)) => {
            fs::write_file(&component, &code)?;
            record.refresh_name(analyzer::analyze(&component)?.component_name);
            record.content_source = ContentSource::Inline(code);
        }
        (ContentSource::Inline(_), None) => {}
    }

    record.touch();

    if ctx.supervisor.is_running(&record) {
        ctx.supervisor.reload(&record)?;
        ctx.store.save(&record)?;
        return Ok((record, true));
    }

    ctx.relaunch(&mut record)?;
    Ok((record, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::supervisor::Supervisor;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> Context {
        let settings = Settings {
            home: temp.path().join("home"),
            ..Settings::default()
        };
        let supervisor = Supervisor::new(
            PathBuf::from("/nonexistent"),
            settings.idle_timeout,
            Duration::from_millis(200),
        );
        Context::new(settings, supervisor)
    }

    fn file_record(ctx: &Context, source: &Path) -> ArtifactRecord {
        ArtifactRecord::new(
            "a1b2c3",
            ContentSource::File(source.to_path_buf()),
            "Card",
            ctx.layout.artifact_dir("a1b2c3"),
            ctx.layout.runtime_dir("a1b2c3"),
            4000,
        )
    }

    #[test]
    fn test_update_keeps_overridden_name() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let source = temp.path().join("Card.tsx");
        std::fs::write(&source, "export default function Card(){return null}").unwrap();

        let mut record = file_record(&ctx, &source);
        record.override_name("Custom");
        ctx.store.save(&record).unwrap();

        // No server can start here; the refreshed record is saved regardless
        assert!(update(&ctx, "a1b2c3", None).is_err());

        let stored = ctx.store.get("a1b2c3").unwrap();
        assert_eq!(stored.component_name, "Custom");
        assert!(paths::component_file(&stored.content_dir).is_file());
    }

    #[test]
    fn test_update_adopts_detected_name() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let source = temp.path().join("Card.tsx");
        std::fs::write(&source, "export default function Renamed(){return null}").unwrap();

        ctx.store.save(&file_record(&ctx, &source)).unwrap();
        assert!(update(&ctx, "a1b2c3", None).is_err());

        assert_eq!(ctx.store.get("a1b2c3").unwrap().component_name, "Renamed");
    }

    #[test]
    fn test_code_rejected_for_file_backed_artifact() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        ctx.store
            .save(&file_record(&ctx, &temp.path().join("Card.tsx")))
            .unwrap();

        let err = update(&ctx, "a1b2c3", Some("x".into())).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidArguments { .. }));
    }
}
