//! Location migration between the ephemeral home and a project directory
//!
//! Saving copies `component.tsx` into `<project>/.artifact/saved/<id>/` and points the record
//! at it; unsaving copies it back. The runtime directory never moves. A running server is
//! stopped first because its content directory is about to change.
//!
//! Filesystem and store are not updated atomically. If the copy succeeds and the store write
//! fails the copy stays behind and the record still names the old location.

use std::path::Path;

use crate::common::fs;
use crate::domain::{ArtifactRecord, Location};
use crate::error::Result;
use crate::paths::{self, Layout};
use crate::store::ArtifactStore;
use crate::supervisor::Supervisor;

const TRACING_TARGET: &str = "artifact::location";

/// Result of a save or unsave request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// False when the artifact was already at the requested location
    pub moved: bool,
    /// Whether a running server had to be stopped
    pub stopped_server: bool,
}

impl Migration {
    const UNCHANGED: Migration = Migration {
        moved: false,
        stopped_server: false,
    };
}

pub struct Migrator<'a> {
    layout: &'a Layout,
    store: &'a ArtifactStore,
    supervisor: &'a Supervisor,
}

impl<'a> Migrator<'a> {
    pub fn new(layout: &'a Layout, store: &'a ArtifactStore, supervisor: &'a Supervisor) -> Self {
        Self {
            layout,
            store,
            supervisor,
        }
    }

    /// Persist `record`'s content under `project_root`
    pub fn save(&self, record: &mut ArtifactRecord, project_root: &Path) -> Result<Migration> {
        if record.location == Location::Saved {
            return Ok(Migration::UNCHANGED);
        }

        let temp_component = paths::component_file(&record.content_dir);
        let saved_dir = paths::saved_dir(project_root, &record.id);
        fs::copy_file(&temp_component, &paths::component_file(&saved_dir))?;

        let stopped_server = self.stop_if_running(record);
        record.move_to_saved(saved_dir);
        self.store.save(record)?;

        // Runtime bookkeeping next to it stays in place
        if let Err(err) = fs::remove_file_if_exists(&temp_component) {
            tracing::warn!(
                target: TRACING_TARGET,
                id = %record.id,
                error = %err,
                "temp copy left behind"
            );
        }

        tracing::info!(
            target: TRACING_TARGET,
            id = %record.id,
            saved_path = %record.content_dir.display(),
            "artifact saved"
        );
        Ok(Migration {
            moved: true,
            stopped_server,
        })
    }

    /// Move `record`'s content back to the ephemeral home. The saved directory is left alone.
    pub fn unsave(&self, record: &mut ArtifactRecord) -> Result<Migration> {
        if record.location == Location::Temp {
            return Ok(Migration::UNCHANGED);
        }

        let source_dir = record
            .saved_path
            .clone()
            .unwrap_or_else(|| record.content_dir.clone());
        let temp_dir = self.layout.artifact_dir(&record.id);
        fs::copy_file(
            &paths::component_file(&source_dir),
            &paths::component_file(&temp_dir),
        )?;

        let stopped_server = self.stop_if_running(record);
        record.move_to_temp(temp_dir);
        self.store.save(record)?;

        tracing::info!(target: TRACING_TARGET, id = %record.id, "artifact moved back to temp");
        Ok(Migration {
            moved: true,
            stopped_server,
        })
    }

    fn stop_if_running(&self, record: &mut ArtifactRecord) -> bool {
        if !self.supervisor.is_running(record) {
            return false;
        }
        self.supervisor.stop(record);
        record.mark_stopped();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentSource;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    const SOURCE: &str = "export default function X(){return null}";

    struct Fixture {
        _temp: TempDir,
        layout: Layout,
        store: ArtifactStore,
        supervisor: Supervisor,
        project: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let layout = Layout::new(temp.path().join("home"));
            let store = ArtifactStore::open(&layout);
            let supervisor = Supervisor::new(
                PathBuf::from("/nonexistent"),
                Duration::from_secs(30),
                Duration::from_secs(1),
            );
            let project = temp.path().join("project");
            std::fs::create_dir_all(&project).unwrap();
            Self {
                _temp: temp,
                layout,
                store,
                supervisor,
                project,
            }
        }

        fn migrator(&self) -> Migrator<'_> {
            Migrator::new(&self.layout, &self.store, &self.supervisor)
        }

        fn record(&self) -> ArtifactRecord {
            let record = ArtifactRecord::new(
                "a1b2c3",
                ContentSource::Inline(SOURCE.to_string()),
                "X",
                self.layout.artifact_dir("a1b2c3"),
                self.layout.runtime_dir("a1b2c3"),
                4000,
            );
            fs::write_file(&paths::component_file(&record.content_dir), SOURCE).unwrap();
            fs::write_file(&paths::log_file(&record.runtime_dir), "log").unwrap();
            self.store.save(&record).unwrap();
            record
        }
    }

    #[test]
    fn test_save_moves_content() {
        let fx = Fixture::new();
        let mut record = fx.record();
        let temp_dir = record.content_dir.clone();
        let runtime_dir = record.runtime_dir.clone();

        let migration = fx.migrator().save(&mut record, &fx.project).unwrap();
        assert!(migration.moved);
        assert!(!migration.stopped_server);

        let saved_dir = fx.project.join(".artifact").join("saved").join("a1b2c3");
        assert_eq!(record.location, Location::Saved);
        assert_eq!(record.saved_path.as_deref(), Some(saved_dir.as_path()));
        assert_eq!(record.content_dir, saved_dir);
        assert_eq!(record.runtime_dir, runtime_dir);
        assert!(record.is_consistent());

        assert!(paths::component_file(&saved_dir).is_file());
        assert!(!paths::component_file(&temp_dir).exists());
        assert!(paths::log_file(&runtime_dir).is_file());

        let stored = fx.store.get("a1b2c3").unwrap();
        assert_eq!(stored.location, Location::Saved);
    }

    #[test]
    fn test_save_twice_is_noop() {
        let fx = Fixture::new();
        let mut record = fx.record();
        fx.migrator().save(&mut record, &fx.project).unwrap();

        let again = fx.migrator().save(&mut record, &fx.project).unwrap();
        assert_eq!(again, Migration::UNCHANGED);
    }

    #[test]
    fn test_save_unsave_round_trip() {
        let fx = Fixture::new();
        let mut record = fx.record();
        let original_dir = record.content_dir.clone();

        fx.migrator().save(&mut record, &fx.project).unwrap();
        let saved_dir = record.content_dir.clone();
        fx.migrator().unsave(&mut record).unwrap();

        assert_eq!(record.location, Location::Temp);
        assert!(record.saved_path.is_none());
        assert_eq!(record.content_dir, original_dir);
        assert!(record.is_consistent());
        assert_eq!(
            std::fs::read_to_string(paths::component_file(&original_dir)).unwrap(),
            SOURCE
        );
        // Persisted copy is intentionally kept
        assert!(paths::component_file(&saved_dir).is_file());

        let stored = fx.store.get("a1b2c3").unwrap();
        assert_eq!(stored.location, Location::Temp);
        assert_eq!(stored.content_dir, original_dir);
    }

    #[test]
    fn test_unsave_temp_is_noop() {
        let fx = Fixture::new();
        let mut record = fx.record();
        let migration = fx.migrator().unsave(&mut record).unwrap();
        assert!(!migration.moved);
    }

    #[test]
    fn test_save_without_content_fails_untouched() {
        let fx = Fixture::new();
        let mut record = fx.record();
        std::fs::remove_file(paths::component_file(&record.content_dir)).unwrap();

        assert!(fx.migrator().save(&mut record, &fx.project).is_err());
        assert_eq!(record.location, Location::Temp);
        assert_eq!(fx.store.get("a1b2c3").unwrap().location, Location::Temp);
    }
}
