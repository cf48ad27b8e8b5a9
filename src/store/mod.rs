//! Artifact record store
//!
//! The whole table is one JSON document (`artifacts.json`) that is read fully, mutated in
//! memory and written back wholesale on every call. There is no locking: two invocations that
//! interleave read-modify-write cycles lose the earlier writer's change. That is accepted for a
//! single-operator tool.
//!
//! A missing or unparsable document reads as an empty table. Individual records that fail to
//! parse are skipped (and dropped on the next write).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::ArtifactRecord;
use crate::error::{ArtifactError, Result};
use crate::paths::Layout;

const TRACING_TARGET: &str = "artifact::store";

/// JSON-backed table of artifact records
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
    layout: Layout,
}

impl ArtifactStore {
    pub fn open(layout: &Layout) -> Self {
        Self {
            path: layout.store_file(),
            layout: layout.clone(),
        }
    }

    /// Upsert by id, preserving the position of an existing record
    pub fn save(&self, record: &ArtifactRecord) -> Result<()> {
        debug_assert!(record.is_consistent(), "saved_path must track location");
        let mut records = self.read_all();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records)
    }

    pub fn find_by_id(&self, id: &str) -> Option<ArtifactRecord> {
        self.read_all().into_iter().find(|r| r.id == id)
    }

    /// Like [`find_by_id`](Self::find_by_id) but an unknown id is an error
    pub fn get(&self, id: &str) -> Result<ArtifactRecord> {
        self.find_by_id(id).ok_or_else(|| ArtifactError::NotFound { id: id.to_string() })
    }

    pub fn find_all(&self) -> Vec<ArtifactRecord> {
        self.read_all()
    }

    /// Record created from the external file `path`, used to de-duplicate re-creation
    pub fn find_by_source_file(&self, path: &Path) -> Option<ArtifactRecord> {
        self.read_all()
            .into_iter()
            .find(|r| r.source_file() == Some(path))
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.read_all();
        records.retain(|r| r.id != id);
        self.write_all(&records)
    }

    fn read_all(&self) -> Vec<ArtifactRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path = %self.path.display(),
                    error = %err,
                    "store unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path = %self.path.display(),
                    error = %err,
                    "store document corrupt, treating as empty"
                );
                return Vec::new();
            }
        };

        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<ArtifactRecord>(value) {
                Ok(record) => Some(self.fill_defaults(record)),
                Err(err) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        error = %err,
                        "skipping unparsable artifact record"
                    );
                    None
                }
            })
            .collect()
    }

    fn fill_defaults(&self, mut record: ArtifactRecord) -> ArtifactRecord {
        if record.runtime_dir.as_os_str().is_empty() {
            record.runtime_dir = self.layout.runtime_dir(&record.id);
        }
        record
    }

    fn write_all(&self, records: &[ArtifactRecord]) -> Result<()> {
        let store_failed = |reason: String| ArtifactError::StoreFailed {
            path: self.path.display().to_string(),
            reason,
        };

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| store_failed(e.to_string()))?;

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| store_failed(format!("Failed to serialize records: {e}")))?;

        // Whole-document replace via rename; readers never see a half-written file.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| store_failed(e.to_string()))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| store_failed(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| store_failed(e.error.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            records = records.len(),
            "store written"
        );
        Ok(())
    }
}
