//! Artifact domain types
//!
//! Contains the durable record of one preview instance and the enums describing its state.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an artifact's user content came from. Exactly one variant is ever present, so a record
/// can never carry both a source file and inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSource {
    /// Absolute path to an external component file
    #[serde(rename = "sourceFile")]
    File(PathBuf),

    /// Component text supplied inline at creation
    #[serde(rename = "sourceCode")]
    Inline(String),
}

/// Cached lifecycle hint. Control decisions always re-probe the process instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Starting,
    Running,
    Stopped,
    Error,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactStatus::Starting => "starting",
            ArtifactStatus::Running => "running",
            ArtifactStatus::Stopped => "stopped",
            ArtifactStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Whether content lives in the ephemeral temp area or a persisted project directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Temp,
    Saved,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Temp => f.write_str("temp"),
            Location::Saved => f.write_str("saved"),
        }
    }
}

/// One artifact as persisted in the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub id: String,

    #[serde(flatten)]
    pub content_source: ContentSource,

    pub component_name: String,

    /// Name given explicitly at creation; pins `component_name` across re-analysis
    #[serde(default)]
    pub name_override: Option<String>,

    /// Directory holding `component.tsx`; ephemeral or persisted depending on `location`
    pub content_dir: PathBuf,

    /// Process bookkeeping directory; always ephemeral. Older documents may lack it, in which
    /// case the store fills it in from the layout.
    #[serde(default)]
    pub runtime_dir: PathBuf,

    pub port: u16,
    pub url: String,

    #[serde(default)]
    pub pid: Option<u32>,

    pub status: ArtifactStatus,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub saved_path: Option<PathBuf>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Preview URL for an artifact served on `port`
pub fn preview_url(port: u16, id: &str) -> String {
    format!("http://localhost:{port}/{id}")
}

impl ArtifactRecord {
    /// Create a fresh temp-located record in the `starting` state
    pub fn new(
        id: impl Into<String>,
        content_source: ContentSource,
        component_name: impl Into<String>,
        content_dir: PathBuf,
        runtime_dir: PathBuf,
        port: u16,
    ) -> Self {
        let id = id.into();
        let now = Utc::now();
        Self {
            url: preview_url(port, &id),
            id,
            content_source,
            component_name: component_name.into(),
            name_override: None,
            content_dir,
            runtime_dir,
            port,
            pid: None,
            status: ArtifactStatus::Starting,
            location: Location::Temp,
            saved_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// External source file, if the artifact was created from one
    pub fn source_file(&self) -> Option<&Path> {
        match &self.content_source {
            ContentSource::File(path) => Some(path),
            ContentSource::Inline(_) => None,
        }
    }

    /// Rebind to a new port; the URL follows
    /// Pin the display name, overriding whatever analysis detects
    pub fn override_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.component_name.clone_from(&name);
        self.name_override = Some(name);
    }

    /// Adopt a freshly detected component name unless the name was pinned
    pub fn refresh_name(&mut self, detected: String) {
        if self.name_override.is_none() {
            self.component_name = detected;
        }
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
        self.url = preview_url(port, &self.id);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn mark_running(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.status = ArtifactStatus::Running;
        self.touch();
    }

    pub fn mark_stopped(&mut self) {
        self.pid = None;
        self.status = ArtifactStatus::Stopped;
        self.touch();
    }

    pub fn mark_error(&mut self) {
        self.status = ArtifactStatus::Error;
        self.touch();
    }

    /// Point content at a persisted directory. The runtime directory is left alone.
    pub fn move_to_saved(&mut self, saved_dir: PathBuf) {
        self.location = Location::Saved;
        self.content_dir = saved_dir.clone();
        self.saved_path = Some(saved_dir);
        self.touch();
    }

    /// Point content back at the ephemeral directory
    pub fn move_to_temp(&mut self, temp_dir: PathBuf) {
        self.location = Location::Temp;
        self.content_dir = temp_dir;
        self.saved_path = None;
        self.touch();
    }

    /// `location = saved` iff `saved_path` is set, and a saved record's content lives there
    pub fn is_consistent(&self) -> bool {
        match (self.location, &self.saved_path) {
            (Location::Temp, None) => true,
            (Location::Saved, Some(path)) => *path == self.content_dir,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArtifactRecord {
        ArtifactRecord::new(
            "a1b2c3",
            ContentSource::Inline("export default function X(){return null}".to_string()),
            "X",
            PathBuf::from("/tmp/artifact-cli/artifacts/a1b2c3"),
            PathBuf::from("/tmp/artifact-cli/artifacts/a1b2c3/.runtime"),
            4321,
        )
    }

    #[test]
    fn test_new_record_defaults() {
        let record = sample();
        assert_eq!(record.url, "http://localhost:4321/a1b2c3");
        assert_eq!(record.status, ArtifactStatus::Starting);
        assert_eq!(record.location, Location::Temp);
        assert!(record.pid.is_none());
        assert!(record.is_consistent());
        assert!(record.source_file().is_none());
    }

    #[test]
    fn test_set_port_rewrites_url() {
        let mut record = sample();
        record.set_port(5000);
        assert_eq!(record.url, preview_url(5000, "a1b2c3"));
    }

    #[test]
    fn test_location_moves_keep_invariant() {
        let mut record = sample();
        let runtime = record.runtime_dir.clone();

        record.move_to_saved(PathBuf::from("/work/.artifact/saved/a1b2c3"));
        assert_eq!(record.location, Location::Saved);
        assert!(record.is_consistent());
        assert_eq!(record.runtime_dir, runtime);

        record.move_to_temp(PathBuf::from("/tmp/artifact-cli/artifacts/a1b2c3"));
        assert_eq!(record.location, Location::Temp);
        assert!(record.saved_path.is_none());
        assert!(record.is_consistent());
    }

    #[test]
    fn test_inconsistent_records_detected() {
        let mut record = sample();
        record.location = Location::Saved;
        assert!(!record.is_consistent());

        let mut record = sample();
        record.saved_path = Some(PathBuf::from("/work/.artifact/saved/a1b2c3"));
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_mark_transitions() {
        let mut record = sample();
        record.mark_running(4242);
        assert_eq!(record.pid, Some(4242));
        assert_eq!(record.status, ArtifactStatus::Running);

        record.mark_stopped();
        assert!(record.pid.is_none());
        assert_eq!(record.status, ArtifactStatus::Stopped);
    }

    #[test]
    fn test_overridden_name_survives_refresh() {
        let mut record = sample();
        record.refresh_name("Detected".to_string());
        assert_eq!(record.component_name, "Detected");

        record.override_name("Custom");
        record.refresh_name("Detected".to_string());
        assert_eq!(record.component_name, "Custom");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nameOverride"], "Custom");
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "a1b2c3");
        assert_eq!(json["sourceCode"], "export default function X(){return null}");
        assert!(json.get("sourceFile").is_none());
        assert_eq!(json["componentName"], "X");
        assert_eq!(json["status"], "starting");
        assert_eq!(json["location"], "temp");
        assert!(json["savedPath"].is_null());
        assert!(json["createdAt"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_file_source_roundtrip() {
        let mut record = sample();
        record.content_source = ContentSource::File(PathBuf::from("/work/src/Button.tsx"));
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"sourceFile\":\"/work/src/Button.tsx\""));

        let parsed: ArtifactRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed.source_file(),
            Some(Path::new("/work/src/Button.tsx"))
        );
    }

    #[test]
    fn test_legacy_record_defaults_location() {
        let legacy = r#"{
            "id": "old123",
            "sourceCode": "export default function Old(){return null}",
            "componentName": "Old",
            "contentDir": "/tmp/artifact-cli/artifacts/old123",
            "port": 3000,
            "url": "http://localhost:3000/old123",
            "pid": null,
            "status": "stopped",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let record: ArtifactRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(record.location, Location::Temp);
        assert!(record.saved_path.is_none());
        assert!(record.name_override.is_none());
        assert_eq!(record.runtime_dir, PathBuf::new());
    }
}
