//! Domain models for Artifact
//!
//! This module contains plain domain objects: the persisted artifact record and the component
//! analysis passed between the analyzer and the renderer.

pub mod analysis;
pub mod artifact;

pub use analysis::{ComponentAnalysis, LocalImport};
pub use artifact::{ArtifactRecord, ArtifactStatus, ContentSource, Location, preview_url};
