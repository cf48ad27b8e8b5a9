//! Command implementations for the Artifact CLI
//!
//! Each command is an orchestrator over the store, the supervisor and the location migrator.

pub mod clean;
pub mod completions;
pub mod create;
pub mod helpers;
pub mod list;
pub mod open;
pub mod save;
pub mod serve;
pub mod stop;
pub mod update;
