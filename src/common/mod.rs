//! Common utility modules shared across commands.

pub mod fs;
