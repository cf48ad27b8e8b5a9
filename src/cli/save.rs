use clap::Parser;

/// Arguments for the save command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Keep an artifact in the current project:\n    artifact save a1b2c3\n\n\
                  The content moves to .artifact/saved/a1b2c3/")]
pub struct SaveArgs {
    /// Artifact ID
    pub id: String,
}

/// Arguments for the unsave command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Move a saved artifact back to the temp area:\n    artifact unsave a1b2c3")]
pub struct UnsaveArgs {
    /// Artifact ID
    pub id: String,
}
