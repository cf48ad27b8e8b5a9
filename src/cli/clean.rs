use clap::Parser;

/// Arguments for the clean command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a stopped artifact:\n    artifact clean a1b2c3\n\n\
                  Remove every stopped artifact:\n    artifact clean --all\n\n\
                  Stop and remove everything:\n    artifact clean --all --force")]
pub struct CleanArgs {
    /// Artifact ID
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Remove all artifacts
    #[arg(long)]
    pub all: bool,

    /// Stop running artifacts before removing them
    #[arg(long, short = 'f')]
    pub force: bool,
}
