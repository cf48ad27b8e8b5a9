use clap::Parser;

/// Arguments for the stop command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Stop one preview server:\n    artifact stop a1b2c3\n\n\
                  Stop every running preview server:\n    artifact stop --all")]
pub struct StopArgs {
    /// Artifact ID
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Stop all artifacts
    #[arg(long)]
    pub all: bool,
}
